use time::macros::datetime;

use floatchat_domain::{
	BoundingBox, ChannelMap, DatasetStatus, LocateError, Measurement, RawSample, SampleFilter,
	channel::DEFAULT_ALIASES, region, summary,
};

fn names(raw: &[&str]) -> Vec<String> {
	raw.iter().map(|name| name.to_string()).collect()
}

fn sample(value: f64) -> RawSample {
	RawSample { value, qc: None, depth: None, position: None }
}

fn measurement(value: f64, lat: f64, lon: f64, depth: Option<f64>) -> Measurement {
	Measurement {
		variable: "temperature".to_string(),
		time: datetime!(2023-03-15 12:00 UTC),
		time_estimated: false,
		lat,
		lon,
		depth,
		value,
		profile_index: 0,
		level_index: 0,
	}
}

#[test]
fn locator_resolves_argo_names_case_insensitively() {
	let map = ChannelMap::locate(&names(&["LATITUDE", "LONGITUDE", "JULD", "TEMP", "PSAL", "PRES"]))
		.expect("All channels present.");

	assert_eq!(map.latitude, "LATITUDE");
	assert_eq!(map.longitude, "LONGITUDE");
	assert_eq!(map.time.as_deref(), Some("JULD"));
	assert_eq!(map.temperature.as_deref(), Some("TEMP"));
	assert_eq!(map.salinity.as_deref(), Some("PSAL"));
	assert_eq!(map.pressure.as_deref(), Some("PRES"));
}

#[test]
fn locator_prefers_the_first_matching_alias() {
	let map = ChannelMap::locate(&names(&["lat", "lon", "TEMP_ADJUSTED", "temperature"]))
		.expect("Position channels present.");

	// "temperature" outranks "temp_adjusted" in the alias table.
	assert_eq!(map.temperature.as_deref(), Some("temperature"));
}

#[test]
fn locator_fails_without_position_channels() {
	let err = ChannelMap::locate(&names(&["TEMP", "PSAL", "JULD"]))
		.expect_err("Position channels are mandatory.");

	assert!(matches!(err, LocateError::MissingRequiredVariable { channel: "latitude" }));
}

#[test]
fn locator_tolerates_missing_optional_channels() {
	let map = ChannelMap::locate(&names(&["LATITUDE", "LONGITUDE"]))
		.expect("Position channels are enough.");

	assert!(map.time.is_none());
	assert!(map.temperature.is_none());
	assert!(map.salinity.is_none());
	assert!(map.pressure.is_none());
	assert!(map.value_channels().is_empty());
}

#[test]
fn locator_accepts_a_custom_alias_table() {
	const CUSTOM: floatchat_domain::channel::AliasTable = &[
		(floatchat_domain::Channel::Latitude, &["y_coord"]),
		(floatchat_domain::Channel::Longitude, &["x_coord"]),
	];

	let map = ChannelMap::locate_with(&names(&["y_coord", "x_coord"]), CUSTOM)
		.expect("Custom aliases must resolve.");

	assert_eq!(map.latitude, "y_coord");
	assert_eq!(map.longitude, "x_coord");
	assert!(ChannelMap::locate_with(&names(&["y_coord", "x_coord"]), DEFAULT_ALIASES).is_err());
}

#[test]
fn filter_rejects_flags_outside_the_whitelist() {
	let filter = SampleFilter::new(vec![1, 2], 2_000.0, None);

	assert_eq!(filter.accept(&RawSample { qc: Some(1), ..sample(12.5) }), Some(12.5));
	assert_eq!(filter.accept(&RawSample { qc: Some(4), ..sample(12.5) }), None);
}

#[test]
fn filter_ignores_qc_when_the_whitelist_is_empty() {
	let filter = SampleFilter::new(Vec::new(), 2_000.0, None);

	assert_eq!(filter.accept(&RawSample { qc: Some(9), ..sample(3.0) }), Some(3.0));
}

#[test]
fn filter_rejects_nan_and_infinite_values() {
	let filter = SampleFilter::new(vec![1, 2], 2_000.0, None);

	assert_eq!(filter.accept(&sample(f64::NAN)), None);
	assert_eq!(filter.accept(&sample(f64::INFINITY)), None);
	assert_eq!(filter.accept(&sample(f64::NEG_INFINITY)), None);
}

#[test]
fn filter_applies_the_max_depth_cutoff() {
	let filter = SampleFilter::new(vec![1, 2], 2_000.0, None);

	for depth in [10.0, 50.0] {
		assert_eq!(filter.accept(&RawSample { depth: Some(depth), ..sample(5.0) }), Some(5.0));
	}

	assert_eq!(filter.accept(&RawSample { depth: Some(9_999.0), ..sample(5.0) }), None);
	assert_eq!(filter.accept(&sample(5.0)), Some(5.0));
}

#[test]
fn filter_rejects_positions_outside_the_bounding_box() {
	let bounds = BoundingBox::new(-60.0, 30.0, 20.0, 150.0);
	let filter = SampleFilter::new(vec![1, 2], 2_000.0, Some(bounds));

	assert_eq!(filter.accept(&RawSample { position: Some((-10.0, 75.0)), ..sample(8.0) }), Some(8.0));
	assert_eq!(filter.accept(&RawSample { position: Some((45.0, 75.0)), ..sample(8.0) }), None);
	assert_eq!(filter.accept(&RawSample { position: Some((-10.0, 170.0)), ..sample(8.0) }), None);
}

#[test]
fn filter_rules_apply_in_order() {
	let filter = SampleFilter::new(vec![1], 2_000.0, None);

	// A bad QC flag rejects even a value that would pass every other rule.
	assert_eq!(
		filter.accept(&RawSample { qc: Some(4), depth: Some(10.0), ..sample(20.0) }),
		None
	);
}

#[test]
fn status_transitions_follow_the_lifecycle() {
	use DatasetStatus::*;

	assert!(Uploaded.can_transition(Processing));
	assert!(Processing.can_transition(Completed));
	assert!(Processing.can_transition(Failed));

	assert!(!Uploaded.can_transition(Completed));
	assert!(!Completed.can_transition(Processing));
	assert!(!Failed.can_transition(Processing));
	assert!(Completed.is_terminal());
	assert!(Failed.is_terminal());
	assert!(!Processing.is_terminal());
}

#[test]
fn status_round_trips_through_strings() {
	for status in
		[DatasetStatus::Uploaded, DatasetStatus::Processing, DatasetStatus::Completed, DatasetStatus::Failed]
	{
		assert_eq!(DatasetStatus::parse(status.as_str()), Some(status));
	}

	assert_eq!(DatasetStatus::parse("queued"), None);
}

#[test]
fn sub_region_classification_matches_fixed_boxes() {
	assert_eq!(region::classify(-10.0, 75.0), Some("Indian Ocean"));
	assert_eq!(region::classify(-65.0, 75.0), Some("Southern Ocean"));
	assert_eq!(region::classify(45.0, -30.0), None);
}

#[test]
fn group_stats_cover_values_positions_and_depth() {
	let records = [
		measurement(10.0, -20.0, 60.0, Some(10.0)),
		measurement(20.0, -10.0, 80.0, Some(1_500.0)),
		measurement(30.0, -30.0, 70.0, None),
	];
	let refs: Vec<&Measurement> = records.iter().collect();
	let stats = summary::compute(&refs).expect("Non-empty group.");

	assert_eq!(stats.count, 3);
	assert_eq!(stats.mean, 20.0);
	assert_eq!(stats.min, 10.0);
	assert_eq!(stats.max, 30.0);
	assert_eq!(stats.lat_min, -30.0);
	assert_eq!(stats.lat_max, -10.0);
	assert_eq!(stats.lon_min, 60.0);
	assert_eq!(stats.lon_max, 80.0);
	assert_eq!(stats.depth_max, Some(1_500.0));
}

#[test]
fn group_stats_of_an_empty_group_are_none() {
	assert!(summary::compute(&[]).is_none());
}

#[test]
fn summary_rendering_is_deterministic() {
	let records = [measurement(10.0, -20.0, 60.0, Some(10.0)), measurement(20.0, -10.0, 80.0, None)];
	let refs: Vec<&Measurement> = records.iter().collect();
	let stats = summary::compute(&refs).expect("Non-empty group.");
	let first = summary::render("temperature", "Global", &stats);
	let second = summary::render("temperature", "Global", &stats);

	assert_eq!(first, second);
	assert_eq!(
		first,
		"temperature in Global: count=2, mean=15.00, min=10.00, max=20.00, \
		 lat -20.00 to -10.00, lon 60.00 to 80.00, depth to 10.0 dbar"
	);
}

#[test]
fn summary_omits_depth_when_no_record_carries_one() {
	let records = [measurement(10.0, -20.0, 60.0, None)];
	let refs: Vec<&Measurement> = records.iter().collect();
	let stats = summary::compute(&refs).expect("Non-empty group.");

	assert!(!summary::render("salinity", "Indian Ocean", &stats).contains("depth"));
}
