use time::OffsetDateTime;

use crate::measurement::Measurement;

/// Statistical digest of one (variable, region) group of measurements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupStats {
	pub count: usize,
	pub mean: f64,
	pub min: f64,
	pub max: f64,
	pub lat_min: f64,
	pub lat_max: f64,
	pub lon_min: f64,
	pub lon_max: f64,
	pub depth_max: Option<f64>,
	/// Latest record time in the group; keeps the persisted digest regenerable
	/// from the same records.
	pub latest_time: OffsetDateTime,
}

pub fn compute(records: &[&Measurement]) -> Option<GroupStats> {
	let first = records.first()?;
	let mut stats = GroupStats {
		count: records.len(),
		mean: 0.0,
		min: first.value,
		max: first.value,
		lat_min: first.lat,
		lat_max: first.lat,
		lon_min: first.lon,
		lon_max: first.lon,
		depth_max: None,
		latest_time: first.time,
	};
	let mut sum = 0.0;

	for record in records {
		sum += record.value;
		stats.min = stats.min.min(record.value);
		stats.max = stats.max.max(record.value);
		stats.lat_min = stats.lat_min.min(record.lat);
		stats.lat_max = stats.lat_max.max(record.lat);
		stats.lon_min = stats.lon_min.min(record.lon);
		stats.lon_max = stats.lon_max.max(record.lon);

		if let Some(depth) = record.depth {
			stats.depth_max = Some(stats.depth_max.map_or(depth, |max: f64| max.max(depth)));
		}
		if record.time > stats.latest_time {
			stats.latest_time = record.time;
		}
	}

	stats.mean = sum / records.len() as f64;

	Some(stats)
}

/// Renders the digest as a fixed-format summary string. Deterministic: the same
/// records always produce byte-identical text.
pub fn render(variable: &str, region: &str, stats: &GroupStats) -> String {
	let mut summary = format!(
		"{variable} in {region}: count={}, mean={:.2}, min={:.2}, max={:.2}, lat {:.2} to {:.2}, lon {:.2} to {:.2}",
		stats.count,
		stats.mean,
		stats.min,
		stats.max,
		stats.lat_min,
		stats.lat_max,
		stats.lon_min,
		stats.lon_max,
	);

	if let Some(depth) = stats.depth_max {
		summary.push_str(&format!(", depth to {depth:.1} dbar"));
	}

	summary
}
