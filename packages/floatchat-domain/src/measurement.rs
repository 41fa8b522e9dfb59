use time::OffsetDateTime;

/// One flattened (variable, time, position, depth, value) tuple extracted from
/// a profile. Immutable after creation; the storage layer adds the owning
/// dataset reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
	pub variable: String,
	pub time: OffsetDateTime,
	/// True when the file carried no usable time axis and the run's wall-clock
	/// time was substituted.
	pub time_estimated: bool,
	pub lat: f64,
	pub lon: f64,
	pub depth: Option<f64>,
	pub value: f64,
	pub profile_index: usize,
	pub level_index: usize,
}
