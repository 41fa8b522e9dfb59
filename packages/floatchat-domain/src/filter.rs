use floatchat_config::Ingest;

use crate::region::BoundingBox;

/// A raw scalar pulled from the file, before validation.
#[derive(Clone, Copy, Debug)]
pub struct RawSample {
	pub value: f64,
	pub qc: Option<u8>,
	pub depth: Option<f64>,
	pub position: Option<(f64, f64)>,
}

/// Per-value validity rules. Rejection is a routine outcome and is reported
/// through `None`, never as an error.
#[derive(Clone, Debug)]
pub struct SampleFilter {
	quality_flags: Vec<u8>,
	max_depth: f64,
	bounding_box: Option<BoundingBox>,
}
impl SampleFilter {
	pub fn new(quality_flags: Vec<u8>, max_depth: f64, bounding_box: Option<BoundingBox>) -> Self {
		Self { quality_flags, max_depth, bounding_box }
	}

	pub fn from_settings(settings: &Ingest) -> Self {
		Self::new(
			settings.quality_flags.clone(),
			settings.max_depth,
			settings.bounding_box.map(BoundingBox::from),
		)
	}

	/// Applies the rules in order: QC whitelist, finiteness, depth cutoff,
	/// bounding box. Out-of-box samples are dropped, not clipped.
	pub fn accept(&self, sample: &RawSample) -> Option<f64> {
		if let Some(flag) = sample.qc
			&& !self.quality_flags.is_empty()
			&& !self.quality_flags.contains(&flag)
		{
			return None;
		}
		if !sample.value.is_finite() {
			return None;
		}
		if let Some(depth) = sample.depth
			&& depth > self.max_depth
		{
			return None;
		}
		if let Some(bounds) = self.bounding_box.as_ref()
			&& let Some((lat, lon)) = sample.position
			&& !bounds.contains(lat, lon)
		{
			return None;
		}

		Some(sample.value)
	}

	pub fn max_depth(&self) -> f64 {
		self.max_depth
	}
}
