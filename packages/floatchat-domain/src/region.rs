use floatchat_config::BoundingBoxConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
	pub lat_min: f64,
	pub lat_max: f64,
	pub lon_min: f64,
	pub lon_max: f64,
}
impl BoundingBox {
	pub const fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
		Self { lat_min, lat_max, lon_min, lon_max }
	}

	pub fn contains(&self, lat: f64, lon: f64) -> bool {
		lat >= self.lat_min && lat < self.lat_max && lon >= self.lon_min && lon < self.lon_max
	}
}
impl From<BoundingBoxConfig> for BoundingBox {
	fn from(cfg: BoundingBoxConfig) -> Self {
		Self::new(cfg.lat_min, cfg.lat_max, cfg.lon_min, cfg.lon_max)
	}
}

#[derive(Clone, Copy, Debug)]
pub struct NamedRegion {
	pub label: &'static str,
	pub bounds: BoundingBox,
}

/// Fixed sub-regions used to bucket accepted samples for summary embeddings.
/// Matches the coordinate classification of the deployed dataset coverage.
pub const SUB_REGIONS: &[NamedRegion] = &[
	NamedRegion { label: "Indian Ocean", bounds: BoundingBox::new(-60.0, 30.0, 20.0, 150.0) },
	NamedRegion { label: "Southern Ocean", bounds: BoundingBox::new(-90.0, -60.0, -180.0, 180.0) },
];

pub fn classify(lat: f64, lon: f64) -> Option<&'static str> {
	SUB_REGIONS.iter().find(|region| region.bounds.contains(lat, lon)).map(|region| region.label)
}
