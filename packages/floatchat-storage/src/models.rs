use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use floatchat_domain::Measurement;

#[derive(Debug, sqlx::FromRow)]
pub struct Dataset {
	pub dataset_id: Uuid,
	pub filename: String,
	/// Absolute path recorded at upload time; workers fall back to resolving
	/// `filename` against their configured data directory.
	pub file_path: Option<String>,
	pub status: String,
	pub variables: Value,
	pub dimensions: Value,
	pub last_error: Option<String>,
	pub uploaded_by: Option<String>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

/// One flattened reading of `dataset_values`. The natural key
/// `(dataset_id, variable, profile_index, level_index)` keeps replayed flushes
/// idempotent.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct MeasurementRow {
	pub dataset_id: Uuid,
	pub variable: String,
	pub value: f64,
	pub lat: f64,
	pub lon: f64,
	pub depth: Option<f64>,
	pub observed_at: OffsetDateTime,
	pub time_estimated: bool,
	pub profile_index: i32,
	pub level_index: i32,
}
impl MeasurementRow {
	pub fn from_measurement(dataset_id: Uuid, measurement: &Measurement) -> Self {
		Self {
			dataset_id,
			variable: measurement.variable.clone(),
			value: measurement.value,
			lat: measurement.lat,
			lon: measurement.lon,
			depth: measurement.depth,
			observed_at: measurement.time,
			time_estimated: measurement.time_estimated,
			profile_index: measurement.profile_index as i32,
			level_index: measurement.level_index as i32,
		}
	}

	pub fn into_measurement(self) -> Measurement {
		Measurement {
			variable: self.variable,
			time: self.observed_at,
			time_estimated: self.time_estimated,
			lat: self.lat,
			lon: self.lon,
			depth: self.depth,
			value: self.value,
			profile_index: self.profile_index.max(0) as usize,
			level_index: self.level_index.max(0) as usize,
		}
	}
}

#[derive(Clone, Debug)]
pub struct EmbeddingRecord {
	pub dataset_id: Uuid,
	pub variable: String,
	pub region: String,
	pub summary: String,
	pub vector: Vec<f32>,
	pub source: String,
	pub observed_at: OffsetDateTime,
}
