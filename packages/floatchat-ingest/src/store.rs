use serde_json::Value;
use uuid::Uuid;

use floatchat_storage::{
	db::Db,
	models::{EmbeddingRecord, MeasurementRow},
	queries,
};

use crate::error::Result;

/// Persistence surface the pipeline runs against. The production
/// implementation is the Postgres [`Db`]; tests substitute an in-memory store.
#[allow(async_fn_in_trait)]
pub trait IngestStore {
	async fn claim_processing(&self, dataset_id: Uuid) -> Result<bool>;
	async fn update_catalog(
		&self,
		dataset_id: Uuid,
		variables: &Value,
		dimensions: &Value,
	) -> Result<()>;
	async fn insert_measurements(&self, rows: &[MeasurementRow]) -> Result<u64>;
	async fn fetch_measurements(&self, dataset_id: Uuid) -> Result<Vec<MeasurementRow>>;
	async fn insert_embedding(&self, record: &EmbeddingRecord) -> Result<()>;
	async fn mark_completed(&self, dataset_id: Uuid) -> Result<()>;
	async fn mark_failed(&self, dataset_id: Uuid, error: &str) -> Result<()>;
}

impl IngestStore for Db {
	async fn claim_processing(&self, dataset_id: Uuid) -> Result<bool> {
		Ok(queries::claim_processing(self, dataset_id).await?)
	}

	async fn update_catalog(
		&self,
		dataset_id: Uuid,
		variables: &Value,
		dimensions: &Value,
	) -> Result<()> {
		Ok(queries::update_catalog(self, dataset_id, variables, dimensions).await?)
	}

	async fn insert_measurements(&self, rows: &[MeasurementRow]) -> Result<u64> {
		Ok(queries::insert_measurements(self, rows).await?)
	}

	async fn fetch_measurements(&self, dataset_id: Uuid) -> Result<Vec<MeasurementRow>> {
		Ok(queries::fetch_measurements(self, dataset_id).await?)
	}

	async fn insert_embedding(&self, record: &EmbeddingRecord) -> Result<()> {
		Ok(queries::insert_embedding(self, record).await?)
	}

	async fn mark_completed(&self, dataset_id: Uuid) -> Result<()> {
		Ok(queries::mark_completed(self, dataset_id).await?)
	}

	async fn mark_failed(&self, dataset_id: Uuid, error: &str) -> Result<()> {
		Ok(queries::mark_failed(self, dataset_id, error).await?)
	}
}
