use serde_json::Value;
use uuid::Uuid;

use crate::{
	Result,
	db::Db,
	models::{Dataset, EmbeddingRecord, MeasurementRow},
};

pub async fn create_dataset(
	db: &Db,
	filename: &str,
	file_path: Option<&str>,
	uploaded_by: Option<&str>,
) -> Result<Dataset> {
	let dataset = sqlx::query_as::<_, Dataset>(
		"\
INSERT INTO datasets (filename, file_path, uploaded_by)
VALUES ($1, $2, $3)
RETURNING *",
	)
	.bind(filename)
	.bind(file_path)
	.bind(uploaded_by)
	.fetch_one(&db.pool)
	.await?;

	Ok(dataset)
}

pub async fn fetch_dataset(db: &Db, dataset_id: Uuid) -> Result<Option<Dataset>> {
	let dataset =
		sqlx::query_as::<_, Dataset>("SELECT * FROM datasets WHERE dataset_id = $1")
			.bind(dataset_id)
			.fetch_optional(&db.pool)
			.await?;

	Ok(dataset)
}

/// Oldest dataset still waiting for a worker.
pub async fn next_uploaded(db: &Db) -> Result<Option<Dataset>> {
	let dataset = sqlx::query_as::<_, Dataset>(
		"\
SELECT *
FROM datasets
WHERE status = 'uploaded'
ORDER BY created_at
LIMIT 1",
	)
	.fetch_optional(&db.pool)
	.await?;

	Ok(dataset)
}

/// Compare-and-set claim: flips `uploaded` to `processing` and reports whether
/// this caller won. A second dispatch of the same dataset loses the race here.
pub async fn claim_processing(db: &Db, dataset_id: Uuid) -> Result<bool> {
	let result = sqlx::query(
		"\
UPDATE datasets
SET status = 'processing', updated_at = now()
WHERE dataset_id = $1
	AND status = 'uploaded'",
	)
	.bind(dataset_id)
	.execute(&db.pool)
	.await?;

	Ok(result.rows_affected() == 1)
}

pub async fn update_catalog(
	db: &Db,
	dataset_id: Uuid,
	variables: &Value,
	dimensions: &Value,
) -> Result<()> {
	sqlx::query(
		"\
UPDATE datasets
SET variables = $2, dimensions = $3, updated_at = now()
WHERE dataset_id = $1",
	)
	.bind(dataset_id)
	.bind(variables)
	.bind(dimensions)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub async fn mark_completed(db: &Db, dataset_id: Uuid) -> Result<()> {
	sqlx::query(
		"\
UPDATE datasets
SET status = 'completed', last_error = NULL, updated_at = now()
WHERE dataset_id = $1
	AND status = 'processing'",
	)
	.bind(dataset_id)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub async fn mark_failed(db: &Db, dataset_id: Uuid, error: &str) -> Result<()> {
	sqlx::query(
		"\
UPDATE datasets
SET status = 'failed', last_error = $2, updated_at = now()
WHERE dataset_id = $1
	AND status = 'processing'",
	)
	.bind(dataset_id)
	.bind(error)
	.execute(&db.pool)
	.await?;

	Ok(())
}

/// Bulk insert of one flushed batch. Rows whose natural key already exists are
/// skipped, so replaying a batch never duplicates readings. Returns the number
/// of rows actually written.
pub async fn insert_measurements(db: &Db, rows: &[MeasurementRow]) -> Result<u64> {
	if rows.is_empty() {
		return Ok(0);
	}

	let mut builder = sqlx::QueryBuilder::<sqlx::Postgres>::new(
		"\
INSERT INTO dataset_values (dataset_id, variable, value, lat, lon, depth, observed_at, \
		 time_estimated, profile_index, level_index) ",
	);

	builder.push_values(rows, |mut b, row| {
		b.push_bind(row.dataset_id)
			.push_bind(&row.variable)
			.push_bind(row.value)
			.push_bind(row.lat)
			.push_bind(row.lon)
			.push_bind(row.depth)
			.push_bind(row.observed_at)
			.push_bind(row.time_estimated)
			.push_bind(row.profile_index)
			.push_bind(row.level_index);
	});
	builder.push(" ON CONFLICT (dataset_id, variable, profile_index, level_index) DO NOTHING");

	let result = builder.build().execute(&db.pool).await?;

	Ok(result.rows_affected())
}

pub async fn fetch_measurements(db: &Db, dataset_id: Uuid) -> Result<Vec<MeasurementRow>> {
	let rows = sqlx::query_as::<_, MeasurementRow>(
		"\
SELECT dataset_id, variable, value, lat, lon, depth, observed_at, time_estimated, profile_index, \
		 level_index
FROM dataset_values
WHERE dataset_id = $1
ORDER BY variable, profile_index, level_index",
	)
	.bind(dataset_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn count_measurements(db: &Db, dataset_id: Uuid) -> Result<i64> {
	let count: i64 =
		sqlx::query_scalar("SELECT count(*) FROM dataset_values WHERE dataset_id = $1")
			.bind(dataset_id)
			.fetch_one(&db.pool)
			.await?;

	Ok(count)
}

/// Upsert keyed on `(dataset_id, variable, region)`: a re-run refreshes the
/// summary and vector instead of stacking duplicates.
pub async fn insert_embedding(db: &Db, record: &EmbeddingRecord) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO dataset_embeddings (dataset_id, variable, region, summary, vec, source, observed_at)
VALUES ($1, $2, $3, $4, $5::text::vector, $6, $7)
ON CONFLICT (dataset_id, variable, region) DO UPDATE
SET
	summary = EXCLUDED.summary,
	vec = EXCLUDED.vec,
	source = EXCLUDED.source,
	observed_at = EXCLUDED.observed_at,
	created_at = now()",
	)
	.bind(record.dataset_id)
	.bind(&record.variable)
	.bind(&record.region)
	.bind(&record.summary)
	.bind(format_vector_text(&record.vector))
	.bind(&record.source)
	.bind(record.observed_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub async fn count_embeddings(db: &Db, dataset_id: Uuid) -> Result<i64> {
	let count: i64 =
		sqlx::query_scalar("SELECT count(*) FROM dataset_embeddings WHERE dataset_id = $1")
			.bind(dataset_id)
			.fetch_one(&db.pool)
			.await?;

	Ok(count)
}

/// pgvector's text input format, `[v1,v2,...]`, cast server-side to `vector`.
pub fn format_vector_text(vector: &[f32]) -> String {
	let mut out = String::with_capacity(vector.len() * 8 + 2);

	out.push('[');

	for (index, value) in vector.iter().enumerate() {
		if index > 0 {
			out.push(',');
		}

		out.push_str(&value.to_string());
	}

	out.push(']');

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn vector_text_matches_the_pgvector_input_format() {
		assert_eq!(format_vector_text(&[0.5, -1.0, 2.0]), "[0.5,-1,2]");
		assert_eq!(format_vector_text(&[]), "[]");
	}
}
