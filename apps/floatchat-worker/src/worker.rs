use std::{path::PathBuf, time::Duration};

use color_eyre::Result;
use tokio::time;

use floatchat_config::Ingest;
use floatchat_ingest::{Error as IngestError, ingest_dataset};
use floatchat_providers::Embedder;
use floatchat_storage::{db::Db, queries};

pub struct WorkerState {
	pub db: Db,
	pub embedder: Embedder,
	pub ingest: Ingest,
	pub poll_interval_ms: u64,
	pub data_dir: PathBuf,
}

/// Polls for `uploaded` datasets and runs each through the ingest pipeline.
/// Drains the queue without sleeping, then idles at the poll interval.
pub async fn run_worker(state: WorkerState) -> Result<()> {
	tracing::info!(
		strategies = ?state.embedder.strategy_labels(),
		data_dir = %state.data_dir.display(),
		"Worker started.",
	);

	loop {
		match process_next_dataset(&state).await {
			Ok(true) => continue,
			Ok(false) => {},
			Err(err) => {
				tracing::error!(error = %err, "Dataset polling failed.");
			},
		}

		time::sleep(Duration::from_millis(state.poll_interval_ms)).await;
	}
}

/// Returns whether a dataset was picked up. Run failures are terminal for the
/// dataset, not for the worker: the pipeline has already marked it `failed`.
async fn process_next_dataset(state: &WorkerState) -> Result<bool> {
	let Some(dataset) = queries::next_uploaded(&state.db).await? else {
		return Ok(false);
	};
	let path = dataset
		.file_path
		.as_deref()
		.map(PathBuf::from)
		.unwrap_or_else(|| state.data_dir.join(&dataset.filename));

	match ingest_dataset(&state.db, &state.embedder, &state.ingest, dataset.dataset_id, &path)
		.await
	{
		Ok(_) => {},
		Err(IngestError::AlreadyClaimed(dataset_id)) => {
			tracing::debug!(%dataset_id, "Dataset claimed by another worker; skipping.");
		},
		// Already reported and persisted by the pipeline.
		Err(_) => {},
	}

	Ok(true)
}
