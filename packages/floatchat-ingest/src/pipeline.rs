use std::{collections::BTreeMap, path::Path};

use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use floatchat_config::Ingest;
use floatchat_domain::{ChannelMap, Measurement, RawSample, SampleFilter, region, summary};
use floatchat_netcdf::ProfileFile;
use floatchat_providers::Embedder;
use floatchat_storage::models::{EmbeddingRecord, MeasurementRow};

use crate::{
	batcher::RecordBatcher,
	error::{Error, Result},
	store::IngestStore,
};

/// Summary group covering every accepted record of a variable.
const GLOBAL_REGION: &str = "Global";

/// Outcome counters for one dataset run, reported once the terminal status is
/// written.
#[derive(Clone, Copy, Debug)]
pub struct IngestReport {
	pub profiles: usize,
	pub records_created: u64,
	pub records_rejected: u64,
	pub flushes: u32,
	pub embeddings_created: usize,
}

/// Processes one claimed dataset end to end. The claim is a compare-and-set on
/// the `uploaded` status, so a dataset dispatched twice runs exactly once; the
/// loser gets [`Error::AlreadyClaimed`]. Every other failure marks the dataset
/// `failed` with the error text before propagating.
pub async fn ingest_dataset<S>(
	store: &S,
	embedder: &Embedder,
	settings: &Ingest,
	dataset_id: Uuid,
	path: &Path,
) -> Result<IngestReport>
where
	S: IngestStore,
{
	if !store.claim_processing(dataset_id).await? {
		return Err(Error::AlreadyClaimed(dataset_id));
	}

	match run(store, embedder, settings, dataset_id, path).await {
		Ok(report) => {
			store.mark_completed(dataset_id).await?;

			tracing::info!(
				%dataset_id,
				profiles = report.profiles,
				created = report.records_created,
				rejected = report.records_rejected,
				flushes = report.flushes,
				embeddings = report.embeddings_created,
				"Dataset completed.",
			);

			Ok(report)
		},
		Err(err) => {
			store.mark_failed(dataset_id, &err.to_string()).await?;

			tracing::warn!(%dataset_id, %err, "Dataset failed.");

			Err(err)
		},
	}
}

async fn run<S>(
	store: &S,
	embedder: &Embedder,
	settings: &Ingest,
	dataset_id: Uuid,
	path: &Path,
) -> Result<IngestReport>
where
	S: IngestStore,
{
	let file = ProfileFile::open(path)?;
	let names = file.variable_names();
	let channels = ChannelMap::locate(&names)?;

	store.update_catalog(dataset_id, &Value::from(names), &file.dimension_summary()).await?;

	let axis = file.time_axis(&channels);
	let filter = SampleFilter::from_settings(settings);
	let fallback_now = OffsetDateTime::now_utc();
	let mut batcher = RecordBatcher::new(store, settings.batch_size);
	let mut rejected: u64 = 0;
	let profiles = file.profile_count();

	for profile_index in 0..profiles {
		let profile = file.read_profile(&channels, &axis, profile_index, fallback_now)?;

		if !profile.has_position() {
			rejected += profile.candidate_count() as u64;

			tracing::debug!(profile_index, "Profile carries no usable position; skipped.");

			continue;
		}

		let position = (profile.latitude, profile.longitude);

		for series in &profile.channels {
			for (level_index, raw) in series.values.iter().enumerate() {
				let sample = RawSample {
					value: *raw,
					qc: series.qc_at(level_index),
					depth: profile.depth_at(level_index),
					position: Some(position),
				};
				let Some(value) = filter.accept(&sample) else {
					rejected += 1;

					continue;
				};
				let measurement = Measurement {
					variable: series.label.to_string(),
					time: profile.time.at,
					time_estimated: profile.time.estimated,
					lat: profile.latitude,
					lon: profile.longitude,
					depth: sample.depth,
					value,
					profile_index,
					level_index,
				};

				batcher.push(MeasurementRow::from_measurement(dataset_id, &measurement)).await?;
			}
		}
	}

	let (records_created, flushes) = batcher.finish().await?;
	// Summaries are derived from what actually persisted, not from the walk, so
	// a replayed run regenerates identical digests.
	let persisted: Vec<Measurement> = store
		.fetch_measurements(dataset_id)
		.await?
		.into_iter()
		.map(MeasurementRow::into_measurement)
		.collect();
	let embeddings_created = embed_summaries(store, embedder, dataset_id, &persisted).await?;

	Ok(IngestReport { profiles, records_created, records_rejected: rejected, flushes, embeddings_created })
}

/// One embedding per (variable, region) group with at least one record: the
/// global group always, sub-region groups when populated.
async fn embed_summaries<S>(
	store: &S,
	embedder: &Embedder,
	dataset_id: Uuid,
	records: &[Measurement],
) -> Result<usize>
where
	S: IngestStore,
{
	let mut by_variable: BTreeMap<&str, Vec<&Measurement>> = BTreeMap::new();

	for record in records {
		by_variable.entry(record.variable.as_str()).or_default().push(record);
	}

	let mut created = 0;

	for (variable, group) in &by_variable {
		let mut regions: Vec<(&str, Vec<&Measurement>)> = vec![(GLOBAL_REGION, group.clone())];

		for named in region::SUB_REGIONS {
			let members: Vec<&Measurement> = group
				.iter()
				.copied()
				.filter(|record| region::classify(record.lat, record.lon) == Some(named.label))
				.collect();

			if !members.is_empty() {
				regions.push((named.label, members));
			}
		}

		for (region_label, members) in regions {
			let Some(stats) = summary::compute(&members) else {
				continue;
			};
			let text = summary::render(variable, region_label, &stats);
			let (vector, source) = embedder.embed(&text).await;
			let record = EmbeddingRecord {
				dataset_id,
				variable: variable.to_string(),
				region: region_label.to_string(),
				summary: text,
				vector,
				source: source.as_str().to_string(),
				observed_at: stats.latest_time,
			};

			store.insert_embedding(&record).await?;

			created += 1;
		}
	}

	Ok(created)
}
