use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod worker;

use floatchat_providers::Embedder;

#[derive(Debug, Parser)]
#[command(rename_all = "kebab")]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: std::path::PathBuf,
	/// Directory holding uploaded NetCDF files; dataset filenames resolve
	/// against it.
	#[arg(long, short = 'd', value_name = "DIR")]
	pub data_dir: std::path::PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = floatchat_config::load(&args.config)?;
	let filter = EnvFilter::new(config.service.log_level.clone());

	tracing_subscriber::fmt().with_env_filter(filter).init();

	let db = floatchat_storage::db::Db::connect(&config.storage.postgres).await?;

	db.ensure_schema(config.providers.embedding.dimensions).await?;

	let embedder = Embedder::from_config(&config.providers.embedding)?;
	let state = worker::WorkerState {
		db,
		embedder,
		ingest: config.ingest,
		poll_interval_ms: config.worker.poll_interval_ms,
		data_dir: args.data_dir,
	};

	worker::run_worker(state).await
}
