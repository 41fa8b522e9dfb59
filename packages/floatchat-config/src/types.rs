use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub ingest: Ingest,
	#[serde(default)]
	pub worker: Worker,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingProviderConfig {
	/// When false the remote provider is never contacted and every summary is
	/// embedded with the deterministic fallback.
	#[serde(default)]
	pub enabled: bool,
	#[serde(default)]
	pub api_base: String,
	#[serde(default = "default_embedding_path")]
	pub path: String,
	#[serde(default)]
	pub model: String,
	#[serde(default = "default_embedding_dimensions")]
	pub dimensions: u32,
	#[serde(default = "default_embedding_timeout_ms")]
	pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Ingest {
	pub batch_size: usize,
	pub max_depth: f64,
	pub quality_flags: Vec<u8>,
	pub bounding_box: Option<BoundingBoxConfig>,
}
impl Default for Ingest {
	fn default() -> Self {
		Self {
			batch_size: 1_000,
			max_depth: 2_000.0,
			quality_flags: vec![1, 2],
			bounding_box: None,
		}
	}
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BoundingBoxConfig {
	pub lat_min: f64,
	pub lat_max: f64,
	pub lon_min: f64,
	pub lon_max: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Worker {
	pub poll_interval_ms: u64,
}
impl Default for Worker {
	fn default() -> Self {
		Self { poll_interval_ms: 500 }
	}
}

fn default_embedding_path() -> String {
	"/api/embeddings".to_string()
}

fn default_embedding_dimensions() -> u32 {
	768
}

fn default_embedding_timeout_ms() -> u64 {
	30_000
}
