mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	BoundingBoxConfig, Config, EmbeddingProviderConfig, Ingest, Postgres, Providers, Service,
	Storage, Worker,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.enabled {
		if cfg.providers.embedding.api_base.trim().is_empty() {
			return Err(Error::Validation {
				message: "providers.embedding.api_base must be non-empty when the provider is enabled."
					.to_string(),
			});
		}
		if cfg.providers.embedding.model.trim().is_empty() {
			return Err(Error::Validation {
				message: "providers.embedding.model must be non-empty when the provider is enabled."
					.to_string(),
			});
		}
		if cfg.providers.embedding.timeout_ms == 0 {
			return Err(Error::Validation {
				message: "providers.embedding.timeout_ms must be greater than zero.".to_string(),
			});
		}
	}
	if cfg.ingest.batch_size == 0 {
		return Err(Error::Validation {
			message: "ingest.batch_size must be greater than zero.".to_string(),
		});
	}
	if !cfg.ingest.max_depth.is_finite() || cfg.ingest.max_depth <= 0.0 {
		return Err(Error::Validation {
			message: "ingest.max_depth must be a positive finite number.".to_string(),
		});
	}

	for flag in &cfg.ingest.quality_flags {
		if *flag > 9 {
			return Err(Error::Validation {
				message: "ingest.quality_flags entries must be single-digit codes.".to_string(),
			});
		}
	}

	if let Some(bounds) = cfg.ingest.bounding_box.as_ref() {
		if bounds.lat_min >= bounds.lat_max {
			return Err(Error::Validation {
				message: "ingest.bounding_box.lat_min must be less than lat_max.".to_string(),
			});
		}
		if bounds.lon_min >= bounds.lon_max {
			return Err(Error::Validation {
				message: "ingest.bounding_box.lon_min must be less than lon_max.".to_string(),
			});
		}
		if !(-90.0..=90.0).contains(&bounds.lat_min) || !(-90.0..=90.0).contains(&bounds.lat_max) {
			return Err(Error::Validation {
				message: "ingest.bounding_box latitudes must be in the range -90.0 to 90.0."
					.to_string(),
			});
		}
		if !(-180.0..=180.0).contains(&bounds.lon_min) || !(-180.0..=180.0).contains(&bounds.lon_max)
		{
			return Err(Error::Validation {
				message: "ingest.bounding_box longitudes must be in the range -180.0 to 180.0."
					.to_string(),
			});
		}
	}
	if cfg.worker.poll_interval_ms == 0 {
		return Err(Error::Validation {
			message: "worker.poll_interval_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	while cfg.providers.embedding.api_base.ends_with('/') {
		cfg.providers.embedding.api_base.pop();
	}

	if !cfg.providers.embedding.path.starts_with('/') && !cfg.providers.embedding.path.is_empty() {
		cfg.providers.embedding.path.insert(0, '/');
	}

	cfg.ingest.quality_flags.sort_unstable();
	cfg.ingest.quality_flags.dedup();
}
