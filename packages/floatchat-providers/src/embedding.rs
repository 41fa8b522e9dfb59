use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use floatchat_config::EmbeddingProviderConfig;

use crate::error::{Error, Result};

/// Where an embedding vector came from. Persisted alongside the vector so
/// degraded runs stay auditable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EmbeddingSource {
	Remote,
	Fallback,
}
impl EmbeddingSource {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Remote => "remote",
			Self::Fallback => "fallback",
		}
	}
}

enum Strategy {
	Remote(RemoteEmbedder),
	Fallback,
}
impl Strategy {
	fn label(&self) -> &'static str {
		match self {
			Self::Remote(_) => "remote",
			Self::Fallback => "fallback",
		}
	}
}

/// Embeds summary texts by walking an ordered strategy list. The deterministic
/// hash fallback terminates the list, so `embed` always yields a vector.
pub struct Embedder {
	strategies: Vec<Strategy>,
	dimensions: usize,
}
impl Embedder {
	pub fn from_config(cfg: &EmbeddingProviderConfig) -> Result<Self> {
		let mut strategies = Vec::new();

		if cfg.enabled && !cfg.api_base.is_empty() {
			strategies.push(Strategy::Remote(RemoteEmbedder::new(cfg)?));
		}

		strategies.push(Strategy::Fallback);

		Ok(Self { strategies, dimensions: cfg.dimensions as usize })
	}

	pub fn dimensions(&self) -> usize {
		self.dimensions
	}

	pub fn strategy_labels(&self) -> Vec<&'static str> {
		self.strategies.iter().map(Strategy::label).collect()
	}

	pub async fn embed(&self, text: &str) -> (Vec<f32>, EmbeddingSource) {
		for strategy in &self.strategies {
			match strategy {
				Strategy::Remote(remote) => match remote.embed(text).await {
					Ok(vector) if vector.len() == self.dimensions =>
						return (vector, EmbeddingSource::Remote),
					Ok(vector) => tracing::warn!(
						expected = self.dimensions,
						actual = vector.len(),
						"Remote embedding has the wrong dimensionality; falling back.",
					),
					Err(err) => {
						tracing::warn!(?err, "Remote embedding failed; falling back.");
					},
				},
				Strategy::Fallback =>
					return (fallback_embedding(text, self.dimensions), EmbeddingSource::Fallback),
			}
		}

		// The constructor always appends the fallback strategy.
		(fallback_embedding(text, self.dimensions), EmbeddingSource::Fallback)
	}
}

struct RemoteEmbedder {
	client: Client,
	url: String,
	model: String,
}
impl RemoteEmbedder {
	fn new(cfg: &EmbeddingProviderConfig) -> Result<Self> {
		let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;

		Ok(Self {
			client,
			url: format!("{}{}", cfg.api_base, cfg.path),
			model: cfg.model.clone(),
		})
	}

	async fn embed(&self, text: &str) -> Result<Vec<f32>> {
		let body = serde_json::json!({
			"model": self.model,
			"prompt": text,
		});
		let res = self.client.post(&self.url).json(&body).send().await?;
		let json: Value = res.error_for_status()?.json().await?;

		parse_embedding_response(json)
	}
}

fn parse_embedding_response(json: Value) -> Result<Vec<f32>> {
	let embedding = json.get("embedding").and_then(|v| v.as_array()).ok_or_else(|| {
		Error::InvalidResponse { message: "Embedding response is missing embedding array.".into() }
	})?;
	let mut vector = Vec::with_capacity(embedding.len());

	for value in embedding {
		let number = value.as_f64().ok_or_else(|| Error::InvalidResponse {
			message: "Embedding value must be numeric.".into(),
		})?;

		vector.push(number as f32);
	}

	Ok(vector)
}

/// Deterministic stand-in embedding: hash bytes cycled across the vector and
/// scaled into `[-1, 1)`. Same text, same vector, on every machine.
pub fn fallback_embedding(text: &str, dimensions: usize) -> Vec<f32> {
	let digest = blake3::hash(text.as_bytes());
	let bytes = digest.as_bytes();

	(0..dimensions).map(|i| (bytes[i % bytes.len()] as f32 - 128.0) / 128.0).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_an_embedding_vector() {
		let json = serde_json::json!({ "embedding": [0.5, -1.5, 2.0] });
		let parsed = parse_embedding_response(json).expect("Well-formed response.");

		assert_eq!(parsed, vec![0.5, -1.5, 2.0]);
	}

	#[test]
	fn rejects_malformed_responses() {
		for json in [
			serde_json::json!({ "error": "model not found" }),
			serde_json::json!({ "embedding": ["a"] }),
		] {
			assert!(matches!(
				parse_embedding_response(json),
				Err(Error::InvalidResponse { .. })
			));
		}
	}

	#[test]
	fn fallback_is_deterministic_and_bounded() {
		let first = fallback_embedding("temperature in Global: count=3", 768);
		let second = fallback_embedding("temperature in Global: count=3", 768);
		let other = fallback_embedding("salinity in Global: count=3", 768);

		assert_eq!(first.len(), 768);
		assert_eq!(first, second);
		assert_ne!(first, other);
		assert!(first.iter().all(|value| (-1.0..1.0).contains(value)));
	}
}
