use floatchat_config::EmbeddingProviderConfig;
use floatchat_providers::{Embedder, EmbeddingSource};

fn provider_config(enabled: bool, api_base: &str) -> EmbeddingProviderConfig {
	EmbeddingProviderConfig {
		enabled,
		api_base: api_base.to_string(),
		path: "/api/embeddings".to_string(),
		model: "nomic-embed-text".to_string(),
		dimensions: 8,
		timeout_ms: 500,
	}
}

#[test]
fn disabled_providers_carry_only_the_fallback_strategy() {
	let embedder = Embedder::from_config(&provider_config(false, "http://127.0.0.1:11434"))
		.expect("Fallback-only embedder.");

	assert_eq!(embedder.strategy_labels(), vec!["fallback"]);
	assert_eq!(embedder.dimensions(), 8);
}

#[test]
fn enabled_providers_try_the_remote_first() {
	let embedder = Embedder::from_config(&provider_config(true, "http://127.0.0.1:11434"))
		.expect("Remote plus fallback.");

	assert_eq!(embedder.strategy_labels(), vec!["remote", "fallback"]);
}

#[tokio::test]
async fn unreachable_remotes_degrade_to_the_fallback() {
	// Nothing listens on the discard port; the request fails fast.
	let embedder = Embedder::from_config(&provider_config(true, "http://127.0.0.1:9"))
		.expect("Remote plus fallback.");
	let (vector, source) = embedder.embed("temperature in Global: count=3").await;

	assert_eq!(source, EmbeddingSource::Fallback);
	assert_eq!(vector.len(), 8);
}

#[tokio::test]
async fn fallback_vectors_are_stable_across_runs() {
	let embedder =
		Embedder::from_config(&provider_config(false, "")).expect("Fallback-only embedder.");
	let (first, _) = embedder.embed("salinity in Indian Ocean: count=10").await;
	let (second, _) = embedder.embed("salinity in Indian Ocean: count=10").await;

	assert_eq!(first, second);
}
