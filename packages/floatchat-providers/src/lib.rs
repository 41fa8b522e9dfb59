pub mod embedding;
mod error;

pub use embedding::{Embedder, EmbeddingSource};
pub use error::{Error, Result};
