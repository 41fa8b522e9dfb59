pub mod batcher;
pub mod pipeline;
pub mod store;

mod error;

pub use batcher::RecordBatcher;
pub use error::{Error, Result};
pub use pipeline::{IngestReport, ingest_dataset};
pub use store::IngestStore;
