use floatchat_storage::models::MeasurementRow;

use crate::{error::Result, store::IngestStore};

/// Buffers flattened rows and flushes them in fixed-size batches. A batch that
/// fails to persist aborts the run; partial progress survives because every
/// flush is idempotent at the store.
pub struct RecordBatcher<'a, S> {
	store: &'a S,
	capacity: usize,
	buffer: Vec<MeasurementRow>,
	inserted: u64,
	flushes: u32,
}
impl<'a, S> RecordBatcher<'a, S>
where
	S: IngestStore,
{
	pub fn new(store: &'a S, capacity: usize) -> Self {
		let capacity = capacity.max(1);

		Self { store, capacity, buffer: Vec::with_capacity(capacity), inserted: 0, flushes: 0 }
	}

	pub async fn push(&mut self, row: MeasurementRow) -> Result<()> {
		self.buffer.push(row);

		if self.buffer.len() >= self.capacity {
			self.flush().await?;
		}

		Ok(())
	}

	pub async fn flush(&mut self) -> Result<()> {
		if self.buffer.is_empty() {
			return Ok(());
		}

		let written = self.store.insert_measurements(&self.buffer).await?;

		self.inserted += written;
		self.flushes += 1;

		tracing::debug!(batch = self.buffer.len(), written, "Flushed measurement batch.");

		self.buffer.clear();

		Ok(())
	}

	/// Flushes the tail batch and reports `(rows written, flush count)`.
	pub async fn finish(mut self) -> Result<(u64, u32)> {
		self.flush().await?;

		Ok((self.inserted, self.flushes))
	}
}
