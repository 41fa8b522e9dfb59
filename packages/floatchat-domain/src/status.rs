#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DatasetStatus {
	Uploaded,
	Processing,
	Completed,
	Failed,
}
impl DatasetStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Uploaded => "uploaded",
			Self::Processing => "processing",
			Self::Completed => "completed",
			Self::Failed => "failed",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"uploaded" => Some(Self::Uploaded),
			"processing" => Some(Self::Processing),
			"completed" => Some(Self::Completed),
			"failed" => Some(Self::Failed),
			_ => None,
		}
	}

	/// Lifecycle transitions owned by the ingestion pipeline. `Completed` and
	/// `Failed` are terminal.
	pub fn can_transition(&self, next: Self) -> bool {
		matches!(
			(self, next),
			(Self::Uploaded, Self::Processing)
				| (Self::Processing, Self::Completed)
				| (Self::Processing, Self::Failed)
		)
	}

	pub fn is_terminal(&self) -> bool {
		matches!(self, Self::Completed | Self::Failed)
	}
}
impl std::fmt::Display for DatasetStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
