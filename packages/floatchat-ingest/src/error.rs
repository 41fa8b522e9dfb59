use uuid::Uuid;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Locate(#[from] floatchat_domain::LocateError),
	#[error(transparent)]
	NetCdf(#[from] floatchat_netcdf::Error),
	#[error("Persistence failed: {0}")]
	Persistence(String),
	#[error("Dataset {0} was already claimed by another worker.")]
	AlreadyClaimed(Uuid),
}
impl From<floatchat_storage::Error> for Error {
	fn from(err: floatchat_storage::Error) -> Self {
		Self::Persistence(err.to_string())
	}
}
