pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to open {path:?} as a NetCDF dataset.")]
	UnsupportedFileFormat { path: std::path::PathBuf, source: netcdf::Error },
	#[error(transparent)]
	NetCdf(#[from] netcdf::Error),
	#[error("Variable {name} has unsupported rank {rank}.")]
	UnsupportedShape { name: String, rank: usize },
}
