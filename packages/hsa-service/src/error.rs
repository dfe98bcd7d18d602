pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("No directory connection: {message}")]
	NoConnection { message: String },
	#[error("Directory error: {message}")]
	Directory { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Configuration error: {message}")]
	Configuration { message: String },
}
impl From<hsa_directory::Error> for Error {
	fn from(err: hsa_directory::Error) -> Self {
		match err {
			hsa_directory::Error::NoConnection { message } => Self::NoConnection { message },
			hsa_directory::Error::Query { message } => Self::Directory { message },
			hsa_directory::Error::Pool { message } => Self::Configuration { message },
		}
	}
}
impl From<hsa_domain::RegistryError> for Error {
	fn from(err: hsa_domain::RegistryError) -> Self {
		Self::Configuration { message: err.to_string() }
	}
}
impl From<hsa_domain::FilterError> for Error {
	fn from(err: hsa_domain::FilterError) -> Self {
		Self::InvalidRequest { message: err.to_string() }
	}
}
