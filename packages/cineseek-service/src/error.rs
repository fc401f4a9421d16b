pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Upstream error: {message}")]
	Upstream { message: String },
	#[error("Invalid service configuration: {message}")]
	InvalidConfig { message: String },
	#[error("Provider setup failed: {message}")]
	ProviderSetup { message: String },
}
impl From<cineseek_providers::Error> for Error {
	fn from(err: cineseek_providers::Error) -> Self {
		Self::Upstream { message: err.to_string() }
	}
}
