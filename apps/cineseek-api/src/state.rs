use std::sync::Arc;

use cineseek_service::CineSeekService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<CineSeekService>,
}
impl AppState {
	pub fn new(config: cineseek_config::Config) -> color_eyre::Result<Self> {
		let service = CineSeekService::new(config)?;

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: CineSeekService) -> Self {
		Self { service: Arc::new(service) }
	}
}
