mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, Posters, Providers, Search, Service, WikidataProviderConfig, WikipediaProviderConfig,
};

use std::{fs, net::SocketAddr, path::Path};

pub const MAX_SEARCH_LIMIT: u32 = 50;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

/// Loads `path` when given, otherwise validates the built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
	match path {
		Some(path) => load(path),
		None => {
			let cfg = Config::default();

			validate(&cfg)?;

			Ok(cfg)
		},
	}
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.http_bind.parse::<SocketAddr>().is_err() {
		return Err(Error::Validation {
			message: "service.http_bind must be a valid socket address.".to_string(),
		});
	}

	let wikidata = &cfg.providers.wikidata;

	for (label, value) in [
		("providers.wikidata.api_base", &wikidata.api_base),
		("providers.wikidata.sparql_endpoint", &wikidata.sparql_endpoint),
		("providers.wikidata.user_agent", &wikidata.user_agent),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if wikidata.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.wikidata.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.wikipedia.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.wikipedia.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.limit == 0 {
		return Err(Error::Validation {
			message: "search.limit must be greater than zero.".to_string(),
		});
	}
	if cfg.search.limit > MAX_SEARCH_LIMIT {
		return Err(Error::Validation {
			message: format!("search.limit must be {MAX_SEARCH_LIMIT} or less."),
		});
	}
	if !matches!(cfg.search.rank_policy.as_str(), "soft" | "hard") {
		return Err(Error::Validation {
			message: "search.rank_policy must be one of soft or hard.".to_string(),
		});
	}
	if !matches!(cfg.search.release_parser.as_str(), "none" | "scene") {
		return Err(Error::Validation {
			message: "search.release_parser must be one of none or scene.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.service.http_bind = cfg.service.http_bind.trim().to_string();
	cfg.service.log_level = cfg.service.log_level.trim().to_string();
	cfg.search.rank_policy = cfg.search.rank_policy.trim().to_ascii_lowercase();
	cfg.search.release_parser = cfg.search.release_parser.trim().to_ascii_lowercase();

	let wikidata = &mut cfg.providers.wikidata;

	wikidata.api_base = wikidata.api_base.trim().to_string();
	wikidata.sparql_endpoint = wikidata.sparql_endpoint.trim().to_string();
	wikidata.user_agent = wikidata.user_agent.trim().to_string();
}
