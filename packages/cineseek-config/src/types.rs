use serde::Deserialize;

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
	pub service: Service,
	pub providers: Providers,
	pub search: Search,
	pub posters: Posters,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}
impl Default for Service {
	fn default() -> Self {
		Self { http_bind: "127.0.0.1:8000".to_string(), log_level: "info".to_string() }
	}
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default)]
pub struct Providers {
	pub wikidata: WikidataProviderConfig,
	pub wikipedia: WikipediaProviderConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WikidataProviderConfig {
	/// Entity search endpoint (`wbsearchentities`).
	pub api_base: String,
	pub sparql_endpoint: String,
	pub user_agent: String,
	pub timeout_ms: u64,
	/// Extra attempts after the first failed request.
	pub retries: u32,
	/// Linear backoff step; attempt `n` waits `n * retry_backoff_ms`.
	pub retry_backoff_ms: u64,
}
impl Default for WikidataProviderConfig {
	fn default() -> Self {
		Self {
			api_base: "https://www.wikidata.org/w/api.php".to_string(),
			sparql_endpoint: "https://query.wikidata.org/sparql".to_string(),
			user_agent: "CineSeek/0.1 (+https://www.wikidata.org/)".to_string(),
			timeout_ms: 15_000,
			retries: 2,
			retry_backoff_ms: 500,
		}
	}
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WikipediaProviderConfig {
	pub timeout_ms: u64,
}
impl Default for WikipediaProviderConfig {
	fn default() -> Self {
		Self { timeout_ms: 15_000 }
	}
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Search {
	pub limit: u32,
	/// One of `soft` or `hard`.
	pub rank_policy: String,
	/// One of `none` or `scene`.
	pub release_parser: String,
}
impl Default for Search {
	fn default() -> Self {
		Self { limit: 5, rank_policy: "soft".to_string(), release_parser: "scene".to_string() }
	}
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Posters {
	pub fill_from_wikipedia: bool,
	pub force_refresh: bool,
	/// Width hint for Commons file-path URLs. Zero disables it.
	pub width: u32,
}
impl Default for Posters {
	fn default() -> Self {
		Self { fill_from_wikipedia: true, force_refresh: false, width: 700 }
	}
}
