pub mod error;
pub mod search;

use std::{future::Future, pin::Pin, sync::Arc};

use reqwest::Client;

pub use error::{Error, Result};
pub use search::{SearchRequest, SearchResponse};
use cineseek_config::{Config, WikidataProviderConfig};
use cineseek_domain::{
	MergedCandidate, NullReleaseParser, RankPolicy, RawAttributeRow, ReleaseNameParser,
	SceneReleaseParser, TitleParser,
};
use cineseek_providers::{wikidata, wikipedia};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait QueryProvider
where
	Self: Send + Sync,
{
	fn search_entity_ids<'a>(
		&'a self,
		cfg: &'a WikidataProviderConfig,
		text: &'a str,
		lang: &'a str,
		limit: u32,
	) -> BoxFuture<'a, cineseek_providers::Result<Vec<String>>>;

	fn fetch_rows<'a>(
		&'a self,
		cfg: &'a WikidataProviderConfig,
		ids: &'a [String],
	) -> BoxFuture<'a, cineseek_providers::Result<Vec<RawAttributeRow>>>;
}

/// Late poster lookup. Misses and failures both come back as `None`.
pub trait PosterProvider
where
	Self: Send + Sync,
{
	fn poster_for<'a>(&'a self, candidate: &'a MergedCandidate) -> BoxFuture<'a, Option<String>>;
}

#[derive(Clone)]
pub struct Providers {
	pub query: Arc<dyn QueryProvider>,
	pub poster: Arc<dyn PosterProvider>,
}
impl Providers {
	pub fn new(query: Arc<dyn QueryProvider>, poster: Arc<dyn PosterProvider>) -> Self {
		Self { query, poster }
	}

	/// Wikidata for rows, Wikipedia page summaries for posters.
	pub fn wikimedia(cfg: &Config) -> Result<Self> {
		let wikidata = &cfg.providers.wikidata;
		let query_client =
			cineseek_providers::build_client(&wikidata.user_agent, wikidata.timeout_ms)
				.map_err(|err| Error::ProviderSetup { message: err.to_string() })?;
		let poster_client = cineseek_providers::build_client(
			&wikidata.user_agent,
			cfg.providers.wikipedia.timeout_ms,
		)
		.map_err(|err| Error::ProviderSetup { message: err.to_string() })?;

		Ok(Self::new(
			Arc::new(WikidataQuery { client: query_client }),
			Arc::new(WikipediaPosters { client: poster_client }),
		))
	}
}

struct WikidataQuery {
	client: Client,
}
impl QueryProvider for WikidataQuery {
	fn search_entity_ids<'a>(
		&'a self,
		cfg: &'a WikidataProviderConfig,
		text: &'a str,
		lang: &'a str,
		limit: u32,
	) -> BoxFuture<'a, cineseek_providers::Result<Vec<String>>> {
		Box::pin(wikidata::search_entity_ids(&self.client, cfg, text, lang, limit))
	}

	fn fetch_rows<'a>(
		&'a self,
		cfg: &'a WikidataProviderConfig,
		ids: &'a [String],
	) -> BoxFuture<'a, cineseek_providers::Result<Vec<RawAttributeRow>>> {
		Box::pin(wikidata::fetch_rows(&self.client, cfg, ids))
	}
}

struct WikipediaPosters {
	client: Client,
}
impl PosterProvider for WikipediaPosters {
	fn poster_for<'a>(&'a self, candidate: &'a MergedCandidate) -> BoxFuture<'a, Option<String>> {
		Box::pin(wikipedia::poster_from_links(&self.client, &candidate.wiki_links))
	}
}

pub struct CineSeekService {
	pub cfg: Config,
	pub providers: Providers,
	pub(crate) parser: TitleParser,
	pub(crate) rank_policy: RankPolicy,
}
impl CineSeekService {
	pub fn new(cfg: Config) -> Result<Self> {
		let providers = Providers::wikimedia(&cfg)?;

		Self::with_providers(cfg, providers)
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Result<Self> {
		let parser = TitleParser::new(release_parser(&cfg.search.release_parser)?);
		let rank_policy = cfg
			.search
			.rank_policy
			.parse::<RankPolicy>()
			.map_err(|message| Error::InvalidConfig { message })?;

		Ok(Self { cfg, providers, parser, rank_policy })
	}

	pub fn rank_policy(&self) -> RankPolicy {
		self.rank_policy
	}
}

fn release_parser(name: &str) -> Result<Box<dyn ReleaseNameParser>> {
	match name.trim() {
		"none" => Ok(Box::new(NullReleaseParser)),
		"scene" => Ok(Box::new(SceneReleaseParser)),
		other => Err(Error::InvalidConfig {
			message: format!("Unknown release parser {other:?}; expected none or scene."),
		}),
	}
}
