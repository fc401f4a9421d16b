//! In-memory providers and fixture rows for exercising the search pipeline offline.

use std::{
	collections::BTreeMap,
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
};

use cineseek_config::{Config, WikidataProviderConfig};
use cineseek_domain::{LANG_EN, LANG_ZH, LANG_ZH_HANS, LangMap, MergedCandidate, RawAttributeRow};
use cineseek_service::{BoxFuture, PosterProvider, Providers, QueryProvider};

pub const WANDERING_EARTH_ID: &str = "Q24869728";
pub const WANDERING_EARTH_2_ID: &str = "Q112053004";
pub const INFERNAL_AFFAIRS_ID: &str = "Q696041";

/// Default config with posters resolved verbatim.
pub fn test_config() -> Config {
	let mut cfg = Config::default();

	cfg.posters.width = 0;

	cfg
}

pub fn labels(pairs: &[(&str, &str)]) -> LangMap {
	pairs.iter().map(|(lang, value)| (lang.to_string(), value.to_string())).collect()
}

/// Two rows per genre for the first film, one row for its sequel.
pub fn wandering_earth_rows() -> Vec<RawAttributeRow> {
	let titles = labels(&[(LANG_ZH_HANS, "流浪地球"), (LANG_EN, "The Wandering Earth")]);
	let countries = labels(&[(LANG_ZH_HANS, "中国大陆"), (LANG_EN, "China")]);
	let links = labels(&[
		(LANG_ZH, "https://zh.wikipedia.org/wiki/%E6%B5%81%E6%B5%AA%E5%9C%B0%E7%90%83"),
		(LANG_EN, "https://en.wikipedia.org/wiki/The_Wandering_Earth"),
	]);

	vec![
		RawAttributeRow {
			entity_id: WANDERING_EARTH_ID.to_string(),
			title_by_lang: titles.clone(),
			year: Some(2019),
			image_ref: Some("The Wandering Earth poster.jpg".to_string()),
			genre_by_lang: Some(labels(&[
				(LANG_ZH_HANS, "科幻电影"),
				(LANG_EN, "science fiction film"),
			])),
			country_by_lang: Some(countries.clone()),
			wiki_link_by_lang: Some(links.clone()),
		},
		RawAttributeRow {
			entity_id: WANDERING_EARTH_ID.to_string(),
			title_by_lang: titles,
			year: Some(2019),
			image_ref: None,
			genre_by_lang: Some(labels(&[(LANG_ZH, "災難片"), (LANG_EN, "disaster film")])),
			country_by_lang: Some(countries.clone()),
			wiki_link_by_lang: Some(links),
		},
		RawAttributeRow {
			entity_id: WANDERING_EARTH_2_ID.to_string(),
			title_by_lang: labels(&[(LANG_ZH_HANS, "流浪地球2"), (LANG_EN, "The Wandering Earth 2")]),
			year: Some(2023),
			image_ref: None,
			genre_by_lang: Some(labels(&[(LANG_ZH_HANS, "科幻电影")])),
			country_by_lang: Some(countries),
			wiki_link_by_lang: Some(labels(&[(
				LANG_EN,
				"https://en.wikipedia.org/wiki/The_Wandering_Earth_2",
			)])),
		},
	]
}

pub fn infernal_affairs_rows() -> Vec<RawAttributeRow> {
	vec![RawAttributeRow {
		entity_id: INFERNAL_AFFAIRS_ID.to_string(),
		title_by_lang: labels(&[(LANG_ZH, "無間道"), (LANG_EN, "Infernal Affairs")]),
		year: Some(2002),
		image_ref: None,
		genre_by_lang: Some(labels(&[(LANG_ZH, "犯罪片"), (LANG_EN, "crime film")])),
		country_by_lang: Some(labels(&[(LANG_ZH, "香港"), (LANG_EN, "Hong Kong")])),
		wiki_link_by_lang: None,
	}]
}

/// Canned entity search and detail rows.
#[derive(Default)]
pub struct FakeQuery {
	ids_by_lang: BTreeMap<String, Vec<String>>,
	rows: Vec<RawAttributeRow>,
	fail: bool,
	searches: Mutex<Vec<(String, String)>>,
	fetched: Mutex<Vec<Vec<String>>>,
}
impl FakeQuery {
	pub fn new(rows: Vec<RawAttributeRow>) -> Self {
		Self { rows, ..Self::default() }
	}

	/// Every call fails as an upstream outage would.
	pub fn failing() -> Self {
		Self { fail: true, ..Self::default() }
	}

	pub fn with_ids(mut self, lang: &str, ids: &[&str]) -> Self {
		self.ids_by_lang.insert(lang.to_string(), ids.iter().map(|id| id.to_string()).collect());

		self
	}

	/// `(lang, text)` pairs seen by entity search.
	pub fn searches(&self) -> Vec<(String, String)> {
		self.searches.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	/// Id lists passed to detail fetches.
	pub fn fetched(&self) -> Vec<Vec<String>> {
		self.fetched.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	fn outage() -> cineseek_providers::Error {
		cineseek_providers::Error::InvalidResponse { message: "upstream unavailable".to_string() }
	}
}
impl QueryProvider for FakeQuery {
	fn search_entity_ids<'a>(
		&'a self,
		_cfg: &'a WikidataProviderConfig,
		text: &'a str,
		lang: &'a str,
		limit: u32,
	) -> BoxFuture<'a, cineseek_providers::Result<Vec<String>>> {
		Box::pin(async move {
			self.searches
				.lock()
				.unwrap_or_else(|err| err.into_inner())
				.push((lang.to_string(), text.to_string()));

			if self.fail {
				return Err(Self::outage());
			}

			Ok(self
				.ids_by_lang
				.get(lang)
				.map(|ids| ids.iter().take(limit as usize).cloned().collect())
				.unwrap_or_default())
		})
	}

	fn fetch_rows<'a>(
		&'a self,
		_cfg: &'a WikidataProviderConfig,
		ids: &'a [String],
	) -> BoxFuture<'a, cineseek_providers::Result<Vec<RawAttributeRow>>> {
		Box::pin(async move {
			self.fetched.lock().unwrap_or_else(|err| err.into_inner()).push(ids.to_vec());

			if self.fail {
				return Err(Self::outage());
			}

			Ok(self.rows.iter().filter(|row| ids.contains(&row.entity_id)).cloned().collect())
		})
	}
}

/// Posters keyed by entity id, with a call counter.
#[derive(Default)]
pub struct FakePosters {
	by_id: BTreeMap<String, String>,
	calls: AtomicUsize,
}
impl FakePosters {
	pub fn with_poster(mut self, entity_id: &str, url: &str) -> Self {
		self.by_id.insert(entity_id.to_string(), url.to_string());

		self
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}
impl PosterProvider for FakePosters {
	fn poster_for<'a>(&'a self, candidate: &'a MergedCandidate) -> BoxFuture<'a, Option<String>> {
		Box::pin(async move {
			self.calls.fetch_add(1, Ordering::SeqCst);

			self.by_id.get(&candidate.entity_id).cloned()
		})
	}
}

pub fn providers(query: Arc<FakeQuery>, posters: Arc<FakePosters>) -> Providers {
	Providers::new(query, posters)
}
