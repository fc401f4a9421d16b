//! Title normalization and candidate aggregation.
//!
//! Everything in this crate is pure and synchronous: noisy input goes through [`parser`], raw
//! knowledge-base rows go through [`merge`], and the merged candidates are shaped by [`project`]
//! and ordered by [`rank`].

pub mod image;
pub mod merge;
pub mod parser;
pub mod project;
pub mod rank;
pub mod script;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use image::{COMMONS_FILE_PATH, resolve_image, thumbnail_url};
pub use merge::{LabelSets, MergedCandidate, MergedCandidates, merge};
pub use parser::{
	NullReleaseParser, ReleaseName, ReleaseNameParser, SceneReleaseParser, TitleParser,
	parse_title,
};
pub use project::{
	MovieResult, MovieResultExtended, ProjectedResult, display_title, project, project_compact,
	project_extended,
};
pub use rank::{RankPolicy, RankYear, rank};

/// Simplified Chinese label tag.
pub const LANG_ZH_HANS: &str = "zh-hans";
/// Generic Chinese label tag.
pub const LANG_ZH: &str = "zh";
/// English label tag.
pub const LANG_EN: &str = "en";

pub type LangMap = BTreeMap<String, String>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuery {
	pub title: String,
	pub year: Option<i32>,
}

/// One flat row per entity and attribute combination.
///
/// An entity with several genres or countries shows up once per combination, so rows sharing an
/// `entity_id` are expected and folded together by [`merge`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAttributeRow {
	pub entity_id: String,
	pub title_by_lang: LangMap,
	pub year: Option<i32>,
	pub image_ref: Option<String>,
	pub genre_by_lang: Option<LangMap>,
	pub country_by_lang: Option<LangMap>,
	pub wiki_link_by_lang: Option<LangMap>,
}

/// Simplified Chinese first, then generic Chinese. Blank values count as missing.
pub fn preferred_chinese(labels: &LangMap) -> Option<&str> {
	[LANG_ZH_HANS, LANG_ZH].into_iter().find_map(|lang| non_blank(labels, lang))
}

pub fn english(labels: &LangMap) -> Option<&str> {
	non_blank(labels, LANG_EN)
}

fn non_blank<'a>(labels: &'a LangMap, lang: &str) -> Option<&'a str> {
	labels.get(lang).map(|value| value.trim()).filter(|value| !value.is_empty())
}
