use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{LabelSets, MergedCandidate, script};

const LIST_JOINER: &str = " / ";

/// Compact result shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieResult {
	pub fullname: String,
	pub name: String,
	#[serde(rename = "originalName")]
	pub original_name: String,
	/// Zero when the release year is unknown.
	pub year: i32,
	pub genre: String,
	pub country: String,
	pub alias: String,
}

/// Extended result shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieResultExtended {
	pub wikidata_id: Option<String>,
	pub title_cn: Option<String>,
	pub title_en: Option<String>,
	pub year: Option<i32>,
	pub display_title: String,
	pub genres: Vec<String>,
	pub countries: Vec<String>,
	pub poster_url: Option<String>,
	pub wikipedia_links: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProjectedResult {
	Compact(MovieResult),
	Extended(MovieResultExtended),
}

pub fn project(candidate: &MergedCandidate, extended: bool) -> ProjectedResult {
	if extended {
		ProjectedResult::Extended(project_extended(candidate))
	} else {
		ProjectedResult::Compact(project_compact(candidate))
	}
}

pub fn project_compact(candidate: &MergedCandidate) -> MovieResult {
	let title_cn = simplified_title(candidate);
	let title_en = candidate.title_en.clone();
	let fullname = match (title_cn.as_deref(), title_en.as_deref()) {
		(Some(cn), Some(en)) if cn != en => format!("{cn} {en}"),
		(Some(cn), _) => cn.to_string(),
		(None, Some(en)) => en.to_string(),
		(None, None) => String::new(),
	};

	MovieResult {
		fullname,
		name: title_cn.unwrap_or_default(),
		original_name: title_en.unwrap_or_default(),
		year: candidate.year.unwrap_or(0),
		genre: select_labels(&candidate.genres).into_iter().collect::<Vec<_>>().join(LIST_JOINER),
		country: select_labels(&candidate.countries)
			.into_iter()
			.collect::<Vec<_>>()
			.join(LIST_JOINER),
		alias: String::new(),
	}
}

pub fn project_extended(candidate: &MergedCandidate) -> MovieResultExtended {
	let title_cn = simplified_title(candidate);
	let title_en = candidate.title_en.clone();

	MovieResultExtended {
		wikidata_id: Some(candidate.entity_id.clone()),
		display_title: display_title(title_cn.as_deref(), title_en.as_deref(), candidate.year),
		title_cn,
		title_en,
		year: candidate.year,
		genres: select_labels(&candidate.genres).into_iter().collect(),
		countries: select_labels(&candidate.countries).into_iter().collect(),
		poster_url: candidate.poster_url.clone(),
		wikipedia_links: candidate.wiki_links.clone(),
	}
}

/// `流浪地球 The Wandering Earth (2019)`, falling back to whichever title exists.
pub fn display_title(title_cn: Option<&str>, title_en: Option<&str>, year: Option<i32>) -> String {
	let left = title_cn.or(title_en).unwrap_or("");
	let right = title_cn.and(title_en);
	let display = match right {
		Some(right) if !left.is_empty() && left != right => format!("{left} {right}"),
		_ if !left.is_empty() => left.to_string(),
		_ => right.unwrap_or("").to_string(),
	};

	match year {
		Some(year) if display.is_empty() => format!("({year})"),
		Some(year) => format!("{display} ({year})"),
		None => display,
	}
}

fn simplified_title(candidate: &MergedCandidate) -> Option<String> {
	candidate.title_cn.as_deref().map(script::to_simplified)
}

// Chinese labels when any exist, English otherwise. Sorted, deduplicated after conversion.
fn select_labels(labels: &LabelSets) -> BTreeSet<String> {
	if labels.preferred.is_empty() {
		return labels.fallback.clone();
	}

	labels.preferred.iter().map(|label| script::to_simplified(label)).collect()
}
