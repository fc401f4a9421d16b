use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{LangMap, RawAttributeRow, english, image, preferred_chinese};

/// Two parallel label tracks for one multi-valued attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelSets {
	/// Simplified-Chinese-first labels.
	pub preferred: BTreeSet<String>,
	/// English labels.
	pub fallback: BTreeSet<String>,
}
impl LabelSets {
	fn absorb(mut self, labels: Option<&LangMap>) -> Self {
		let Some(labels) = labels else { return self };

		if let Some(label) = preferred_chinese(labels) {
			self.preferred.insert(label.to_string());
		}
		if let Some(label) = english(labels) {
			self.fallback.insert(label.to_string());
		}

		self
	}

	pub fn is_empty(&self) -> bool {
		self.preferred.is_empty() && self.fallback.is_empty()
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergedCandidate {
	pub entity_id: String,
	pub title_cn: Option<String>,
	pub title_en: Option<String>,
	pub year: Option<i32>,
	pub genres: LabelSets,
	pub countries: LabelSets,
	pub poster_url: Option<String>,
	pub wiki_links: BTreeMap<String, String>,
}
impl MergedCandidate {
	fn from_row(row: &RawAttributeRow) -> Self {
		Self {
			entity_id: row.entity_id.trim().to_string(),
			title_cn: preferred_chinese(&row.title_by_lang).map(str::to_string),
			title_en: english(&row.title_by_lang).map(str::to_string),
			year: None,
			genres: LabelSets::default(),
			countries: LabelSets::default(),
			poster_url: None,
			wiki_links: BTreeMap::new(),
		}
	}

	fn absorb(mut self, row: &RawAttributeRow) -> Self {
		if self.year.is_none() {
			self.year = row.year;
		}
		if self.poster_url.is_none() {
			self.poster_url = image::resolve_image(row.image_ref.as_deref());
		}
		if let Some(links) = row.wiki_link_by_lang.as_ref() {
			for (lang, link) in links {
				if link.trim().is_empty() {
					continue;
				}

				self.wiki_links.entry(lang.clone()).or_insert_with(|| link.clone());
			}
		}

		self.genres = self.genres.absorb(row.genre_by_lang.as_ref());
		self.countries = self.countries.absorb(row.country_by_lang.as_ref());

		self
	}

	/// Late poster fill. Keeps an existing poster unless `force` is set.
	pub fn with_poster_url(mut self, url: Option<String>, force: bool) -> Self {
		if let Some(url) = url.filter(|url| !url.trim().is_empty())
			&& (force || self.poster_url.is_none())
		{
			self.poster_url = Some(url);
		}

		self
	}

	pub fn wiki_link(&self, lang: &str) -> Option<&str> {
		self.wiki_links.get(lang).map(String::as_str)
	}
}

/// Merged candidates keyed by entity id, iterated in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergedCandidates {
	order: Vec<String>,
	by_id: HashMap<String, MergedCandidate>,
}
impl MergedCandidates {
	pub fn absorb(mut self, row: &RawAttributeRow) -> Self {
		let entity_id = row.entity_id.trim();

		if entity_id.is_empty() {
			return self;
		}

		let candidate = match self.by_id.remove(entity_id) {
			Some(existing) => existing,
			None => {
				self.order.push(entity_id.to_string());

				MergedCandidate::from_row(row)
			},
		};

		self.by_id.insert(entity_id.to_string(), candidate.absorb(row));

		self
	}

	pub fn get(&self, entity_id: &str) -> Option<&MergedCandidate> {
		self.by_id.get(entity_id)
	}

	pub fn ids(&self) -> &[String] {
		&self.order
	}

	pub fn len(&self) -> usize {
		self.order.len()
	}

	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &MergedCandidate> {
		self.order.iter().filter_map(|id| self.by_id.get(id))
	}

	pub fn into_vec(mut self) -> Vec<MergedCandidate> {
		self.order.iter().filter_map(|id| self.by_id.remove(id)).collect()
	}
}

/// Folds rows into one candidate per entity, in arrival order.
pub fn merge(rows: &[RawAttributeRow]) -> MergedCandidates {
	rows.iter().fold(MergedCandidates::default(), MergedCandidates::absorb)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn row(entity_id: &str) -> RawAttributeRow {
		RawAttributeRow { entity_id: entity_id.to_string(), ..Default::default() }
	}

	fn langs(pairs: &[(&str, &str)]) -> LangMap {
		pairs.iter().map(|(lang, value)| (lang.to_string(), value.to_string())).collect()
	}

	#[test]
	fn skips_rows_without_entity_id() {
		let merged = merge(&[row(""), row("  "), row("Q1")]);

		assert_eq!(merged.ids(), ["Q1".to_string()]);
	}

	#[test]
	fn stored_id_matches_trimmed_key() {
		let merged = merge(&[row(" Q1 "), row("Q1")]);
		let candidate = merged.get("Q1").expect("missing candidate");

		assert_eq!(merged.len(), 1);
		assert_eq!(candidate.entity_id, "Q1");
	}

	#[test]
	fn first_year_and_poster_win() {
		let rows = vec![
			RawAttributeRow { year: None, ..row("Q1") },
			RawAttributeRow { year: Some(2019), image_ref: Some("A.jpg".to_string()), ..row("Q1") },
			RawAttributeRow { year: Some(2020), image_ref: Some("B.jpg".to_string()), ..row("Q1") },
		];
		let merged = merge(&rows);
		let candidate = merged.get("Q1").expect("missing candidate");

		assert_eq!(candidate.year, Some(2019));
		assert_eq!(
			candidate.poster_url.as_deref(),
			Some("https://commons.wikimedia.org/wiki/Special:FilePath/A.jpg")
		);
	}

	#[test]
	fn wiki_links_keep_first_per_language() {
		let rows = vec![
			RawAttributeRow {
				wiki_link_by_lang: Some(langs(&[("zh", "https://zh.wikipedia.org/wiki/A")])),
				..row("Q1")
			},
			RawAttributeRow {
				wiki_link_by_lang: Some(langs(&[
					("zh", "https://zh.wikipedia.org/wiki/B"),
					("en", "https://en.wikipedia.org/wiki/A"),
				])),
				..row("Q1")
			},
		];
		let merged = merge(&rows);
		let candidate = merged.get("Q1").expect("missing candidate");

		assert_eq!(candidate.wiki_link("zh"), Some("https://zh.wikipedia.org/wiki/A"));
		assert_eq!(candidate.wiki_link("en"), Some("https://en.wikipedia.org/wiki/A"));
	}

	#[test]
	fn forced_poster_replaces_existing_one() {
		let candidate = merge(&[RawAttributeRow {
			image_ref: Some("A.jpg".to_string()),
			..row("Q1")
		}])
		.into_vec()
		.remove(0);
		let kept = candidate.clone().with_poster_url(Some("https://x/y.jpg".to_string()), false);
		let forced = candidate.with_poster_url(Some("https://x/y.jpg".to_string()), true);

		assert_eq!(
			kept.poster_url.as_deref(),
			Some("https://commons.wikimedia.org/wiki/Special:FilePath/A.jpg")
		);
		assert_eq!(forced.poster_url.as_deref(), Some("https://x/y.jpg"));
	}
}
