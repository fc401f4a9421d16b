use serde::{Deserialize, Serialize};

use crate::{CineSeekService, Error, Result};
use cineseek_config::MAX_SEARCH_LIMIT;
use cineseek_domain::{
	LANG_EN, LANG_ZH, MergedCandidate, ParsedQuery, ProjectedResult, RankPolicy, merge, project,
	rank, thumbnail_url,
};

#[derive(Clone, Debug, Deserialize)]
pub struct SearchRequest {
	/// Free text or a release file name.
	pub query: String,
	#[serde(default)]
	pub extended: bool,
	#[serde(default)]
	pub limit: Option<u32>,
	#[serde(default)]
	pub rank_policy: Option<RankPolicy>,
}
impl SearchRequest {
	pub fn new(query: impl Into<String>) -> Self {
		Self { query: query.into(), extended: false, limit: None, rank_policy: None }
	}
}

#[derive(Clone, Debug, Serialize)]
pub struct SearchResponse {
	pub query: ParsedQuery,
	pub results: Vec<ProjectedResult>,
}

impl CineSeekService {
	pub fn parse(&self, raw: &str) -> ParsedQuery {
		self.parser.parse(raw)
	}

	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		if req.query.trim().is_empty() {
			return Err(Error::InvalidRequest { message: "query must be non-empty.".to_string() });
		}

		let parsed = self.parse(&req.query);

		tracing::debug!(title = %parsed.title, year = ?parsed.year, "Parsed search query.");

		let limit = req.limit.unwrap_or(self.cfg.search.limit).clamp(1, MAX_SEARCH_LIMIT);
		let candidates = self.candidates(&parsed, limit).await?;
		let projected = candidates
			.iter()
			.map(|candidate| project(candidate, req.extended))
			.collect::<Vec<_>>();
		let policy = req.rank_policy.unwrap_or(self.rank_policy);
		let results = rank(projected, parsed.year, policy);

		tracing::info!(
			candidates = candidates.len(),
			results = results.len(),
			policy = %policy,
			"Search completed."
		);

		Ok(SearchResponse { query: parsed, results })
	}

	/// Merged candidates for a parsed query, posters filled, in upstream order.
	pub async fn candidates(
		&self,
		parsed: &ParsedQuery,
		limit: u32,
	) -> Result<Vec<MergedCandidate>> {
		let cfg = &self.cfg.providers.wikidata;
		let query = self.providers.query.as_ref();
		let (zh_ids, en_ids) = tokio::join!(
			query.search_entity_ids(cfg, &parsed.title, LANG_ZH, limit),
			query.search_entity_ids(cfg, &parsed.title, LANG_EN, limit),
		);
		let ids = dedup_ids(zh_ids?.into_iter().chain(en_ids?), limit as usize);

		if ids.is_empty() {
			return Ok(Vec::new());
		}

		let rows = query.fetch_rows(cfg, &ids).await?;
		let merged = merge(&rows).into_vec();

		Ok(self.fill_posters(merged).await)
	}

	async fn fill_posters(&self, candidates: Vec<MergedCandidate>) -> Vec<MergedCandidate> {
		let posters = &self.cfg.posters;
		let mut out = Vec::with_capacity(candidates.len());

		for candidate in candidates {
			let mut candidate = candidate;

			if posters.fill_from_wikipedia && (posters.force_refresh || candidate.poster_url.is_none())
			{
				let url = self.providers.poster.poster_for(&candidate).await;

				if url.is_none() {
					tracing::debug!(entity_id = %candidate.entity_id, "No Wikipedia poster found.");
				}

				candidate = candidate.with_poster_url(url, posters.force_refresh);
			}

			candidate.poster_url =
				candidate.poster_url.map(|url| thumbnail_url(&url, posters.width));

			out.push(candidate);
		}

		out
	}
}

// Chinese ids first, then English, first occurrence wins.
fn dedup_ids(ids: impl Iterator<Item = String>, limit: usize) -> Vec<String> {
	let mut out: Vec<String> = Vec::new();

	for id in ids {
		if out.len() >= limit {
			break;
		}
		if !out.contains(&id) {
			out.push(id);
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dedup_keeps_first_occurrence_and_limit() {
		let ids = ["Q1", "Q2", "Q1", "Q3", "Q4"].into_iter().map(str::to_string);

		assert_eq!(dedup_ids(ids, 3), vec!["Q1", "Q2", "Q3"]);
	}

	#[test]
	fn request_defaults_to_compact() {
		let req: SearchRequest =
			serde_json::from_str(r#"{"query":"Heat"}"#).expect("request must parse");

		assert!(!req.extended);
		assert_eq!(req.limit, None);
		assert_eq!(req.rank_policy, None);
	}
}
