use std::collections::BTreeMap;

use reqwest::Client;
use serde_json::Value;

use crate::RetryPolicy;
use cineseek_domain::{LANG_EN, LANG_ZH};

/// Article languages tried in order when looking for a poster.
pub const POSTER_LANGS: [&str; 2] = [LANG_ZH, LANG_EN];

/// Poster from the Wikipedia page summary, preferring the Chinese article.
///
/// Never fails: every lookup error is logged and treated as a miss.
pub async fn poster_from_links(
	client: &Client,
	links: &BTreeMap<String, String>,
) -> Option<String> {
	for lang in POSTER_LANGS {
		let Some(link) = links.get(lang) else { continue };

		if let Some(url) = fetch_summary_image(client, lang, link).await {
			return Some(url);
		}
	}

	None
}

pub async fn fetch_summary_image(
	client: &Client,
	lang: &str,
	article_url: &str,
) -> Option<String> {
	let title = article_title(article_url)?;
	let url = summary_url(lang, &title);

	match crate::get_json(client, &url, &[], "application/json", RetryPolicy::none()).await {
		Ok(json) => parse_summary_image(&json),
		Err(err) => {
			tracing::debug!(error = %err, %url, "Wikipedia summary lookup failed.");

			None
		},
	}
}

pub fn summary_url(lang: &str, title: &str) -> String {
	format!("https://{lang}.wikipedia.org/api/rest_v1/page/summary/{title}")
}

/// Trailing path segment of an article URL, kept percent-encoded.
pub fn article_title(article_url: &str) -> Option<String> {
	let path = article_url.split(['?', '#']).next().unwrap_or(article_url);
	let title = path.trim_end_matches('/').rsplit('/').next()?.trim();

	if title.is_empty() { None } else { Some(title.to_string()) }
}

/// `originalimage.source`, falling back to `thumbnail.source`.
pub fn parse_summary_image(json: &Value) -> Option<String> {
	["originalimage", "thumbnail"].into_iter().find_map(|key| {
		json.get(key)
			.and_then(|image| image.get("source"))
			.and_then(Value::as_str)
			.map(str::trim)
			.filter(|source| !source.is_empty())
			.map(str::to_string)
	})
}
