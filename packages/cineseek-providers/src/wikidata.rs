use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result, RetryPolicy};
use cineseek_config::WikidataProviderConfig;
use cineseek_domain::{LANG_EN, LANG_ZH, LANG_ZH_HANS, LangMap, RawAttributeRow};

const SPARQL_ACCEPT: &str = "application/sparql-results+json";
const JSON_ACCEPT: &str = "application/json";

/// Entity ids from `wbsearchentities`, in upstream relevance order.
pub async fn search_entity_ids(
	client: &Client,
	cfg: &WikidataProviderConfig,
	text: &str,
	lang: &str,
	limit: u32,
) -> Result<Vec<String>> {
	let limit = limit.to_string();
	let query = [
		("action", "wbsearchentities"),
		("format", "json"),
		("language", lang),
		("uselang", lang),
		("type", "item"),
		("search", text),
		("limit", limit.as_str()),
	];
	let json = crate::get_json(
		client,
		&cfg.api_base,
		&query,
		JSON_ACCEPT,
		RetryPolicy::from_config(cfg),
	)
	.await?;

	Ok(parse_search_response(&json))
}

/// Detail rows for film entities among `ids`. Non-film entities produce no rows.
pub async fn fetch_rows(
	client: &Client,
	cfg: &WikidataProviderConfig,
	ids: &[String],
) -> Result<Vec<RawAttributeRow>> {
	let Some(sparql) = build_details_query(ids) else { return Ok(Vec::new()) };
	let json = crate::get_json(
		client,
		&cfg.sparql_endpoint,
		&[("query", sparql.as_str())],
		SPARQL_ACCEPT,
		RetryPolicy::from_config(cfg),
	)
	.await?;

	parse_bindings(&json)
}

pub fn parse_search_response(json: &Value) -> Vec<String> {
	json.get("search")
		.and_then(Value::as_array)
		.map(|items| {
			items
				.iter()
				.filter_map(|item| item.get("id").and_then(Value::as_str))
				.filter(|id| is_entity_id(id))
				.map(str::to_string)
				.collect()
		})
		.unwrap_or_default()
}

/// SPARQL for the given ids, or `None` when no valid id remains.
pub fn build_details_query(ids: &[String]) -> Option<String> {
	let values = ids
		.iter()
		.map(|id| id.trim())
		.filter(|id| is_entity_id(id))
		.map(|id| format!("wd:{id}"))
		.collect::<Vec<_>>();

	if values.is_empty() {
		return None;
	}

	let values = values.join(" ");

	Some(format!(
		r#"PREFIX wd: <http://www.wikidata.org/entity/>
PREFIX wdt: <http://www.wikidata.org/prop/direct/>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX schema: <http://schema.org/>
SELECT ?item ?zhHansLabel ?zhLabel ?enLabel ?year ?image ?zhwiki ?enwiki
       ?genreZhHans ?genreZh ?genreEn ?countryZhHans ?countryZh ?countryEn WHERE {{
  VALUES ?item {{ {values} }}
  ?item wdt:P31/wdt:P279* wd:Q11424 .
  OPTIONAL {{ ?item wdt:P577 ?date . BIND(YEAR(?date) AS ?year) }}
  OPTIONAL {{ ?item wdt:P18 ?imageFile .
             BIND(CONCAT("https://commons.wikimedia.org/wiki/Special:FilePath/", ENCODE_FOR_URI(STR(?imageFile))) AS ?image) }}
  OPTIONAL {{ ?item wdt:P136 ?genre .
             OPTIONAL {{ ?genre rdfs:label ?genreZhHans FILTER (LANG(?genreZhHans) = "zh-hans") }}
             OPTIONAL {{ ?genre rdfs:label ?genreZh FILTER (LANG(?genreZh) = "zh") }}
             OPTIONAL {{ ?genre rdfs:label ?genreEn FILTER (LANG(?genreEn) = "en") }} }}
  OPTIONAL {{ ?item wdt:P495 ?country .
             OPTIONAL {{ ?country rdfs:label ?countryZhHans FILTER (LANG(?countryZhHans) = "zh-hans") }}
             OPTIONAL {{ ?country rdfs:label ?countryZh FILTER (LANG(?countryZh) = "zh") }}
             OPTIONAL {{ ?country rdfs:label ?countryEn FILTER (LANG(?countryEn) = "en") }} }}
  OPTIONAL {{ ?zhwikiArticle schema:about ?item ; schema:isPartOf <https://zh.wikipedia.org/> . BIND(STR(?zhwikiArticle) AS ?zhwiki) }}
  OPTIONAL {{ ?enwikiArticle schema:about ?item ; schema:isPartOf <https://en.wikipedia.org/> . BIND(STR(?enwikiArticle) AS ?enwiki) }}
  OPTIONAL {{ ?item rdfs:label ?zhHansLabel FILTER (LANG(?zhHansLabel) = "zh-hans") }}
  OPTIONAL {{ ?item rdfs:label ?zhLabel FILTER (LANG(?zhLabel) = "zh") }}
  OPTIONAL {{ ?item rdfs:label ?enLabel FILTER (LANG(?enLabel) = "en") }}
}}"#
	))
}

/// Converts SPARQL JSON bindings into rows. A payload without `results.bindings` is malformed.
pub fn parse_bindings(json: &Value) -> Result<Vec<RawAttributeRow>> {
	let bindings = json
		.get("results")
		.and_then(|results| results.get("bindings"))
		.and_then(Value::as_array)
		.ok_or_else(|| Error::InvalidResponse {
			message: "SPARQL response is missing results.bindings.".to_string(),
		})?;

	Ok(bindings.iter().filter_map(binding_to_row).collect())
}

fn binding_to_row(binding: &Value) -> Option<RawAttributeRow> {
	let entity_id = text(binding, "item")?.rsplit('/').next()?.to_string();

	if entity_id.is_empty() {
		return None;
	}

	Some(RawAttributeRow {
		entity_id,
		title_by_lang: lang_map(
			binding,
			&[(LANG_ZH_HANS, "zhHansLabel"), (LANG_ZH, "zhLabel"), (LANG_EN, "enLabel")],
		),
		year: text(binding, "year").and_then(|year| year.parse::<i32>().ok()),
		image_ref: text(binding, "image").map(str::to_string),
		genre_by_lang: non_empty(lang_map(
			binding,
			&[(LANG_ZH_HANS, "genreZhHans"), (LANG_ZH, "genreZh"), (LANG_EN, "genreEn")],
		)),
		country_by_lang: non_empty(lang_map(
			binding,
			&[(LANG_ZH_HANS, "countryZhHans"), (LANG_ZH, "countryZh"), (LANG_EN, "countryEn")],
		)),
		wiki_link_by_lang: non_empty(lang_map(
			binding,
			&[(LANG_ZH, "zhwiki"), (LANG_EN, "enwiki")],
		)),
	})
}

fn text<'a>(binding: &'a Value, key: &str) -> Option<&'a str> {
	binding
		.get(key)
		.and_then(|cell| cell.get("value"))
		.and_then(Value::as_str)
		.map(str::trim)
		.filter(|value| !value.is_empty())
}

fn lang_map(binding: &Value, keys: &[(&str, &str)]) -> LangMap {
	keys.iter()
		.filter_map(|(lang, key)| {
			text(binding, key).map(|value| (lang.to_string(), value.to_string()))
		})
		.collect()
}

fn non_empty(map: LangMap) -> Option<LangMap> {
	if map.is_empty() { None } else { Some(map) }
}

fn is_entity_id(id: &str) -> bool {
	id.len() > 1 && id.starts_with('Q') && id[1..].chars().all(|ch| ch.is_ascii_digit())
}
