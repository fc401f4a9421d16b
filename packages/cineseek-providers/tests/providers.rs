use cineseek_config::WikidataProviderConfig;
use cineseek_providers::{Error, build_client, wikidata, wikipedia};

fn sparql_payload() -> serde_json::Value {
	serde_json::json!({
		"head": { "vars": ["item", "zhLabel", "enLabel", "year", "genreZh", "genreEn"] },
		"results": {
			"bindings": [
				{
					"item": { "type": "uri", "value": "http://www.wikidata.org/entity/Q24869728" },
					"zhHansLabel": { "type": "literal", "value": "流浪地球", "xml:lang": "zh-hans" },
					"enLabel": { "type": "literal", "value": "The Wandering Earth", "xml:lang": "en" },
					"year": { "type": "literal", "value": "2019" },
					"image": {
						"type": "literal",
						"value": "https://commons.wikimedia.org/wiki/Special:FilePath/Poster.jpg"
					},
					"genreZh": { "type": "literal", "value": "科幻電影", "xml:lang": "zh" },
					"genreEn": { "type": "literal", "value": "science fiction film", "xml:lang": "en" },
					"enwiki": {
						"type": "literal",
						"value": "https://en.wikipedia.org/wiki/The_Wandering_Earth"
					}
				},
				{
					"item": { "type": "uri", "value": "http://www.wikidata.org/entity/Q24869728" },
					"year": { "type": "literal", "value": "not-a-year" },
					"countryEn": { "type": "literal", "value": "China", "xml:lang": "en" }
				},
				{
					"zhLabel": { "type": "literal", "value": "无主条目" }
				}
			]
		}
	})
}

#[test]
fn parses_search_ids_in_order() {
	let json = serde_json::json!({
		"search": [
			{ "id": "Q24869728", "label": "The Wandering Earth" },
			{ "label": "missing id" },
			{ "id": "P31" },
			{ "id": "Q1" }
		]
	});

	assert_eq!(wikidata::parse_search_response(&json), vec!["Q24869728", "Q1"]);
	assert!(wikidata::parse_search_response(&serde_json::json!({})).is_empty());
}

#[test]
fn parses_sparql_bindings_into_rows() {
	let rows = wikidata::parse_bindings(&sparql_payload()).expect("bindings must parse");

	assert_eq!(rows.len(), 2);

	let first = &rows[0];

	assert_eq!(first.entity_id, "Q24869728");
	assert_eq!(first.title_by_lang.get("zh-hans").map(String::as_str), Some("流浪地球"));
	assert_eq!(first.title_by_lang.get("en").map(String::as_str), Some("The Wandering Earth"));
	assert_eq!(first.year, Some(2019));
	assert_eq!(
		first.genre_by_lang.as_ref().and_then(|map| map.get("zh")).map(String::as_str),
		Some("科幻電影")
	);
	assert!(first.country_by_lang.is_none());
	assert_eq!(
		first.wiki_link_by_lang.as_ref().and_then(|map| map.get("en")).map(String::as_str),
		Some("https://en.wikipedia.org/wiki/The_Wandering_Earth")
	);

	let second = &rows[1];

	assert_eq!(second.year, None);
	assert!(second.title_by_lang.is_empty());
	assert!(second.genre_by_lang.is_none());
	assert_eq!(
		second.country_by_lang.as_ref().and_then(|map| map.get("en")).map(String::as_str),
		Some("China")
	);
}

#[test]
fn empty_bindings_are_no_results() {
	let json = serde_json::json!({ "results": { "bindings": [] } });

	assert!(wikidata::parse_bindings(&json).expect("empty bindings must parse").is_empty());
}

#[test]
fn missing_bindings_are_malformed() {
	let err = wikidata::parse_bindings(&serde_json::json!({ "error": "timeout" }))
		.expect_err("Expected malformed payload error.");

	assert!(matches!(err, Error::InvalidResponse { .. }));
}

#[test]
fn summary_prefers_original_image() {
	let json = serde_json::json!({
		"thumbnail": { "source": "https://upload.wikimedia.org/thumb.jpg" },
		"originalimage": { "source": "https://upload.wikimedia.org/original.jpg" }
	});

	assert_eq!(
		wikipedia::parse_summary_image(&json).as_deref(),
		Some("https://upload.wikimedia.org/original.jpg")
	);

	let json = serde_json::json!({
		"thumbnail": { "source": "https://upload.wikimedia.org/thumb.jpg" }
	});

	assert_eq!(
		wikipedia::parse_summary_image(&json).as_deref(),
		Some("https://upload.wikimedia.org/thumb.jpg")
	);
	assert_eq!(wikipedia::parse_summary_image(&serde_json::json!({})), None);
}

#[tokio::test]
async fn fetch_rows_skips_the_network_without_ids() {
	let cfg = WikidataProviderConfig::default();
	let client =
		build_client(&cfg.user_agent, cfg.timeout_ms).expect("Failed to build HTTP client.");
	let rows = wikidata::fetch_rows(&client, &cfg, &[]).await.expect("fetch must succeed");

	assert!(rows.is_empty());
}
