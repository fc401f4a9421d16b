use cineseek_domain::{
	LangMap, MergedCandidate, MovieResultExtended, ProjectedResult, RankPolicy, RawAttributeRow,
	SceneReleaseParser, TitleParser, merge, parse_title, project, project_compact,
	project_extended, rank,
};

fn langs(pairs: &[(&str, &str)]) -> LangMap {
	pairs.iter().map(|(lang, value)| (lang.to_string(), value.to_string())).collect()
}

fn wandering_earth_rows() -> Vec<RawAttributeRow> {
	let titles = langs(&[("zh-hans", "流浪地球"), ("en", "The Wandering Earth")]);

	vec![
		RawAttributeRow {
			entity_id: "Q24869728".to_string(),
			title_by_lang: titles.clone(),
			year: Some(2019),
			image_ref: Some("The Wandering Earth poster.jpg".to_string()),
			genre_by_lang: Some(langs(&[("zh", "科幻電影"), ("en", "science fiction film")])),
			country_by_lang: Some(langs(&[("zh-hans", "中华人民共和国"), ("en", "China")])),
			wiki_link_by_lang: Some(langs(&[("zh", "https://zh.wikipedia.org/wiki/流浪地球")])),
		},
		RawAttributeRow {
			entity_id: "Q24869728".to_string(),
			title_by_lang: titles.clone(),
			year: Some(2019),
			image_ref: None,
			genre_by_lang: Some(langs(&[("zh-hans", "灾难片"), ("en", "disaster film")])),
			country_by_lang: Some(langs(&[("zh-hans", "中华人民共和国"), ("en", "China")])),
			wiki_link_by_lang: Some(langs(&[(
				"en",
				"https://en.wikipedia.org/wiki/The_Wandering_Earth",
			)])),
		},
		RawAttributeRow {
			entity_id: "Q1".to_string(),
			title_by_lang: langs(&[("en", "Wandering")]),
			year: None,
			image_ref: None,
			genre_by_lang: Some(langs(&[("en", "drama film")])),
			country_by_lang: None,
			wiki_link_by_lang: None,
		},
	]
}

fn candidate(rows: &[RawAttributeRow], entity_id: &str) -> MergedCandidate {
	merge(rows).get(entity_id).cloned().expect("missing candidate")
}

fn extended_with_year(year: Option<i32>) -> MovieResultExtended {
	MovieResultExtended { year, ..Default::default() }
}

#[test]
fn parse_is_total_over_odd_inputs() {
	for raw in ["", " ", "()", "（）", "[", "2007", "19999", "...", "x", "【2100】", "3000 AD"] {
		let parsed = parse_title(raw);

		if let Some(year) = parsed.year {
			assert!((1900..=2100).contains(&year), "year out of range for {raw:?}");
		}
		if !raw.trim().is_empty() {
			assert!(!parsed.title.is_empty(), "empty title for {raw:?}");
		}
	}
}

#[test]
fn parses_release_names() {
	let parsed = parse_title("Movie.Name.2007.1080p.BluRay.x264");

	assert_eq!((parsed.title.as_str(), parsed.year), ("Movie Name", Some(2007)));

	let parsed = parse_title("变形金刚2007");

	assert_eq!(parsed.year, Some(2007));
	assert!(!parsed.title.contains("2007"));

	let parsed = parse_title("片名（剪辑版 2012）");

	assert_eq!(parsed.year, Some(2012));
	assert_eq!(parsed.title, "片名");
}

#[test]
fn delegate_does_not_change_the_contract() {
	let scene = TitleParser::new(Box::new(SceneReleaseParser));

	for raw in ["Movie.Name.2007.1080p.BluRay.x264", "变形金刚2007", "片名（剪辑版 2012）"] {
		assert_eq!(scene.parse(raw), parse_title(raw), "delegate diverged for {raw:?}");
	}
}

#[test]
fn delegate_keeps_years_after_tags() {
	let scene = TitleParser::new(Box::new(SceneReleaseParser));

	for (raw, year) in [
		("Movie.Name.1080p.2007", 2007),
		("Tunnel.Vision.2015.1080p", 2015),
		("The.Matrix.REMASTERED.1999.1080p", 1999),
		("Heat.WEB.x264.1995", 1995),
	] {
		assert_eq!(scene.parse(raw).year, Some(year), "year lost for {raw:?}");
		assert_eq!(scene.parse(raw).year, parse_title(raw).year, "delegate diverged for {raw:?}");
	}

	assert_eq!(scene.parse("Movie.Name.1080p.2007"), parse_title("Movie.Name.1080p.2007"));
	assert_eq!(scene.parse("Tunnel.Vision.2015.1080p").title, "Tunnel Vision");
	assert_eq!(scene.parse("Heat.WEB.x264.1995").title, "Heat");
}

#[test]
fn merge_sets_are_order_independent() {
	let rows = wandering_earth_rows();
	let mut reversed = rows.clone();

	reversed.reverse();

	let forward = candidate(&rows, "Q24869728");
	let backward = candidate(&reversed, "Q24869728");

	assert_eq!(forward.genres, backward.genres);
	assert_eq!(forward.countries, backward.countries);
	assert_eq!(forward.genres.preferred.len(), 2);
	assert_eq!(forward.countries.preferred.len(), 1);
}

#[test]
fn merge_sets_hold_under_rotation_and_interleaving() {
	let english_only = RawAttributeRow {
		entity_id: "Q24869728".to_string(),
		title_by_lang: langs(&[("en", "The Wandering Earth")]),
		year: None,
		image_ref: None,
		genre_by_lang: Some(langs(&[("en", "adventure film")])),
		country_by_lang: Some(langs(&[("en", "People's Republic of China")])),
		wiki_link_by_lang: None,
	};
	let mut rows = wandering_earth_rows();

	rows.push(english_only.clone());

	let expected = candidate(&rows, "Q24869728");
	let mut orderings = (0..rows.len())
		.map(|shift| {
			let mut rotated = rows.clone();

			rotated.rotate_right(shift);

			rotated
		})
		.collect::<Vec<_>>();
	let base = wandering_earth_rows();

	orderings.push(vec![english_only.clone(), base[2].clone(), base[1].clone(), base[0].clone()]);
	orderings.push(vec![base[1].clone(), english_only, base[2].clone(), base[0].clone()]);

	for ordering in &orderings {
		let merged = candidate(ordering, "Q24869728");

		assert_eq!(merged.genres, expected.genres);
		assert_eq!(merged.countries, expected.countries);
	}

	assert!(expected.genres.fallback.contains("adventure film"));
	assert_eq!(expected.genres.fallback.len(), 3);
	assert_eq!(expected.countries.fallback.len(), 2);
	assert_eq!(expected.genres.preferred.len(), 2);
}

#[test]
fn merge_keeps_first_seen_entity_order() {
	let merged = merge(&wandering_earth_rows());

	assert_eq!(merged.ids(), ["Q24869728".to_string(), "Q1".to_string()]);
	assert_eq!(merged.into_vec().len(), 2);
}

#[test]
fn compact_projection_composes_fullname() {
	let result = project_compact(&candidate(&wandering_earth_rows(), "Q24869728"));

	assert_eq!(result.fullname, "流浪地球 The Wandering Earth");
	assert_eq!(result.year, 2019);
	assert_eq!(result.name, "流浪地球");
	assert_eq!(result.original_name, "The Wandering Earth");
	assert_eq!(result.genre, "灾难片 / 科幻电影");
	assert_eq!(result.country, "中华人民共和国");
	assert_eq!(result.alias, "");
}

#[test]
fn compact_projection_falls_back_to_english_labels() {
	let result = project_compact(&candidate(&wandering_earth_rows(), "Q1"));

	assert_eq!(result.fullname, "Wandering");
	assert_eq!(result.name, "");
	assert_eq!(result.year, 0);
	assert_eq!(result.genre, "drama film");
	assert_eq!(result.country, "");
}

#[test]
fn extended_projection_normalizes_script_and_links() {
	let result = project_extended(&candidate(&wandering_earth_rows(), "Q24869728"));

	assert_eq!(result.wikidata_id.as_deref(), Some("Q24869728"));
	assert_eq!(result.display_title, "流浪地球 The Wandering Earth (2019)");
	assert_eq!(result.genres, vec!["灾难片".to_string(), "科幻电影".to_string()]);
	assert_eq!(
		result.poster_url.as_deref(),
		Some("https://commons.wikimedia.org/wiki/Special:FilePath/The_Wandering_Earth_poster.jpg")
	);
	assert_eq!(result.wikipedia_links.len(), 2);
}

#[test]
fn traditional_title_is_simplified() {
	let rows = vec![RawAttributeRow {
		entity_id: "Q2".to_string(),
		title_by_lang: langs(&[("zh", "變形金剛"), ("en", "Transformers")]),
		year: Some(2007),
		..Default::default()
	}];
	let result = project_compact(&candidate(&rows, "Q2"));

	assert_eq!(result.fullname, "变形金刚 Transformers");
}

#[test]
fn projection_is_idempotent() {
	let merged = candidate(&wandering_earth_rows(), "Q24869728");

	for extended in [false, true] {
		let first = serde_json::to_string(&project(&merged, extended)).expect("serialize failed");
		let second = serde_json::to_string(&project(&merged, extended)).expect("serialize failed");

		assert_eq!(first, second);
	}
}

#[test]
fn project_dispatches_on_shape() {
	let merged = candidate(&wandering_earth_rows(), "Q1");

	assert!(matches!(project(&merged, false), ProjectedResult::Compact(_)));
	assert!(matches!(project(&merged, true), ProjectedResult::Extended(_)));
}

#[test]
fn hard_filter_keeps_near_years() {
	let results = vec![
		extended_with_year(Some(2006)),
		extended_with_year(Some(2007)),
		extended_with_year(Some(2009)),
	];
	let ranked = rank(results, Some(2007), RankPolicy::Hard);
	let years: Vec<_> = ranked.iter().map(|result| result.year).collect();

	assert_eq!(years, vec![Some(2007), Some(2006)]);
}

#[test]
fn hard_filter_keeps_everything_when_nothing_is_near() {
	let results = vec![extended_with_year(None), extended_with_year(Some(1990))];
	let ranked = rank(results, Some(2007), RankPolicy::Hard);
	let years: Vec<_> = ranked.iter().map(|result| result.year).collect();

	assert_eq!(years, vec![Some(1990), None]);
}

#[test]
fn soft_rerank_keeps_all_and_is_stable() {
	let mut first = extended_with_year(Some(2008));
	let mut second = extended_with_year(Some(2006));

	first.display_title = "first".to_string();
	second.display_title = "second".to_string();

	let results = vec![extended_with_year(None), first, extended_with_year(Some(2015)), second];
	let ranked = rank(results, Some(2007), RankPolicy::Soft);
	let titles: Vec<_> = ranked.iter().map(|result| result.display_title.as_str()).collect();
	let years: Vec<_> = ranked.iter().map(|result| result.year).collect();

	assert_eq!(titles[..2], ["first", "second"]);
	assert_eq!(years, vec![Some(2008), Some(2006), Some(2015), None]);
}
