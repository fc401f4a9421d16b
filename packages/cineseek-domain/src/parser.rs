use std::sync::LazyLock;

use regex::Regex;

use crate::ParsedQuery;

/// Separators between release-name tokens, without whitespace.
const SEPARATORS: &[char] =
	&['.', '_', '-', '[', ']', '(', ')', '{', '}', '（', '）', '【', '】', '《', '》'];

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

// Resolution, source, codec, audio and release-group tags that never belong to a title.
// Heuristic parsing drops all of them.
const NOISE_TOKENS: &[&str] = &[
	"1080p", "2160p", "720p", "480p", "4k", "8k", "uhd", "webrip", "web-dl", "webdl", "web", "dl",
	"hdrip", "hdtv", "hdr", "hdr10", "dv", "dolby", "vision", "10bit", "x264", "x265", "h264",
	"h265", "hevc", "avc", "bluray", "bdrip", "brrip", "remux", "dvdrip", "dts", "dts-hd", "truehd",
	"atmos", "aac", "ac3", "ddp", "ddp5", "flac", "mp3", "dual", "audio", "multi", "subs",
	"multisub", "nf", "netflix", "imax", "remastered", "extended", "theatrical", "publichd", "eam",
	"protonmovies", "phdteam", "yts", "yify", "rarbg",
];

// Noise words that are also ordinary title words (`Tunnel.Vision`), so never a scene cut point.
const TITLE_WORDS: &[&str] = &[
	"dolby", "vision", "web", "dl", "dual", "audio", "multi", "subs", "extended", "remastered",
	"theatrical", "imax",
];

// Edition tags dropped from the end of a scene title.
const EDITION_TAGS: &[&str] = &["extended", "remastered", "theatrical", "imax"];

static YEAR: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?:19|20)[0-9]{2}").expect("year pattern is valid"));
static BRACKETED: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"[（(\[【]([^）)\]】]+)[）)\]】]").expect("bracket pattern is valid")
});
static TOKEN_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"[._\-\[\](){}（）【】《》\s]+").expect("separator pattern is valid")
});
static RESOLUTION: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)^[0-9]{3,4}[pi]$").expect("resolution pattern is valid"));

/// What a release-name parser could recover. Both fields may be absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReleaseName {
	pub title: Option<String>,
	pub year: Option<i32>,
}

/// Optional specialised parser consulted before the heuristic fallback.
pub trait ReleaseNameParser
where
	Self: Send + Sync,
{
	fn parse(&self, input: &str) -> ReleaseName;
}

/// Always yields nothing, so [`TitleParser`] runs its heuristics only.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullReleaseParser;
impl ReleaseNameParser for NullReleaseParser {
	fn parse(&self, _input: &str) -> ReleaseName {
		ReleaseName::default()
	}
}

/// Scene-style release names: `Title.Words.2007.1080p.BluRay.x264-GROUP`.
///
/// The title is everything before the first year or quality marker, minus trailing tags.
/// The year is the first one anywhere after the title's first token, so
/// `Movie.Name.1080p.2007` still yields 2007. A run of consecutive years keeps all but the last
/// one in the title (`Blade.Runner.2049.2017`). Inputs without any cut point are left to the
/// heuristics.
#[derive(Clone, Copy, Debug, Default)]
pub struct SceneReleaseParser;
impl ReleaseNameParser for SceneReleaseParser {
	fn parse(&self, input: &str) -> ReleaseName {
		let tokens = tokenize(input);
		let mut year = None;
		let mut year_at = None;
		let mut marker_at = None;

		for (idx, token) in tokens.iter().enumerate().skip(1) {
			if year.is_none()
				&& let Some(found) = token_year(token)
				&& tokens.get(idx + 1).and_then(|next| token_year(next)).is_none()
			{
				year = Some(found);
				year_at = Some(idx);
			}
			if marker_at.is_none() && is_quality_marker(token) {
				marker_at = Some(idx);
			}
			if year.is_some() && marker_at.is_some() {
				break;
			}
		}

		let cut = match (year_at, marker_at) {
			(Some(year_at), Some(marker_at)) => year_at.min(marker_at),
			(Some(cut), None) | (None, Some(cut)) => cut,
			(None, None) => return ReleaseName::default(),
		};
		let trailing_tag: fn(&str) -> bool =
			if Some(cut) == marker_at { is_noise_word } else { is_edition_tag };
		let mut title = &tokens[..cut];

		while let [rest @ .., last] = title
			&& !rest.is_empty()
			&& trailing_tag(*last)
		{
			title = rest;
		}

		let title = title.join(" ");

		if title.is_empty() {
			return ReleaseName::default();
		}

		ReleaseName { title: Some(title), year }
	}
}

pub struct TitleParser {
	delegate: Box<dyn ReleaseNameParser>,
}
impl TitleParser {
	pub fn new(delegate: Box<dyn ReleaseNameParser>) -> Self {
		Self { delegate }
	}

	pub fn heuristic() -> Self {
		Self::new(Box::new(NullReleaseParser))
	}

	/// Total over all inputs: the worst case is the trimmed input with no year.
	pub fn parse(&self, raw: &str) -> ParsedQuery {
		let fused = repair_glued_year(raw.trim());
		let bracket_year = bracket_year(&fused);
		let stripped = BRACKETED.replace_all(&fused, "").trim().to_string();
		let delegated = self.delegate.parse(&stripped);

		if let Some(title) = delegated.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
			let year = bracket_year
				.or(delegated.year.filter(|y| in_year_range(*y)))
				.or_else(|| first_year(&stripped));

			return ParsedQuery { title: title.to_string(), year };
		}

		let year = bracket_year.or_else(|| first_year(&stripped));
		let without_year = match year {
			Some(year) => remove_year(&stripped, year),
			None => stripped.clone(),
		};
		let title = tokenize(&without_year)
			.into_iter()
			.filter(|token| !is_noise(token))
			.collect::<Vec<_>>()
			.join(" ");

		if !title.is_empty() {
			return ParsedQuery { title, year };
		}

		let fallback = [
			without_year.trim().to_string(),
			year.map(|year| remove_year(&fused, year)).unwrap_or_default().trim().to_string(),
		]
		.into_iter()
		.find(|candidate| !candidate.is_empty())
		.unwrap_or_else(|| raw.trim().to_string());

		ParsedQuery { title: fallback, year }
	}
}
impl Default for TitleParser {
	fn default() -> Self {
		Self::heuristic()
	}
}

/// Heuristic-only parse, equivalent to a [`TitleParser`] with no delegate.
pub fn parse_title(raw: &str) -> ParsedQuery {
	TitleParser::heuristic().parse(raw)
}

// `变形金刚2007` -> `变形金刚 2007`.
fn repair_glued_year(input: &str) -> String {
	let mut out = input.to_string();
	let Some(found) = YEAR.find(input) else { return out };
	let glued = input[..found.start()]
		.chars()
		.next_back()
		.map(|prev| !prev.is_whitespace() && !SEPARATORS.contains(&prev))
		.unwrap_or(false);

	if glued {
		out.insert(found.start(), ' ');
	}

	out
}

fn bracket_year(input: &str) -> Option<i32> {
	BRACKETED
		.captures_iter(input)
		.filter_map(|caps| caps.get(1))
		.find_map(|content| first_year(content.as_str()))
}

fn first_year(input: &str) -> Option<i32> {
	YEAR.find_iter(input)
		.filter_map(|found| found.as_str().parse::<i32>().ok())
		.find(|year| in_year_range(*year))
}

fn remove_year(input: &str, year: i32) -> String {
	let Some(found) =
		YEAR.find_iter(input).find(|found| found.as_str().parse::<i32>().ok() == Some(year))
	else {
		return input.to_string();
	};

	format!("{}{}", &input[..found.start()], &input[found.end()..])
}

fn in_year_range(year: i32) -> bool {
	(MIN_YEAR..=MAX_YEAR).contains(&year)
}

fn tokenize(input: &str) -> Vec<&str> {
	TOKEN_SPLIT.split(input).filter(|token| !token.is_empty()).collect()
}

fn token_year(token: &str) -> Option<i32> {
	if token.len() != 4 || !token.chars().all(|ch| ch.is_ascii_digit()) {
		return None;
	}

	token.parse::<i32>().ok().filter(|year| in_year_range(*year))
}

fn is_noise(token: &str) -> bool {
	is_noise_word(token) || token.chars().all(|ch| ch.is_ascii_digit())
}

fn is_quality_marker(token: &str) -> bool {
	let lower = token.to_lowercase();

	RESOLUTION.is_match(token)
		|| (NOISE_TOKENS.contains(&lower.as_str()) && !TITLE_WORDS.contains(&lower.as_str()))
}

fn is_noise_word(token: &str) -> bool {
	NOISE_TOKENS.contains(&token.to_lowercase().as_str())
}

fn is_edition_tag(token: &str) -> bool {
	EDITION_TAGS.contains(&token.to_lowercase().as_str())
}
