use url::Url;

/// Canonical Wikimedia Commons file-path URL prefix.
pub const COMMONS_FILE_PATH: &str = "https://commons.wikimedia.org/wiki/Special:FilePath/";

const COMMONS_FILE_PATH_MARKER: &str = "commons.wikimedia.org/wiki/Special:FilePath/";

/// Resolves an image reference into a canonical Commons file-path URL.
///
/// Canonical URLs pass through untouched. Other absolute URLs and bare file names are reduced to
/// their trailing segment and rewritten onto [`COMMONS_FILE_PATH`].
pub fn resolve_image(raw_ref: Option<&str>) -> Option<String> {
	let raw = raw_ref?.trim();

	if raw.is_empty() {
		return None;
	}

	let absolute = Url::parse(raw).ok().filter(|url| matches!(url.scheme(), "http" | "https"));
	let filename = match absolute {
		Some(url) => {
			if raw.contains(COMMONS_FILE_PATH_MARKER) {
				return Some(raw.to_string());
			}

			url.path_segments()?.filter(|segment| !segment.is_empty()).next_back()?.to_string()
		},
		None => bare_filename(raw)?,
	};

	Some(file_path_url(&filename))
}

/// Appends a `width` hint to canonical Commons URLs. Other URLs are returned unchanged.
pub fn thumbnail_url(url: &str, width: u32) -> String {
	if width == 0 || !url.contains(COMMONS_FILE_PATH_MARKER) || url.contains("width=") {
		return url.to_string();
	}

	let joiner = if url.contains('?') { '&' } else { '?' };

	format!("{url}{joiner}width={width}")
}

fn bare_filename(raw: &str) -> Option<String> {
	let segment = raw.rsplit('/').find(|segment| !segment.trim().is_empty())?.trim();
	let segment = segment
		.strip_prefix("File:")
		.or_else(|| segment.strip_prefix("file:"))
		.unwrap_or(segment);

	if segment.is_empty() { None } else { Some(segment.to_string()) }
}

fn file_path_url(filename: &str) -> String {
	let decoded = urlencoding::decode(filename)
		.map(|cow| cow.into_owned())
		.unwrap_or_else(|_| filename.to_string());
	let normalized = decoded.trim().replace(' ', "_");

	format!("{COMMONS_FILE_PATH}{}", urlencoding::encode(&normalized))
}
