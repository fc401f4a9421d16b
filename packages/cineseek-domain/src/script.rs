use unicode_script::{Script, UnicodeScript};
use unicode_segmentation::UnicodeSegmentation;
use zhconv::{Variant, zhconv};

pub fn contains_han(input: &str) -> bool {
	input.chars().any(|ch| ch.script() == Script::Han)
}

/// Traditional to simplified Chinese. Strings without Han characters are returned as is.
pub fn to_simplified(input: &str) -> String {
	if !contains_han(input) {
		return input.to_string();
	}

	zhconv(input, Variant::ZhHans)
}

/// Terminal column width per grapheme cluster, counting East Asian wide characters as two
/// columns. Combining marks add nothing.
pub fn display_width(input: &str) -> usize {
	input
		.graphemes(true)
		.filter_map(|grapheme| grapheme.chars().next())
		.map(|ch| if is_wide(ch) { 2 } else { 1 })
		.sum()
}

fn is_wide(ch: char) -> bool {
	if matches!(ch.script(), Script::Han | Script::Hiragana | Script::Katakana | Script::Hangul) {
		return true;
	}

	matches!(
		ch as u32,
		0x1100..=0x115F
			| 0x2E80..=0x303E
			| 0x3041..=0x33FF
			| 0xAC00..=0xD7A3
			| 0xF900..=0xFAFF
			| 0xFE30..=0xFE4F
			| 0xFF00..=0xFF60
			| 0xFFE0..=0xFFE6
	)
}
