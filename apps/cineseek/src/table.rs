//! Plain-text result table. Widths are measured in terminal columns, so CJK text lines up.

use cineseek_domain::{MovieResultExtended, ParsedQuery, script::display_width};

const HEADERS: [&str; 4] = ["标题", "类型", "国家/地区", "年份"];
const GAP: &str = "  ";
const LIST_JOINER: &str = " / ";

pub fn title_line(query: &ParsedQuery) -> String {
	let year = query.year.map(|year| year.to_string()).unwrap_or_else(|| "?".to_string());

	format!("CineSeek 搜索：{} ({year})", query.title)
}

pub fn render(query: &ParsedQuery, results: &[MovieResultExtended]) -> String {
	let rows = results.iter().map(cells).collect::<Vec<_>>();
	let mut widths = HEADERS.map(display_width);

	for row in &rows {
		for (width, cell) in widths.iter_mut().zip(row) {
			*width = (*width).max(display_width(cell));
		}
	}

	let total = widths.iter().sum::<usize>() + GAP.len() * (widths.len() - 1);
	let mut lines = vec![title_line(query), format_row(&HEADERS.map(str::to_string), &widths)];

	lines.push("-".repeat(total));

	if rows.is_empty() {
		lines.push("(无结果)".to_string());
	}
	for row in &rows {
		lines.push(format_row(row, &widths));
	}

	lines.join("\n")
}

fn cells(movie: &MovieResultExtended) -> [String; 4] {
	[
		movie.display_title.clone(),
		movie.genres.join(LIST_JOINER),
		movie.countries.join(LIST_JOINER),
		movie.year.map(|year| year.to_string()).unwrap_or_default(),
	]
}

// Text columns are left aligned, the trailing year column is right aligned.
fn format_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
	let last = cells.len() - 1;
	let padded = cells
		.iter()
		.zip(widths)
		.enumerate()
		.map(|(idx, (cell, width))| {
			let pad = " ".repeat(width.saturating_sub(display_width(cell)));

			if idx == last { format!("{pad}{cell}") } else { format!("{cell}{pad}") }
		})
		.collect::<Vec<_>>();

	padded.join(GAP)
}
