use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{MergedCandidate, MovieResult, MovieResultExtended, ProjectedResult};

/// Distance assigned to results without a year, so they sort last.
pub const MISSING_YEAR_DISTANCE: i32 = 999;
/// Maximum year distance kept by [`RankPolicy::Hard`].
pub const HARD_FILTER_WINDOW: i32 = 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankPolicy {
	/// Re-order everything by year distance.
	#[default]
	Soft,
	/// Keep only near-year results when any exist, then re-order.
	Hard,
}
impl RankPolicy {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Soft => "soft",
			Self::Hard => "hard",
		}
	}
}
impl FromStr for RankPolicy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"soft" => Ok(Self::Soft),
			"hard" => Ok(Self::Hard),
			other => Err(format!("Unknown rank policy {other:?}; expected soft or hard.")),
		}
	}
}
impl fmt::Display for RankPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

pub trait RankYear {
	fn rank_year(&self) -> Option<i32>;
}
impl RankYear for MovieResult {
	fn rank_year(&self) -> Option<i32> {
		(self.year != 0).then_some(self.year)
	}
}
impl RankYear for MovieResultExtended {
	fn rank_year(&self) -> Option<i32> {
		self.year
	}
}
impl RankYear for ProjectedResult {
	fn rank_year(&self) -> Option<i32> {
		match self {
			Self::Compact(result) => result.rank_year(),
			Self::Extended(result) => result.rank_year(),
		}
	}
}
impl RankYear for MergedCandidate {
	fn rank_year(&self) -> Option<i32> {
		self.year
	}
}

pub fn year_distance(year: Option<i32>, query_year: i32) -> i32 {
	year.map(|year| (year - query_year).abs()).unwrap_or(MISSING_YEAR_DISTANCE)
}

/// Orders results by proximity to `query_year`. Equal distances keep their prior order.
pub fn rank<T>(results: Vec<T>, query_year: Option<i32>, policy: RankPolicy) -> Vec<T>
where
	T: RankYear,
{
	let Some(query_year) = query_year else { return results };
	let distance = |result: &T| year_distance(result.rank_year(), query_year);
	let mut ranked = match policy {
		RankPolicy::Soft => results,
		RankPolicy::Hard => {
			let (near, far): (Vec<T>, Vec<T>) =
				results.into_iter().partition(|result| distance(result) <= HARD_FILTER_WINDOW);

			if near.is_empty() {
				far
			} else {
				near
			}
		},
	};

	ranked.sort_by_key(distance);

	ranked
}

#[cfg(test)]
mod tests {
	use super::*;

	fn extended(year: Option<i32>) -> MovieResultExtended {
		MovieResultExtended { year, ..Default::default() }
	}

	fn years(results: &[MovieResultExtended]) -> Vec<Option<i32>> {
		results.iter().map(|result| result.year).collect()
	}

	#[test]
	fn no_query_year_keeps_order() {
		let ranked = rank(vec![extended(Some(2009)), extended(None)], None, RankPolicy::Hard);

		assert_eq!(years(&ranked), vec![Some(2009), None]);
	}

	#[test]
	fn compact_zero_year_counts_as_missing() {
		assert_eq!(MovieResult::default().rank_year(), None);
		assert_eq!(year_distance(None, 2007), MISSING_YEAR_DISTANCE);
	}

	#[test]
	fn parses_policy_names() {
		assert_eq!(" Hard ".parse::<RankPolicy>(), Ok(RankPolicy::Hard));
		assert!("strict".parse::<RankPolicy>().is_err());
	}
}
