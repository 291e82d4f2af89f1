// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

/// One weekly code-frequency observation.
///
/// Upstream sends each week as a `[date, additions, deletions]` array with
/// `date` in unix seconds and deletions as a negative count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i64, i64, i64)", into = "(i64, i64, i64)")]
pub struct RawSample {
	pub date: i64,
	pub additions: i64,
	pub deletions: i64,
}

impl RawSample {
	pub fn new(date: i64, additions: i64, deletions: i64) -> Self {
		Self {
			date,
			additions,
			deletions,
		}
	}
}

impl From<(i64, i64, i64)> for RawSample {
	fn from((date, additions, deletions): (i64, i64, i64)) -> Self {
		Self::new(date, additions, deletions)
	}
}

impl From<RawSample> for (i64, i64, i64) {
	fn from(sample: RawSample) -> Self {
		(sample.date, sample.additions, sample.deletions)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parses_upstream_triples() {
		let body = "[[1302998400,1124,-435],[1303603200,0,0]]";
		let samples: Vec<RawSample> = serde_json::from_str(body).unwrap();
		assert_eq!(
			samples,
			vec![
				RawSample::new(1302998400, 1124, -435),
				RawSample::new(1303603200, 0, 0)
			]
		);
	}

	#[test]
	fn test_rejects_short_triples() {
		let result: Result<Vec<RawSample>, _> = serde_json::from_str("[[1302998400,1124]]");
		assert!(result.is_err());
	}
}
