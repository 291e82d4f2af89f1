// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-repository summary rows.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::repo_id::RepoId;

/// Derived interval averages for one repository, in storage form.
///
/// `owner` and `repo` hold normalized keys; use [`SummaryRow::repo_id`] to
/// recover the identifier that was requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
	pub owner: String,
	pub repo: String,
	/// Unix seconds of the last computation.
	pub computed_at: i64,
	pub avg_addition_interval_days: f64,
	pub avg_deletion_interval_days: f64,
}

impl SummaryRow {
	pub fn repo_id(&self) -> Result<RepoId> {
		RepoId::from_normalized(&self.owner, &self.repo)
	}
}

/// What an update to an existing summary row rewrites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryUpdatePolicy {
	/// Rewrite the timestamp and both averages.
	#[default]
	Refresh,
	/// Rewrite only the timestamp; the first computed averages are kept.
	Preserve,
}

impl SummaryUpdatePolicy {
	pub fn as_str(&self) -> &'static str {
		match self {
			SummaryUpdatePolicy::Refresh => "refresh",
			SummaryUpdatePolicy::Preserve => "preserve",
		}
	}
}

impl std::str::FromStr for SummaryUpdatePolicy {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"refresh" => Ok(SummaryUpdatePolicy::Refresh),
			"preserve" => Ok(SummaryUpdatePolicy::Preserve),
			_ => Err(format!("unknown summary update policy: {s}")),
		}
	}
}

impl std::fmt::Display for SummaryUpdatePolicy {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
