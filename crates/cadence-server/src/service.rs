// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Fetch, persist and summarize code-frequency metrics for a repository.

use std::sync::Arc;

use cadence_metrics_core::{additions, average_interval, deletions, RepoId, SummaryRow};
use cadence_server_db::MetricsRepository;
use cadence_server_github::CodeFrequencySource;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::error::ServerError;

/// Interval averages for one repository, as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MetricsSummary {
	/// Repository owner, as requested.
	#[serde(rename = "Owner")]
	pub owner: String,
	/// Repository name, as requested.
	#[serde(rename = "Repo")]
	pub repo: String,
	/// Unix seconds of the last computation.
	#[serde(rename = "Date")]
	pub date: i64,
	/// Mean days between weeks with additions.
	#[serde(rename = "Average_addition")]
	pub average_addition: f64,
	/// Mean days between weeks with deletions.
	#[serde(rename = "Average_deletion")]
	pub average_deletion: f64,
}

impl TryFrom<SummaryRow> for MetricsSummary {
	type Error = ServerError;

	fn try_from(row: SummaryRow) -> Result<Self, Self::Error> {
		let repo = row.repo_id()?;
		Ok(Self {
			owner: repo.owner().to_string(),
			repo: repo.name().to_string(),
			date: row.computed_at,
			average_addition: row.avg_addition_interval_days,
			average_deletion: row.avg_deletion_interval_days,
		})
	}
}

/// Source of "now" in unix seconds, stamped on recomputed summaries.
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

pub struct MetricsService {
	source: Arc<dyn CodeFrequencySource>,
	store: Arc<dyn MetricsRepository>,
	clock: Clock,
}

impl MetricsService {
	pub fn new(source: Arc<dyn CodeFrequencySource>, store: Arc<dyn MetricsRepository>) -> Self {
		Self {
			source,
			store,
			clock: Arc::new(|| chrono::Utc::now().timestamp()),
		}
	}

	pub fn with_clock(mut self, clock: Clock) -> Self {
		self.clock = clock;
		self
	}

	pub fn store(&self) -> &dyn MetricsRepository {
		self.store.as_ref()
	}

	/// Fetch the latest series for `owner/repo`, merge it into storage and
	/// recompute the stored summary.
	///
	/// Averages are computed over everything stored for the repository, not
	/// just the batch fetched by this call.
	#[instrument(skip(self))]
	pub async fn refresh(&self, owner: &str, repo: &str) -> Result<MetricsSummary, ServerError> {
		let repo_id = RepoId::new(owner, repo)?;

		let samples = self.source.fetch(&repo_id).await?;

		self.store.ensure_raw_table().await?;
		let inserted = self.store.merge_raw_samples(&repo_id, &samples).await?;

		let series = self.store.read_raw_series(&repo_id).await?;
		let avg_addition = average_interval(&series, additions)?;
		let avg_deletion = average_interval(&series, deletions)?;

		self.store.ensure_summary_table().await?;
		let now = (self.clock)();
		let outcome = self
			.store
			.upsert_summary(&repo_id, avg_addition, avg_deletion, now)
			.await?;

		info!(
			repo = %repo_id,
			fetched = samples.len(),
			inserted,
			stored = series.len(),
			avg_addition,
			avg_deletion,
			?outcome,
			"Refreshed repository metrics"
		);

		let row = self.store.read_summary(&repo_id).await?.ok_or_else(|| {
			ServerError::Internal(format!("summary for {repo_id} missing after upsert"))
		})?;
		MetricsSummary::try_from(row)
	}

	/// Every stored summary, ordered by owner then repository key.
	#[instrument(skip(self))]
	pub async fn list(&self) -> Result<Vec<MetricsSummary>, ServerError> {
		self.store
			.read_all_summaries()
			.await?
			.into_iter()
			.map(MetricsSummary::try_from)
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_summary_uses_historical_field_names() {
		let summary = MetricsSummary {
			owner: "foo-bar".to_string(),
			repo: "baz-qux".to_string(),
			date: 1_700_000_000,
			average_addition: 7.0,
			average_deletion: 10.5,
		};
		let json = serde_json::to_value(&summary).unwrap();
		assert_eq!(
			json,
			serde_json::json!({
				"Owner": "foo-bar",
				"Repo": "baz-qux",
				"Date": 1_700_000_000,
				"Average_addition": 7.0,
				"Average_deletion": 10.5
			})
		);
	}

	#[test]
	fn test_summary_denormalizes_row() {
		let row = SummaryRow {
			owner: "foo_bar".to_string(),
			repo: "my$5Frepo".to_string(),
			computed_at: 42,
			avg_addition_interval_days: 1.5,
			avg_deletion_interval_days: 2.5,
		};
		let summary = MetricsSummary::try_from(row).unwrap();
		assert_eq!(summary.owner, "foo-bar");
		assert_eq!(summary.repo, "my_repo");
		assert_eq!(summary.date, 42);
	}
}
