// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Raw code-frequency samples and per-repository summaries.

use async_trait::async_trait;
use cadence_metrics_core::{RawSample, RepoId, SummaryRow, SummaryUpdatePolicy};
use sqlx::SqlitePool;
use tracing::instrument;

use crate::error::{DbError, Result};

/// Upper bound on samples considered from a single ingest batch.
pub const MAX_INGEST_SAMPLES: usize = 500;

const SUMMARY_TABLE: &str = "summaries";

/// Result of [`MetricsRepository::upsert_summary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
	Inserted,
	Updated,
	/// The stored row is at least as recent as the new computation.
	Unchanged,
}

#[async_trait]
pub trait MetricsRepository: Send + Sync {
	async fn ensure_raw_table(&self) -> Result<()>;
	async fn ensure_summary_table(&self) -> Result<()>;

	/// Insert samples whose date is not yet stored for `repo`.
	///
	/// Only the first [`MAX_INGEST_SAMPLES`] samples are considered. Returns the
	/// number of rows actually inserted.
	async fn merge_raw_samples(&self, repo: &RepoId, samples: &[RawSample]) -> Result<u64>;

	/// Stored samples for `repo`, oldest first.
	async fn read_raw_series(&self, repo: &RepoId) -> Result<Vec<RawSample>>;

	async fn upsert_summary(
		&self,
		repo: &RepoId,
		avg_addition: f64,
		avg_deletion: f64,
		computed_at: i64,
	) -> Result<UpsertOutcome>;

	async fn read_summary(&self, repo: &RepoId) -> Result<Option<SummaryRow>>;
	async fn read_all_summaries(&self) -> Result<Vec<SummaryRow>>;

	/// Round-trip a trivial query.
	async fn ping(&self) -> Result<()>;
}

#[derive(Clone)]
pub struct SqliteMetricsRepository {
	pool: SqlitePool,
	policy: SummaryUpdatePolicy,
}

impl SqliteMetricsRepository {
	pub fn new(pool: SqlitePool, policy: SummaryUpdatePolicy) -> Self {
		Self { pool, policy }
	}

	pub fn policy(&self) -> SummaryUpdatePolicy {
		self.policy
	}

	async fn table_exists(&self, name: &str) -> Result<bool> {
		let count: i64 =
			sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
				.bind(name)
				.fetch_one(&self.pool)
				.await
				.map_err(DbError::query("select table metadata"))?;
		Ok(count > 0)
	}
}

type SummaryTuple = (String, String, i64, f64, f64);

fn summary_from_row(row: SummaryTuple) -> SummaryRow {
	let (owner, repo, computed_at, avg_addition, avg_deletion) = row;
	SummaryRow {
		owner,
		repo,
		computed_at,
		avg_addition_interval_days: avg_addition,
		avg_deletion_interval_days: avg_deletion,
	}
}

#[async_trait]
impl MetricsRepository for SqliteMetricsRepository {
	#[instrument(skip(self))]
	async fn ensure_raw_table(&self) -> Result<()> {
		sqlx::query(
			r#"
			CREATE TABLE IF NOT EXISTS raw_samples (
				owner_key TEXT NOT NULL,
				repo_key TEXT NOT NULL,
				date INTEGER NOT NULL,
				additions INTEGER NOT NULL,
				deletions INTEGER NOT NULL
			)
			"#,
		)
		.execute(&self.pool)
		.await
		.map_err(DbError::query("create raw_samples table"))?;

		sqlx::query(
			"CREATE UNIQUE INDEX IF NOT EXISTS idx_raw_samples_repo_date ON raw_samples(owner_key, repo_key, date)",
		)
		.execute(&self.pool)
		.await
		.map_err(DbError::query("create raw_samples index"))?;

		Ok(())
	}

	#[instrument(skip(self))]
	async fn ensure_summary_table(&self) -> Result<()> {
		sqlx::query(
			r#"
			CREATE TABLE IF NOT EXISTS summaries (
				owner_key TEXT NOT NULL,
				repo_key TEXT NOT NULL,
				computed_at INTEGER NOT NULL,
				avg_addition_interval REAL NOT NULL,
				avg_deletion_interval REAL NOT NULL
			)
			"#,
		)
		.execute(&self.pool)
		.await
		.map_err(DbError::query("create summaries table"))?;

		sqlx::query(
			"CREATE INDEX IF NOT EXISTS idx_summaries_repo ON summaries(owner_key, repo_key)",
		)
		.execute(&self.pool)
		.await
		.map_err(DbError::query("create summaries index"))?;

		Ok(())
	}

	#[instrument(skip(self, samples), fields(repo = %repo, received = samples.len()))]
	async fn merge_raw_samples(&self, repo: &RepoId, samples: &[RawSample]) -> Result<u64> {
		let key = repo.normalized();
		let batch = &samples[..samples.len().min(MAX_INGEST_SAMPLES)];

		let mut tx = self
			.pool
			.begin()
			.await
			.map_err(DbError::query("begin raw sample merge"))?;

		let mut inserted = 0;
		for sample in batch {
			let result = sqlx::query(
				r#"
				INSERT INTO raw_samples (owner_key, repo_key, date, additions, deletions)
				VALUES (?, ?, ?, ?, ?)
				ON CONFLICT(owner_key, repo_key, date) DO NOTHING
				"#,
			)
			.bind(&key.owner_key)
			.bind(&key.repo_key)
			.bind(sample.date)
			.bind(sample.additions)
			.bind(sample.deletions)
			.execute(&mut *tx)
			.await
			.map_err(DbError::query("insert raw samples"))?;
			inserted += result.rows_affected();
		}

		tx.commit()
			.await
			.map_err(DbError::query("commit raw sample merge"))?;

		tracing::debug!(inserted, considered = batch.len(), "merged raw samples");
		Ok(inserted)
	}

	#[instrument(skip(self), fields(repo = %repo))]
	async fn read_raw_series(&self, repo: &RepoId) -> Result<Vec<RawSample>> {
		let key = repo.normalized();
		let rows: Vec<(i64, i64, i64)> = sqlx::query_as(
			r#"
			SELECT date, additions, deletions
			FROM raw_samples
			WHERE owner_key = ? AND repo_key = ?
			ORDER BY date ASC
			"#,
		)
		.bind(&key.owner_key)
		.bind(&key.repo_key)
		.fetch_all(&self.pool)
		.await
		.map_err(DbError::query("select raw samples"))?;

		Ok(rows.into_iter().map(RawSample::from).collect())
	}

	#[instrument(skip(self), fields(repo = %repo, policy = %self.policy))]
	async fn upsert_summary(
		&self,
		repo: &RepoId,
		avg_addition: f64,
		avg_deletion: f64,
		computed_at: i64,
	) -> Result<UpsertOutcome> {
		let key = repo.normalized();
		let stored: Option<i64> = sqlx::query_scalar(
			r#"
			SELECT computed_at FROM summaries
			WHERE owner_key = ? AND repo_key = ?
			ORDER BY computed_at DESC
			LIMIT 1
			"#,
		)
		.bind(&key.owner_key)
		.bind(&key.repo_key)
		.fetch_optional(&self.pool)
		.await
		.map_err(DbError::query("select summary"))?;

		let Some(stored) = stored else {
			sqlx::query(
				r#"
				INSERT INTO summaries (owner_key, repo_key, computed_at, avg_addition_interval, avg_deletion_interval)
				VALUES (?, ?, ?, ?, ?)
				"#,
			)
			.bind(&key.owner_key)
			.bind(&key.repo_key)
			.bind(computed_at)
			.bind(avg_addition)
			.bind(avg_deletion)
			.execute(&self.pool)
			.await
			.map_err(DbError::query("insert summary"))?;
			return Ok(UpsertOutcome::Inserted);
		};

		if computed_at <= stored {
			tracing::debug!(stored, computed_at, "stored summary is newer, skipping");
			return Ok(UpsertOutcome::Unchanged);
		}

		let query = match self.policy {
			SummaryUpdatePolicy::Refresh => sqlx::query(
				r#"
				UPDATE summaries
				SET computed_at = ?, avg_addition_interval = ?, avg_deletion_interval = ?
				WHERE owner_key = ? AND repo_key = ?
				"#,
			)
			.bind(computed_at)
			.bind(avg_addition)
			.bind(avg_deletion),
			SummaryUpdatePolicy::Preserve => sqlx::query(
				r#"
				UPDATE summaries
				SET computed_at = ?
				WHERE owner_key = ? AND repo_key = ?
				"#,
			)
			.bind(computed_at),
		};

		query
			.bind(&key.owner_key)
			.bind(&key.repo_key)
			.execute(&self.pool)
			.await
			.map_err(DbError::query("update summary"))?;

		Ok(UpsertOutcome::Updated)
	}

	#[instrument(skip(self), fields(repo = %repo))]
	async fn read_summary(&self, repo: &RepoId) -> Result<Option<SummaryRow>> {
		let key = repo.normalized();
		let row: Option<SummaryTuple> = sqlx::query_as(
			r#"
			SELECT owner_key, repo_key, computed_at, avg_addition_interval, avg_deletion_interval
			FROM summaries
			WHERE owner_key = ? AND repo_key = ?
			ORDER BY computed_at DESC
			LIMIT 1
			"#,
		)
		.bind(&key.owner_key)
		.bind(&key.repo_key)
		.fetch_optional(&self.pool)
		.await
		.map_err(DbError::query("select summary"))?;

		Ok(row.map(summary_from_row))
	}

	#[instrument(skip(self))]
	async fn read_all_summaries(&self) -> Result<Vec<SummaryRow>> {
		if !self.table_exists(SUMMARY_TABLE).await? {
			return Err(DbError::MissingTable(SUMMARY_TABLE));
		}

		let rows: Vec<SummaryTuple> = sqlx::query_as(
			r#"
			SELECT owner_key, repo_key, computed_at, avg_addition_interval, avg_deletion_interval
			FROM summaries
			ORDER BY owner_key, repo_key
			"#,
		)
		.fetch_all(&self.pool)
		.await
		.map_err(DbError::query("select summaries"))?;

		Ok(rows.into_iter().map(summary_from_row).collect())
	}

	async fn ping(&self) -> Result<()> {
		sqlx::query("SELECT 1")
			.execute(&self.pool)
			.await
			.map_err(DbError::query("ping database"))?;
		Ok(())
	}
}
