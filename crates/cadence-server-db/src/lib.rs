// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite persistence for Cadence metrics.
//!
//! Raw samples for every repository live in one `raw_samples` table keyed by
//! the normalized `(owner, repo)` pair and the sample date. Derived averages
//! live in `summaries`. Tables are created lazily by the caller through
//! [`MetricsRepository::ensure_raw_table`] and
//! [`MetricsRepository::ensure_summary_table`].

pub mod error;
pub mod metrics;
pub mod pool;
pub mod testing;

pub use error::{DbError, Result};
pub use metrics::{MetricsRepository, SqliteMetricsRepository, UpsertOutcome, MAX_INGEST_SAMPLES};
pub use pool::create_pool;
