// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for Cadence code-frequency metrics.
//!
//! This crate provides:
//! - [`RawSample`]: one weekly `(date, additions, deletions)` observation
//! - [`RepoId`]: a validated repository identifier and its storage encoding
//! - [`SummaryRow`]: derived per-repository interval averages
//! - [`average_interval`]: mean day-gap between consecutive non-zero samples

pub mod error;
pub mod interval;
pub mod repo_id;
pub mod sample;
pub mod summary;

pub use error::{MetricsError, Result};
pub use interval::{additions, average_interval, day_gap, deletions};
pub use repo_id::{denormalize, normalize, NormalizedRepoId, RepoId, MAX_NAME_LEN, MAX_OWNER_LEN};
pub use sample::RawSample;
pub use summary::{SummaryRow, SummaryUpdatePolicy};
