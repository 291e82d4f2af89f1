// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the metrics core.

use thiserror::Error;

/// Errors raised while validating identifiers or computing intervals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
	/// Owner or repository name is not a valid upstream identifier.
	#[error("invalid repository identifier: {0}")]
	InvalidRepository(String),

	/// A stored key could not be decoded back into an identifier.
	#[error("malformed storage key: {0}")]
	MalformedKey(String),

	/// Fewer than two non-zero samples exist in the selected series.
	#[error("not enough non-zero samples to compute an interval")]
	InsufficientData,

	/// A sample timestamp cannot be represented as a UTC date.
	#[error("timestamp out of range: {0}")]
	InvalidTimestamp(i64),
}

pub type Result<T> = std::result::Result<T, MetricsError>;
