// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the code-frequency client.

use thiserror::Error;

/// Errors that can occur while fetching code-frequency statistics.
#[derive(Debug, Error)]
pub enum FetchError {
	/// Upstream answered 204: the repository has no history to report.
	#[error("repository has no historical metrics")]
	NoMetricsAvailable,

	/// Upstream answered 403: the repository is forbidden or the caller is
	/// rate limited. The two cases are indistinguishable.
	#[error("forbidden or rate-limited, retry later")]
	AccessDenied,

	/// The poll budget ran out before the statistics were ready.
	#[error("upstream still compiling, retry later")]
	ComputeTimeout,

	/// A 200 response whose body is not a list of weekly triples.
	#[error("invalid response from GitHub: {0}")]
	InvalidResponse(String),

	/// Invalid client configuration.
	#[error("configuration error: {0}")]
	Config(String),

	/// The HTTP client could not be constructed.
	#[error("network error: {0}")]
	Network(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_display() {
		assert_eq!(
			FetchError::NoMetricsAvailable.to_string(),
			"repository has no historical metrics"
		);
		assert_eq!(
			FetchError::AccessDenied.to_string(),
			"forbidden or rate-limited, retry later"
		);
		assert_eq!(
			FetchError::ComputeTimeout.to_string(),
			"upstream still compiling, retry later"
		);
	}
}
