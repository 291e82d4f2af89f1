// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration for the code-frequency client.

use std::time::Duration;

use cadence_common_http::PollPolicy;
use cadence_common_secret::SecretString;
use reqwest::Url;

use crate::error::FetchError;

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`GithubStatsClient`](crate::GithubStatsClient).
#[derive(Debug, Clone)]
pub struct GithubStatsConfig {
	/// Base URL for the GitHub REST API (parsed, http or https)
	base_url: Url,

	/// Personal access token raising the upstream rate limit
	token: Option<SecretString>,

	/// Timeout applied to every single request
	pub request_timeout: Duration,

	/// Attempt budget and wait while statistics are compiling
	pub poll_policy: PollPolicy,
}

impl Default for GithubStatsConfig {
	fn default() -> Self {
		Self::new()
	}
}

impl GithubStatsConfig {
	/// Create a configuration pointing at api.github.com with default
	/// timeout and poll policy.
	pub fn new() -> Self {
		Self {
			base_url: Url::parse(DEFAULT_BASE_URL).expect("default URL is valid"),
			token: None,
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
			poll_policy: PollPolicy::default(),
		}
	}

	/// Validate a base URL.
	///
	/// Requirements:
	/// - Must be a valid URL
	/// - Must use the http or https scheme
	/// - Must have a host
	fn validate_base_url(raw: &str) -> Result<Url, FetchError> {
		let url = Url::parse(raw)
			.map_err(|e| FetchError::Config(format!("Invalid GitHub base URL '{raw}': {e}")))?;

		if url.scheme() != "https" && url.scheme() != "http" {
			return Err(FetchError::Config(format!(
				"GitHub base URL must use http or https, got '{}'",
				url.scheme()
			)));
		}

		if url.host_str().is_none() {
			return Err(FetchError::Config(
				"GitHub base URL must include a host".to_string(),
			));
		}

		Ok(url)
	}

	/// Set a custom base URL (for GitHub Enterprise or testing).
	pub fn with_base_url(mut self, url: impl AsRef<str>) -> Result<Self, FetchError> {
		self.base_url = Self::validate_base_url(url.as_ref())?;
		Ok(self)
	}

	/// Set the access token. An empty token clears it.
	pub fn with_token(mut self, token: impl Into<SecretString>) -> Self {
		self.token = Some(token.into()).filter(|t| !t.is_empty());
		self
	}

	pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
		self.poll_policy = policy;
		self
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	pub(crate) fn token(&self) -> Option<&SecretString> {
		self.token.as_ref()
	}
}
