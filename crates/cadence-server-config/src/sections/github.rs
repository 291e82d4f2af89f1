// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Upstream code-frequency provider configuration.

use std::time::Duration;

use cadence_common_secret::SecretString;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_POLL_ATTEMPTS: u32 = 10;
const DEFAULT_POLL_DELAY_SECS: u64 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubConfig {
	pub base_url: String,
	pub token: Option<SecretString>,
	pub timeout_secs: u64,
	pub poll_attempts: u32,
	pub poll_delay_secs: u64,
}

impl Default for GithubConfig {
	fn default() -> Self {
		GithubConfigLayer::default().finalize()
	}
}

impl GithubConfig {
	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}

	pub fn poll_delay(&self) -> Duration {
		Duration::from_secs(self.poll_delay_secs)
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubConfigLayer {
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub token: Option<SecretString>,
	#[serde(default)]
	pub timeout_secs: Option<u64>,
	#[serde(default)]
	pub poll_attempts: Option<u32>,
	#[serde(default)]
	pub poll_delay_secs: Option<u64>,
}

impl GithubConfigLayer {
	pub fn merge(&mut self, other: GithubConfigLayer) {
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.token.is_some() {
			self.token = other.token;
		}
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
		if other.poll_attempts.is_some() {
			self.poll_attempts = other.poll_attempts;
		}
		if other.poll_delay_secs.is_some() {
			self.poll_delay_secs = other.poll_delay_secs;
		}
	}

	pub fn finalize(self) -> GithubConfig {
		GithubConfig {
			base_url: self
				.base_url
				.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
			token: self.token.filter(|t| !t.is_empty()),
			timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
			poll_attempts: self.poll_attempts.unwrap_or(DEFAULT_POLL_ATTEMPTS),
			poll_delay_secs: self.poll_delay_secs.unwrap_or(DEFAULT_POLL_DELAY_SECS),
		}
	}
}
