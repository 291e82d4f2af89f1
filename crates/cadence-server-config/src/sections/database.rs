// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Metrics store location.

use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_URL: &str = "sqlite:./database.db";
const SQLITE_SCHEME: &str = "sqlite:";

/// Where the SQLite metrics database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
	/// sqlx connection string, `sqlite:<path>` or `sqlite::memory:`
	pub url: String,
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		DatabaseConfigLayer::default().finalize()
	}
}

impl DatabaseConfig {
	/// Require a `sqlite:` URL with a non-empty path.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let path = self.url.strip_prefix(SQLITE_SCHEME).ok_or_else(|| {
			ConfigError::InvalidValue {
				key: "CADENCE_SERVER_DATABASE_URL".to_string(),
				message: format!("expected a {SQLITE_SCHEME} URL, got '{}'", self.url),
			}
		})?;

		if path.trim().is_empty() {
			return Err(ConfigError::InvalidValue {
				key: "CADENCE_SERVER_DATABASE_URL".to_string(),
				message: "database path is empty".to_string(),
			});
		}

		Ok(())
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfigLayer {
	#[serde(default)]
	pub url: Option<String>,
}

impl DatabaseConfigLayer {
	pub fn merge(&mut self, other: DatabaseConfigLayer) {
		if let Some(url) = other.url {
			self.url = Some(url);
		}
	}

	pub fn finalize(self) -> DatabaseConfig {
		DatabaseConfig {
			url: self
				.url
				.map(|url| url.trim().to_string())
				.filter(|url| !url.is_empty())
				.unwrap_or_else(|| DEFAULT_URL.to_string()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config(url: &str) -> DatabaseConfig {
		DatabaseConfigLayer {
			url: Some(url.to_string()),
		}
		.finalize()
	}

	#[test]
	fn test_default_is_local_file() {
		let config = DatabaseConfig::default();
		assert_eq!(config.url, "sqlite:./database.db");
		assert!(config.validate().is_ok());
	}

	#[test]
	fn test_blank_url_falls_back_to_default() {
		assert_eq!(config("  ").url, "sqlite:./database.db");
	}

	#[test]
	fn test_accepts_file_and_memory_urls() {
		assert!(config("sqlite:/var/lib/cadence/metrics.db").validate().is_ok());
		assert!(config("sqlite::memory:").validate().is_ok());
	}

	#[test]
	fn test_rejects_other_schemes() {
		let err = config("postgres://localhost/cadence").validate().unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "CADENCE_SERVER_DATABASE_URL"));
		assert!(err.to_string().contains("postgres://localhost/cadence"));
	}

	#[test]
	fn test_rejects_empty_path() {
		assert!(config("sqlite:").validate().is_err());
	}
}
