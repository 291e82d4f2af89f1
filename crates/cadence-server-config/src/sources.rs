// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;
use std::str::FromStr;

use cadence_common_secret::SecretString;
use cadence_metrics_core::SummaryUpdatePolicy;
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{
	DatabaseConfigLayer, GithubConfigLayer, HttpConfigLayer, LoggingConfigLayer,
	MetricsConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file yields an empty layer.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/cadence/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: CADENCE_SERVER_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(ServerConfigLayer {
			http: Some(load_http_from_env()?),
			database: Some(load_database_from_env()),
			github: Some(load_github_from_env()?),
			metrics: Some(load_metrics_from_env()?),
			logging: Some(load_logging_from_env()),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Parse an optional environment variable, naming `kind` in the error.
fn env_parse<T: FromStr>(name: &str, kind: &str) -> Result<Option<T>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid {kind} value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn load_http_from_env() -> Result<HttpConfigLayer, ConfigError> {
	Ok(HttpConfigLayer {
		host: env_var("CADENCE_SERVER_HOST"),
		port: env_parse("CADENCE_SERVER_PORT", "u16")?,
	})
}

fn load_database_from_env() -> DatabaseConfigLayer {
	DatabaseConfigLayer {
		url: env_var("CADENCE_SERVER_DATABASE_URL"),
	}
}

fn load_github_from_env() -> Result<GithubConfigLayer, ConfigError> {
	Ok(GithubConfigLayer {
		base_url: env_var("CADENCE_SERVER_GITHUB_BASE_URL"),
		token: env_var("CADENCE_SERVER_GITHUB_TOKEN").map(SecretString::from),
		timeout_secs: env_parse("CADENCE_SERVER_GITHUB_TIMEOUT_SECS", "u64")?,
		poll_attempts: env_parse("CADENCE_SERVER_GITHUB_POLL_ATTEMPTS", "u32")?,
		poll_delay_secs: env_parse("CADENCE_SERVER_GITHUB_POLL_DELAY_SECS", "u64")?,
	})
}

fn load_metrics_from_env() -> Result<MetricsConfigLayer, ConfigError> {
	let name = "CADENCE_SERVER_SUMMARY_UPDATE_POLICY";
	let summary_update_policy = match env_var(name) {
		Some(v) => Some(
			v.parse::<SummaryUpdatePolicy>()
				.map_err(|message| ConfigError::InvalidValue {
					key: name.to_string(),
					message,
				})?,
		),
		None => None,
	};

	Ok(MetricsConfigLayer {
		summary_update_policy,
	})
}

fn load_logging_from_env() -> LoggingConfigLayer {
	LoggingConfigLayer {
		level: env_var("CADENCE_SERVER_LOG_LEVEL"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Environment > Precedence::ConfigFile);
		assert!(Precedence::ConfigFile > Precedence::Defaults);
	}

	#[test]
	fn test_defaults_source_returns_empty_layer() {
		let layer = DefaultsSource.load().unwrap();
		assert!(layer.http.is_none());
		assert!(layer.github.is_none());
	}

	#[test]
	fn test_toml_source_missing_file_returns_empty() {
		let source = TomlSource::new("/nonexistent/config.toml");
		let layer = source.load().unwrap();
		assert!(layer.http.is_none());
	}

	#[test]
	fn test_toml_source_parses_sections() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			r#"
[http]
port = 9100

[github]
token = "ghp_file"
poll_attempts = 4

[metrics]
summary_update_policy = "preserve"
"#
		)
		.unwrap();

		let layer = TomlSource::new(file.path()).load().unwrap();
		let github = layer.github.unwrap();
		assert_eq!(layer.http.unwrap().port, Some(9100));
		assert_eq!(github.token.as_ref().map(SecretString::expose), Some("ghp_file"));
		assert_eq!(github.poll_attempts, Some(4));
		assert_eq!(
			layer.metrics.unwrap().summary_update_policy,
			Some(SummaryUpdatePolicy::Preserve)
		);
		assert!(layer.database.is_none());
	}

	#[test]
	fn test_toml_source_reports_parse_errors() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[http]\nport = \"not a number\"").unwrap();

		let result = TomlSource::new(file.path()).load();
		assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
	}

	#[test]
	fn test_env_parse_reports_key() {
		std::env::set_var("CADENCE_TEST_ENV_PARSE_BAD", "ten");
		let result = env_parse::<u32>("CADENCE_TEST_ENV_PARSE_BAD", "u32");
		std::env::remove_var("CADENCE_TEST_ENV_PARSE_BAD");

		let err = result.unwrap_err();
		assert!(err.to_string().contains("CADENCE_TEST_ENV_PARSE_BAD"));
		assert!(err.to_string().contains("invalid u32 value 'ten'"));
	}

	#[test]
	fn test_unknown_summary_policy_is_invalid_value() {
		std::env::set_var("CADENCE_SERVER_SUMMARY_UPDATE_POLICY", "overwrite");
		let direct = load_metrics_from_env();
		let layered = EnvSource.load();
		std::env::remove_var("CADENCE_SERVER_SUMMARY_UPDATE_POLICY");

		match direct {
			Err(ConfigError::InvalidValue { key, message }) => {
				assert_eq!(key, "CADENCE_SERVER_SUMMARY_UPDATE_POLICY");
				assert!(message.contains("overwrite"));
			}
			other => panic!("expected InvalidValue, got {other:?}"),
		}
		assert!(matches!(layered, Err(ConfigError::InvalidValue { .. })));
	}

	#[test]
	fn test_env_parse_absent_and_empty() {
		assert_eq!(env_parse::<u64>("CADENCE_TEST_ENV_PARSE_UNSET", "u64").unwrap(), None);

		std::env::set_var("CADENCE_TEST_ENV_PARSE_EMPTY", "");
		let result = env_parse::<u64>("CADENCE_TEST_ENV_PARSE_EMPTY", "u64");
		std::env::remove_var("CADENCE_TEST_ENV_PARSE_EMPTY");
		assert_eq!(result.unwrap(), None);
	}
}
