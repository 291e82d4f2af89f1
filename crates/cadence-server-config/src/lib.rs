// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration management for Cadence server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`CADENCE_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use cadence_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub database: DatabaseConfig,
	pub github: GithubConfig,
	pub metrics: MetricsConfig,
	pub logging: LoggingConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}

	/// Log the resolved settings. Call once logging is initialized.
	pub fn log_summary(&self) {
		info!(
			host = %self.http.host,
			port = self.http.port,
			database = %self.database.url,
			github_base_url = %self.github.base_url,
			github_token_configured = self.github.token.is_some(),
			poll_attempts = self.github.poll_attempts,
			poll_delay_secs = self.github.poll_delay_secs,
			summary_update_policy = %self.metrics.summary_update_policy,
			log_level = %self.logging.level,
			"Server configuration loaded"
		);
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`CADENCE_SERVER_*`)
/// 2. Config file (`/etc/cadence/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration from environment only (for testing or simple deployments).
pub fn load_config_from_env() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![Box::new(EnvSource)])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let database = layer.database.unwrap_or_default().finalize();
	let github = layer.github.unwrap_or_default().finalize();
	let metrics = layer.metrics.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	database.validate()?;
	validate_config(&github)?;
	debug!("configuration resolved");

	Ok(ServerConfig {
		http,
		database,
		github,
		metrics,
		logging,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(github: &GithubConfig) -> Result<(), ConfigError> {
	if github.poll_attempts == 0 {
		return Err(ConfigError::Validation(
			"CADENCE_SERVER_GITHUB_POLL_ATTEMPTS must be at least 1".to_string(),
		));
	}

	if github.timeout_secs == 0 {
		return Err(ConfigError::Validation(
			"CADENCE_SERVER_GITHUB_TIMEOUT_SECS must be at least 1".to_string(),
		));
	}

	Ok(())
}
