// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration produced by a single source.

use serde::Deserialize;

use crate::sections::{
	DatabaseConfigLayer, GithubConfigLayer, HttpConfigLayer, LoggingConfigLayer,
	MetricsConfigLayer,
};

/// One source's view of the configuration; absent sections and fields defer
/// to lower-precedence sources.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfigLayer {
	#[serde(default)]
	pub http: Option<HttpConfigLayer>,
	#[serde(default)]
	pub database: Option<DatabaseConfigLayer>,
	#[serde(default)]
	pub github: Option<GithubConfigLayer>,
	#[serde(default)]
	pub metrics: Option<MetricsConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

fn merge_section<T>(target: &mut Option<T>, other: Option<T>, merge: impl FnOnce(&mut T, T)) {
	if let Some(other) = other {
		match target {
			Some(current) => merge(current, other),
			None => *target = Some(other),
		}
	}
}

impl ServerConfigLayer {
	/// Overlay `other` on top of `self`; set fields in `other` win.
	pub fn merge(&mut self, other: ServerConfigLayer) {
		merge_section(&mut self.http, other.http, HttpConfigLayer::merge);
		merge_section(&mut self.database, other.database, DatabaseConfigLayer::merge);
		merge_section(&mut self.github, other.github, GithubConfigLayer::merge);
		merge_section(&mut self.metrics, other.metrics, MetricsConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_merge_overrides_only_set_fields() {
		let mut base = ServerConfigLayer {
			http: Some(HttpConfigLayer {
				host: Some("0.0.0.0".to_string()),
				port: Some(8080),
			}),
			..Default::default()
		};
		base.merge(ServerConfigLayer {
			http: Some(HttpConfigLayer {
				host: None,
				port: Some(9100),
			}),
			database: Some(DatabaseConfigLayer {
				url: Some("sqlite::memory:".to_string()),
			}),
			..Default::default()
		});

		let http = base.http.unwrap();
		assert_eq!(http.host.as_deref(), Some("0.0.0.0"));
		assert_eq!(http.port, Some(9100));
		assert_eq!(base.database.unwrap().url.as_deref(), Some("sqlite::memory:"));
	}

	#[test]
	fn test_merge_keeps_section_when_other_is_absent() {
		let mut base = ServerConfigLayer {
			logging: Some(LoggingConfigLayer {
				level: Some("debug".to_string()),
			}),
			..Default::default()
		};
		base.merge(ServerConfigLayer::default());
		assert_eq!(base.logging.unwrap().level.as_deref(), Some("debug"));
	}
}
