// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Metrics computation configuration.

use cadence_metrics_core::SummaryUpdatePolicy;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsConfig {
	/// Whether recomputing an existing summary rewrites its averages.
	pub summary_update_policy: SummaryUpdatePolicy,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsConfigLayer {
	#[serde(default)]
	pub summary_update_policy: Option<SummaryUpdatePolicy>,
}

impl MetricsConfigLayer {
	pub fn merge(&mut self, other: MetricsConfigLayer) {
		if other.summary_update_policy.is_some() {
			self.summary_update_policy = other.summary_update_policy;
		}
	}

	pub fn finalize(self) -> MetricsConfig {
		MetricsConfig {
			summary_update_policy: self.summary_update_policy.unwrap_or_default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_to_refresh() {
		let config = MetricsConfigLayer::default().finalize();
		assert_eq!(config.summary_update_policy, SummaryUpdatePolicy::Refresh);
	}

	#[test]
	fn test_later_layer_wins() {
		let mut layer = MetricsConfigLayer::default();
		layer.merge(MetricsConfigLayer {
			summary_update_policy: Some(SummaryUpdatePolicy::Preserve),
		});
		assert_eq!(
			layer.finalize().summary_update_policy,
			SummaryUpdatePolicy::Preserve
		);
	}
}
