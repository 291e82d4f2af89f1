// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod database;
mod github;
mod http;
mod logging;
mod metrics;

pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use github::{GithubConfig, GithubConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use metrics::{MetricsConfig, MetricsConfigLayer};
