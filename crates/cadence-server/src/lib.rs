// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Cadence code-frequency metrics server.
//!
//! This crate provides an HTTP API that fetches weekly code-frequency
//! statistics for a GitHub repository, stores them in SQLite and reports the
//! average number of days between weeks with additions and with deletions.

pub mod api;
pub mod api_docs;
pub mod error;
pub mod routes;
pub mod service;

pub use api::{create_app_state, create_router, github_stats_config, AppState};
pub use api_docs::ApiDoc;
pub use cadence_server_config::ServerConfig;
pub use error::{ErrorResponse, ServerError};
pub use service::{MetricsService, MetricsSummary};
