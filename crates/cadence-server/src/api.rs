// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Router and shared application state.

use std::sync::Arc;

use axum::{routing::get, Router};
use cadence_common_http::PollPolicy;
use cadence_server_config::{GithubConfig, ServerConfig};
use cadence_server_db::SqliteMetricsRepository;
use cadence_server_github::{FetchError, GithubStatsClient, GithubStatsConfig};
use sqlx::SqlitePool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{error::ServerError, routes, service::MetricsService};

#[derive(Clone)]
pub struct AppState {
	pub metrics: Arc<MetricsService>,
}

impl AppState {
	pub fn new(metrics: MetricsService) -> Self {
		Self {
			metrics: Arc::new(metrics),
		}
	}
}

/// Translate the `github` config section into client settings.
pub fn github_stats_config(config: &GithubConfig) -> Result<GithubStatsConfig, FetchError> {
	let mut stats = GithubStatsConfig::new()
		.with_base_url(&config.base_url)?
		.with_request_timeout(config.request_timeout())
		.with_poll_policy(PollPolicy::new(config.poll_attempts, config.poll_delay()));
	if let Some(token) = &config.token {
		stats = stats.with_token(token.clone());
	}
	Ok(stats)
}

/// Wire the GitHub client and SQLite store into application state.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> Result<AppState, ServerError> {
	let client = GithubStatsClient::new(github_stats_config(&config.github)?)?;
	let store = SqliteMetricsRepository::new(pool, config.metrics.summary_update_policy);

	Ok(AppState::new(MetricsService::new(
		Arc::new(client),
		Arc::new(store),
	)))
}

pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/", get(routes::root))
		.route("/metrics/all", get(routes::metrics::list_metrics))
		.route(
			"/metrics/{owner}/{repo}",
			get(routes::metrics::get_repo_metrics),
		)
		.route("/health", get(routes::health::health_check))
		.with_state(state)
		.merge(SwaggerUi::new("/docs").url("/docs/openapi.json", crate::api_docs::ApiDoc::openapi()))
}
