// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use axum::{
	extract::{Path, State},
	Json,
};

use crate::{
	api::AppState,
	error::{ErrorResponse, ServerError},
	service::MetricsSummary,
};

#[utoipa::path(
    get,
    path = "/metrics/all",
    responses(
        (status = 200, description = "Summaries for every computed repository", body = [MetricsSummary]),
        (status = 400, description = "No summaries have been computed yet", body = ErrorResponse)
    ),
    tag = "metrics"
)]
/// GET /metrics/all - List every stored summary.
pub async fn list_metrics(
	State(state): State<AppState>,
) -> Result<Json<Vec<MetricsSummary>>, ServerError> {
	Ok(Json(state.metrics.list().await?))
}

#[utoipa::path(
    get,
    path = "/metrics/{owner}/{repo}",
    params(
        ("owner" = String, Path, description = "Repository owner"),
        ("repo" = String, Path, description = "Repository name")
    ),
    responses(
        (status = 200, description = "Recomputed summary for the repository", body = MetricsSummary),
        (status = 400, description = "Invalid repository, storage failure, insufficient data or upstream still compiling", body = ErrorResponse),
        (status = 403, description = "No historical metrics, or upstream access denied", body = ErrorResponse),
        (status = 502, description = "Upstream returned an unusable response", body = ErrorResponse)
    ),
    tag = "metrics"
)]
/// GET /metrics/{owner}/{repo} - Fetch, store and summarize a repository.
///
/// Blocks while the upstream provider compiles statistics, up to the
/// configured poll budget.
pub async fn get_repo_metrics(
	State(state): State<AppState>,
	Path((owner, repo)): Path<(String, String)>,
) -> Result<Json<MetricsSummary>, ServerError> {
	Ok(Json(state.metrics.refresh(&owner, &repo).await?))
}
