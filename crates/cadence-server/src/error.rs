// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use cadence_metrics_core::MetricsError;
use cadence_server_db::DbError;
use cadence_server_github::FetchError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Upstream statistics could not be fetched.
	#[error(transparent)]
	Fetch(#[from] FetchError),

	/// Metrics store operation failed.
	#[error(transparent)]
	Storage(#[from] DbError),

	/// Identifier validation or interval computation failed.
	#[error(transparent)]
	Metrics(#[from] MetricsError),

	#[error("Internal error: {0}")]
	Internal(String),
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

impl ServerError {
	/// Status code and machine-readable error code for this error.
	pub fn status_and_code(&self) -> (StatusCode, &'static str) {
		match self {
			ServerError::Fetch(e) => match e {
				FetchError::NoMetricsAvailable => (StatusCode::FORBIDDEN, "no_metrics"),
				FetchError::AccessDenied => (StatusCode::FORBIDDEN, "access_denied"),
				FetchError::ComputeTimeout => (StatusCode::BAD_REQUEST, "compute_timeout"),
				FetchError::InvalidResponse(_) => (StatusCode::BAD_GATEWAY, "invalid_upstream_response"),
				FetchError::Network(_) | FetchError::Config(_) => {
					(StatusCode::BAD_GATEWAY, "upstream_error")
				}
			},
			ServerError::Storage(_) => (StatusCode::BAD_REQUEST, "storage_error"),
			ServerError::Metrics(e) => match e {
				MetricsError::InvalidRepository(_) => (StatusCode::BAD_REQUEST, "invalid_repository"),
				MetricsError::InsufficientData => (StatusCode::BAD_REQUEST, "insufficient_data"),
				MetricsError::InvalidTimestamp(_) => (StatusCode::BAD_REQUEST, "invalid_timestamp"),
				MetricsError::MalformedKey(_) => (StatusCode::BAD_REQUEST, "storage_error"),
			},
			ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, code) = self.status_and_code();
		if status.is_server_error() {
			tracing::error!(error = %self, code, "request failed");
		} else {
			tracing::debug!(error = %self, code, "request rejected");
		}

		let body = ErrorResponse {
			error: code.to_string(),
			message: self.to_string(),
		};
		(status, Json(body)).into_response()
	}
}
