// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! OpenAPI documentation for cadence-server.

use utoipa::OpenApi;

/// Served as JSON at `/docs/openapi.json`, with Swagger UI at `/docs`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cadence Server API",
        version = "1.0.0",
        description = "Average intervals between code additions and deletions for GitHub repositories, computed from weekly code-frequency statistics.",
        license(name = "Proprietary")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "metrics", description = "Repository code-frequency interval metrics"),
        (name = "health", description = "Health checks")
    ),
    paths(
        crate::routes::metrics::list_metrics,
        crate::routes::metrics::get_repo_metrics,
        crate::routes::health::health_check,
    ),
    components(schemas(
        crate::service::MetricsSummary,
        crate::error::ErrorResponse,
        crate::routes::health::HealthResponse,
        crate::routes::health::HealthStatus,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_openapi_spec_generates_valid_json() {
		let spec = ApiDoc::openapi();
		let json = serde_json::to_string_pretty(&spec).expect("should serialize to JSON");

		assert!(json.contains("\"openapi\""));
		assert!(json.contains("Cadence Server API"));
	}

	#[test]
	fn test_openapi_spec_has_documented_paths() {
		let spec = ApiDoc::openapi();
		let json = serde_json::to_string(&spec).expect("should serialize");

		for path in ["/metrics/all", "/metrics/{owner}/{repo}", "/health"] {
			assert!(json.contains(path), "Missing path: {path}");
		}
		assert!(json.contains("Average_addition"));
	}
}
