// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP route handlers.

pub mod health;
pub mod metrics;

use axum::response::Redirect;

/// GET / - Redirect to the interactive API documentation.
pub async fn root() -> Redirect {
	Redirect::temporary("/docs")
}
