// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! GitHub code-frequency statistics client.
//!
//! GitHub computes repository statistics lazily: the first request for a
//! repository answers `202 Accepted` while a background job compiles the
//! data. [`GithubStatsClient`] polls the endpoint with a bounded
//! [`PollPolicy`](cadence_common_http::PollPolicy) until the weekly series
//! is ready or a terminal status is returned.

pub mod client;
pub mod config;
pub mod error;

pub use client::{CodeFrequencySource, GithubStatsClient};
pub use config::GithubStatsConfig;
pub use error::{FetchError, Result};
