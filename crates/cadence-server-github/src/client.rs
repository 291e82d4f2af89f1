// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Code-frequency client implementation.

use std::sync::Arc;

use async_trait::async_trait;
use cadence_common_http::{poll, PollStep, Sleeper, TokioSleeper};
use cadence_metrics_core::{RawSample, RepoId};
use reqwest::{header, Client, StatusCode};
use tracing::{debug, info, instrument, warn};

use crate::config::GithubStatsConfig;
use crate::error::{FetchError, Result};

/// Source of weekly code-frequency samples for a repository.
#[async_trait]
pub trait CodeFrequencySource: Send + Sync {
	/// Fetch the weekly `(date, additions, deletions)` series, oldest first.
	async fn fetch(&self, repo: &RepoId) -> Result<Vec<RawSample>>;
}

/// Client for `GET /repos/{owner}/{repo}/stats/code_frequency`.
pub struct GithubStatsClient {
	config: GithubStatsConfig,
	http: Client,
	sleeper: Arc<dyn Sleeper>,
}

impl GithubStatsClient {
	pub fn new(config: GithubStatsConfig) -> Result<Self> {
		let http = cadence_common_http::builder()
			.timeout(config.request_timeout)
			.build()?;

		info!(
			base_url = %config.base_url(),
			max_attempts = config.poll_policy.max_attempts,
			"Initialized GitHub stats client"
		);

		Ok(Self {
			config,
			http,
			sleeper: Arc::new(TokioSleeper),
		})
	}

	/// Replace the sleep used between polls.
	pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
		self.sleeper = sleeper;
		self
	}

	pub fn config(&self) -> &GithubStatsConfig {
		&self.config
	}

	fn stats_url(&self, repo: &RepoId) -> String {
		format!(
			"{}/repos/{}/{}/stats/code_frequency",
			self.config.base_url().as_str().trim_end_matches('/'),
			repo.owner(),
			repo.name()
		)
	}

	async fn attempt(
		&self,
		url: &str,
		repo: &RepoId,
		attempt: u32,
	) -> PollStep<Vec<RawSample>, FetchError> {
		let mut request = self
			.http
			.get(url)
			.header(header::ACCEPT, "application/vnd.github+json");
		if let Some(token) = self.config.token() {
			request = request.bearer_auth(token.expose());
		}

		let response = match request.send().await {
			Ok(response) => response,
			Err(e) => {
				warn!(repo = %repo, attempt, error = %e, "code frequency request failed");
				return PollStep::Continue;
			}
		};

		match response.status() {
			StatusCode::NO_CONTENT => PollStep::Failed(FetchError::NoMetricsAvailable),
			StatusCode::FORBIDDEN => PollStep::Failed(FetchError::AccessDenied),
			StatusCode::ACCEPTED => {
				info!(
					owner = repo.owner(),
					repo = repo.name(),
					attempt,
					"Statistics are being compiled"
				);
				PollStep::Wait
			}
			StatusCode::OK => match response.json::<Vec<RawSample>>().await {
				Ok(samples) => {
					debug!(repo = %repo, count = samples.len(), "fetched code frequency");
					PollStep::Ready(samples)
				}
				Err(e) => PollStep::Failed(FetchError::InvalidResponse(e.to_string())),
			},
			status => {
				warn!(
					repo = %repo,
					attempt,
					status = %status,
					"unexpected status from code frequency endpoint"
				);
				PollStep::Continue
			}
		}
	}
}

#[async_trait]
impl CodeFrequencySource for GithubStatsClient {
	#[instrument(skip(self), fields(repo = %repo))]
	async fn fetch(&self, repo: &RepoId) -> Result<Vec<RawSample>> {
		let url = self.stats_url(repo);
		let url = url.as_str();
		poll(
			&self.config.poll_policy,
			self.sleeper.as_ref(),
			|| FetchError::ComputeTimeout,
			move |n| self.attempt(url, repo, n),
		)
		.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use cadence_common_http::{PollPolicy, RecordingSleeper};
	use std::time::Duration;
	use wiremock::matchers::{header, header_exists, method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	const STATS_PATH: &str = "/repos/octo-org/hello-world/stats/code_frequency";

	fn repo() -> RepoId {
		RepoId::new("octo-org", "hello-world").unwrap()
	}

	fn client_for(
		base_url: &str,
		config: GithubStatsConfig,
	) -> (GithubStatsClient, RecordingSleeper) {
		let config = config.with_base_url(base_url).unwrap();
		let sleeper = RecordingSleeper::new();
		let client = GithubStatsClient::new(config)
			.unwrap()
			.with_sleeper(Arc::new(sleeper.clone()));
		(client, sleeper)
	}

	async fn request_count(server: &MockServer) -> usize {
		server.received_requests().await.unwrap().len()
	}

	#[tokio::test]
	async fn test_polls_until_compiled() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path(STATS_PATH))
			.respond_with(ResponseTemplate::new(202))
			.up_to_n_times(3)
			.mount(&server)
			.await;
		Mock::given(method("GET"))
			.and(path(STATS_PATH))
			.respond_with(
				ResponseTemplate::new(200).set_body_json(serde_json::json!([
					[1302998400, 1124, -435],
					[1303603200, 0, 0]
				])),
			)
			.mount(&server)
			.await;

		let (client, sleeper) = client_for(&server.uri(), GithubStatsConfig::new());
		let samples = client.fetch(&repo()).await.unwrap();

		assert_eq!(
			samples,
			vec![
				RawSample::new(1302998400, 1124, -435),
				RawSample::new(1303603200, 0, 0)
			]
		);
		assert_eq!(request_count(&server).await, 4);
		assert_eq!(sleeper.calls(), vec![Duration::from_secs(6); 3]);
	}

	#[tokio::test]
	async fn test_forbidden_fails_on_first_attempt() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path(STATS_PATH))
			.respond_with(ResponseTemplate::new(403))
			.mount(&server)
			.await;

		let (client, sleeper) = client_for(&server.uri(), GithubStatsConfig::new());
		let result = client.fetch(&repo()).await;

		assert!(matches!(result, Err(FetchError::AccessDenied)));
		assert_eq!(request_count(&server).await, 1);
		assert_eq!(sleeper.count(), 0);
	}

	#[tokio::test]
	async fn test_no_content_means_no_metrics() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path(STATS_PATH))
			.respond_with(ResponseTemplate::new(204))
			.mount(&server)
			.await;

		let (client, _sleeper) = client_for(&server.uri(), GithubStatsConfig::new());
		let result = client.fetch(&repo()).await;

		assert!(matches!(result, Err(FetchError::NoMetricsAvailable)));
		assert_eq!(request_count(&server).await, 1);
	}

	#[tokio::test]
	async fn test_gives_up_after_poll_budget() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path(STATS_PATH))
			.respond_with(ResponseTemplate::new(202))
			.mount(&server)
			.await;

		let (client, sleeper) = client_for(&server.uri(), GithubStatsConfig::new());
		let result = client.fetch(&repo()).await;

		assert!(matches!(result, Err(FetchError::ComputeTimeout)));
		assert_eq!(request_count(&server).await, 10);
		assert_eq!(sleeper.count(), 9);
	}

	#[tokio::test]
	async fn test_unexpected_status_retries_without_waiting() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path(STATS_PATH))
			.respond_with(ResponseTemplate::new(502))
			.up_to_n_times(1)
			.mount(&server)
			.await;
		Mock::given(method("GET"))
			.and(path(STATS_PATH))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
			.mount(&server)
			.await;

		let (client, sleeper) = client_for(&server.uri(), GithubStatsConfig::new());
		let samples = client.fetch(&repo()).await.unwrap();

		assert!(samples.is_empty());
		assert_eq!(request_count(&server).await, 2);
		assert_eq!(sleeper.count(), 0);
	}

	#[tokio::test]
	async fn test_malformed_body_is_invalid_response() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path(STATS_PATH))
			.respond_with(
				ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "nope"})),
			)
			.mount(&server)
			.await;

		let (client, _sleeper) = client_for(&server.uri(), GithubStatsConfig::new());
		let result = client.fetch(&repo()).await;

		assert!(matches!(result, Err(FetchError::InvalidResponse(_))));
	}

	#[tokio::test]
	async fn test_sends_token_and_user_agent() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path(STATS_PATH))
			.and(header("authorization", "Bearer ghp_test"))
			.and(header("accept", "application/vnd.github+json"))
			.and(header_exists("user-agent"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
			.expect(1)
			.mount(&server)
			.await;

		let config = GithubStatsConfig::new().with_token("ghp_test");
		let (client, _sleeper) = client_for(&server.uri(), config);
		assert!(client.fetch(&repo()).await.is_ok());
	}

	#[tokio::test]
	async fn test_transport_errors_exhaust_budget() {
		let config = GithubStatsConfig::new()
			.with_request_timeout(Duration::from_millis(200))
			.with_poll_policy(PollPolicy::new(3, Duration::from_secs(6)));
		let (client, sleeper) = client_for("http://127.0.0.1:1", config);
		let result = client.fetch(&repo()).await;

		assert!(matches!(result, Err(FetchError::ComputeTimeout)));
		assert_eq!(sleeper.count(), 0);
	}

	#[test]
	fn test_stats_url_respects_base_path() {
		let config = GithubStatsConfig::new()
			.with_base_url("https://github.example.com/api/v3/")
			.unwrap();
		let client = GithubStatsClient::new(config).unwrap();
		assert_eq!(
			client.stats_url(&repo()),
			"https://github.example.com/api/v3/repos/octo-org/hello-world/stats/code_frequency"
		);
	}
}
