// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Bounded polling with a fixed delay between "not ready yet" answers.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

/// Attempt budget and wait between attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
	/// Total attempts, including the first one.
	pub max_attempts: u32,
	/// Wait applied after an attempt reports [`PollStep::Wait`].
	pub delay: Duration,
}

impl Default for PollPolicy {
	fn default() -> Self {
		Self {
			max_attempts: 10,
			delay: Duration::from_secs(6),
		}
	}
}

impl PollPolicy {
	pub fn new(max_attempts: u32, delay: Duration) -> Self {
		Self {
			max_attempts,
			delay,
		}
	}
}

/// Outcome of a single poll attempt.
#[derive(Debug)]
pub enum PollStep<T, E> {
	/// The resource is ready; stop polling.
	Ready(T),
	/// Terminal failure; stop polling.
	Failed(E),
	/// Not ready yet; wait `delay` before the next attempt.
	Wait,
	/// Unrecognized outcome; try again without waiting.
	Continue,
}

/// Abstraction over sleeping so polling can be tested without real time.
#[async_trait]
pub trait Sleeper: Send + Sync {
	async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
	async fn sleep(&self, duration: Duration) {
		tokio::time::sleep(duration).await;
	}
}

/// Records requested sleeps and returns immediately.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
	calls: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
	pub fn new() -> Self {
		Self::default()
	}

	/// Every duration passed to `sleep`, in call order.
	pub fn calls(&self) -> Vec<Duration> {
		self.calls.lock().map(|c| c.clone()).unwrap_or_default()
	}

	pub fn count(&self) -> usize {
		self.calls().len()
	}
}

#[async_trait]
impl Sleeper for RecordingSleeper {
	async fn sleep(&self, duration: Duration) {
		if let Ok(mut calls) = self.calls.lock() {
			calls.push(duration);
		}
	}
}

/// Run `attempt` until it is ready, fails, or the policy's budget runs out.
///
/// `attempt` receives the 1-based attempt number. No wait follows the final
/// attempt. When the budget is spent, the error from `exhausted` is returned.
pub async fn poll<T, E, F, Fut>(
	policy: &PollPolicy,
	sleeper: &dyn Sleeper,
	exhausted: impl FnOnce() -> E,
	mut attempt: F,
) -> Result<T, E>
where
	F: FnMut(u32) -> Fut,
	Fut: Future<Output = PollStep<T, E>>,
{
	for n in 1..=policy.max_attempts {
		match attempt(n).await {
			PollStep::Ready(value) => return Ok(value),
			PollStep::Failed(err) => return Err(err),
			PollStep::Wait => {
				if n < policy.max_attempts {
					debug!(
						attempt = n,
						delay_ms = policy.delay.as_millis() as u64,
						"waiting before next poll"
					);
					sleeper.sleep(policy.delay).await;
				}
			}
			PollStep::Continue => {}
		}
	}
	Err(exhausted())
}
