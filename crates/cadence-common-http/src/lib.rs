// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for Cadence.
//!
//! This crate provides:
//! - A pre-configured HTTP client builder with consistent User-Agent header
//! - A bounded, fixed-delay polling loop with an injectable sleep

mod client;
mod poll;

pub use client::{builder, user_agent};
pub use poll::{poll, PollPolicy, PollStep, RecordingSleeper, Sleeper, TokioSleeper};
