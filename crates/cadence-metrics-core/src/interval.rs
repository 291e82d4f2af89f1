// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Average day-gap between consecutive non-zero samples.

use chrono::{DateTime, NaiveDate};

use crate::error::{MetricsError, Result};
use crate::sample::RawSample;

/// Selects the additions column.
pub fn additions(sample: &RawSample) -> i64 {
	sample.additions
}

/// Selects the deletions column.
pub fn deletions(sample: &RawSample) -> i64 {
	sample.deletions
}

/// Mean number of days between successive non-zero values of `selector`.
///
/// `series` must already be sorted by ascending date. Each non-zero sample
/// pairs with the next non-zero sample after it; the last one has no
/// partner and contributes nothing. The mean is rounded to two decimals.
///
/// # Errors
/// Returns [`MetricsError::InsufficientData`] when fewer than two samples
/// are non-zero, and [`MetricsError::InvalidTimestamp`] for dates outside
/// the representable range.
pub fn average_interval<F>(series: &[RawSample], selector: F) -> Result<f64>
where
	F: Fn(&RawSample) -> i64,
{
	let active: Vec<i64> = series
		.iter()
		.filter(|sample| selector(sample) != 0)
		.map(|sample| sample.date)
		.collect();

	if active.len() < 2 {
		return Err(MetricsError::InsufficientData);
	}

	let gaps = active
		.windows(2)
		.map(|pair| day_gap(pair[0], pair[1]))
		.collect::<Result<Vec<i64>>>()?;

	let mean = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;
	Ok(round_hundredths(mean))
}

/// Whole calendar days between two unix timestamps, compared as UTC dates.
pub fn day_gap(from: i64, to: i64) -> Result<i64> {
	Ok((utc_date(to)? - utc_date(from)?).num_days())
}

fn utc_date(timestamp: i64) -> Result<NaiveDate> {
	DateTime::from_timestamp(timestamp, 0)
		.map(|dt| dt.date_naive())
		.ok_or(MetricsError::InvalidTimestamp(timestamp))
}

fn round_hundredths(value: f64) -> f64 {
	(value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
	use super::*;

	const DAY: i64 = 86_400;
	const WEEK: i64 = 7 * DAY;

	fn sample(day: i64, value: i64) -> RawSample {
		RawSample::new(day * DAY, value, -value)
	}

	#[test]
	fn test_single_non_zero_sample_is_insufficient() {
		let series = vec![sample(0, 0), sample(7, 12), sample(14, 0)];
		assert_eq!(
			average_interval(&series, additions),
			Err(MetricsError::InsufficientData)
		);
	}

	#[test]
	fn test_empty_series_is_insufficient() {
		assert_eq!(
			average_interval(&[], additions),
			Err(MetricsError::InsufficientData)
		);
	}

	#[test]
	fn test_skips_zero_samples_between_events() {
		let series = vec![sample(0, 5), sample(1, 0), sample(3, 7)];
		assert_eq!(average_interval(&series, additions).unwrap(), 3.0);
	}

	#[test]
	fn test_weekly_series() {
		let series: Vec<RawSample> = [10, 0, 4, 9, 0, 0, 1]
			.iter()
			.enumerate()
			.map(|(week, &v)| RawSample::new(1_302_998_400 + week as i64 * WEEK, v, 0))
			.collect();
		// gaps: 14, 7, 21
		assert_eq!(average_interval(&series, additions).unwrap(), 14.0);
	}

	#[test]
	fn test_rounds_to_two_decimals() {
		let series = vec![sample(0, 1), sample(7, 1), sample(14, 1), sample(28, 1)];
		// gaps: 7, 7, 14
		assert_eq!(average_interval(&series, additions).unwrap(), 9.33);
	}

	#[test]
	fn test_deletions_selector_reads_negative_counts() {
		let series = vec![
			RawSample::new(0, 3, -1),
			RawSample::new(2 * DAY, 0, -4),
			RawSample::new(4 * DAY, 8, 0),
		];
		assert_eq!(average_interval(&series, deletions).unwrap(), 2.0);
		assert_eq!(average_interval(&series, additions).unwrap(), 4.0);
	}

	#[test]
	fn test_day_gap_uses_calendar_dates() {
		let late_evening = 23 * 3600 + 59 * 60;
		let next_morning = DAY + 60;
		assert_eq!(day_gap(late_evening, next_morning).unwrap(), 1);
		assert_eq!(day_gap(60, DAY - 60).unwrap(), 0);
	}

	#[test]
	fn test_out_of_range_timestamp() {
		let series = vec![RawSample::new(0, 1, 0), RawSample::new(i64::MAX, 1, 0)];
		assert_eq!(
			average_interval(&series, additions),
			Err(MetricsError::InvalidTimestamp(i64::MAX))
		);
	}
}
