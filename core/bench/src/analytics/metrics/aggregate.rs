/* Licensed to the Apache Software Foundation (ASF) under one
 * or more contributor license agreements.  See the NOTICE file
 * distributed with this work for additional information
 * regarding copyright ownership.  The ASF licenses this file
 * to you under the Apache License, Version 2.0 (the
 * "License"); you may not use this file except in compliance
 * with the License.  You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing,
 * software distributed under the License is distributed on an
 * "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
 * KIND, either express or implied.  See the License for the
 * specific language governing permissions and limitations
 * under the License.
 */

#![allow(clippy::cast_precision_loss)]

use super::latency_distribution::compute_latency_distribution;
use crate::analytics::record::RequestSample;
use bench_report::aggregate_stat::AggregateStat;
use bench_report::query_length_point::QueryLengthPoint;
use bench_report::utils::{max, min, std_dev};
use std::time::Duration;
use tracing::warn;

/// Wall clock window of a batch: first issue to last completion.
///
/// Failed requests count too, so a batch where half of the requests time
/// out spans until the last timeout fired.
pub fn batch_window(samples: &[RequestSample]) -> Duration {
    let first_sent = samples.iter().map(|s| s.sent_us).min();
    let last_completed = samples.iter().map(|s| s.completed_us).max();

    match (first_sent, last_completed) {
        (Some(first), Some(last)) => Duration::from_micros(last.saturating_sub(first)),
        _ => Duration::ZERO,
    }
}

/// Reduces the samples of one batch to its statistics.
///
/// Latency covers successful requests only. Rates divide by `window`, the
/// whole batch window, and are zero when the window is empty.
pub fn aggregate(
    samples: &[RequestSample],
    point: QueryLengthPoint,
    window: Duration,
) -> AggregateStat {
    let sample_count = samples.len() as u64;
    let success_count = samples.iter().filter(|s| s.is_success()).count() as u64;
    let timeout_count = samples.iter().filter(|s| s.is_timeout()).count() as u64;
    let failed_count = sample_count - success_count;
    let window_secs = window.as_secs_f64();

    let mean_query_chars = if samples.is_empty() {
        0.0
    } else {
        samples.iter().map(|s| f64::from(s.query_chars)).sum::<f64>() / sample_count as f64
    };

    let mut latencies_ms: Vec<f64> = samples
        .iter()
        .filter_map(RequestSample::latency_us)
        .map(|us| us as f64 / 1_000.0)
        .collect();

    if latencies_ms.is_empty() {
        warn!(
            "Query length {} produced no successful requests out of {} ({} timed out), latency is undefined",
            point.query_length(),
            sample_count,
            timeout_count
        );
        return degenerate(
            point,
            sample_count,
            failed_count,
            timeout_count,
            window_secs,
            mean_query_chars,
        );
    }

    latencies_ms.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let bytes_received: u64 = samples
        .iter()
        .filter(|s| s.is_success())
        .filter_map(|s| s.bytes_received)
        .sum();

    let (requests_per_sec, bytes_per_sec) = if window_secs > 0.0 {
        (
            success_count as f64 / window_secs,
            bytes_received as f64 / window_secs,
        )
    } else {
        (0.0, 0.0)
    };

    let first_byte_ms: Vec<f64> = samples
        .iter()
        .filter(|s| s.is_success())
        .filter_map(|s| {
            s.first_byte_us
                .or(s.last_byte_us)
                .map(|fb| fb.saturating_sub(s.sent_us) as f64 / 1_000.0)
        })
        .collect();

    AggregateStat {
        point,
        sample_count,
        success_count,
        failed_count,
        timeout_count,
        window_secs,
        mean_latency_ms: Some(mean(&latencies_ms)),
        p50_latency_ms: Some(calculate_percentile(&latencies_ms, 50.0)),
        p95_latency_ms: Some(calculate_percentile(&latencies_ms, 95.0)),
        p99_latency_ms: Some(calculate_percentile(&latencies_ms, 99.0)),
        min_latency_ms: min(&latencies_ms),
        max_latency_ms: max(&latencies_ms),
        std_dev_latency_ms: Some(std_dev(&latencies_ms).unwrap_or(0.0)),
        mean_first_byte_ms: Some(mean(&first_byte_ms)),
        requests_per_sec,
        bytes_per_sec,
        mean_query_chars,
        degenerate: false,
        latency_distribution: Some(compute_latency_distribution(&latencies_ms)),
    }
}

fn degenerate(
    point: QueryLengthPoint,
    sample_count: u64,
    failed_count: u64,
    timeout_count: u64,
    window_secs: f64,
    mean_query_chars: f64,
) -> AggregateStat {
    AggregateStat {
        point,
        sample_count,
        success_count: 0,
        failed_count,
        timeout_count,
        window_secs,
        mean_latency_ms: None,
        p50_latency_ms: None,
        p95_latency_ms: None,
        p99_latency_ms: None,
        min_latency_ms: None,
        max_latency_ms: None,
        std_dev_latency_ms: None,
        mean_first_byte_ms: None,
        requests_per_sec: 0.0,
        bytes_per_sec: 0.0,
        mean_query_chars,
        degenerate: true,
        latency_distribution: None,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn calculate_percentile(sorted_data: &[f64], percentile: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }

    let rank = percentile / 100.0 * (sorted_data.len() - 1) as f64;
    let lower = rank.floor().clamp(0.0, (sorted_data.len() - 1) as f64) as usize;
    let upper = rank.ceil().clamp(0.0, (sorted_data.len() - 1) as f64) as usize;

    let weight = rank - lower as f64;
    sorted_data[lower].mul_add(1.0 - weight, sorted_data[upper] * weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::record::FailureKind;
    use bench_report::sweep::{SweepEntry, SweepResult};

    fn point(query_length: u32) -> QueryLengthPoint {
        QueryLengthPoint::new(query_length, "inline")
    }

    /// `count` successful requests issued back to back, each taking `latency_us`.
    fn successes(count: u64, latency_us: u64, bytes: u64) -> Vec<RequestSample> {
        (0..count)
            .map(|i| {
                let sent = i * 1_000;
                RequestSample::success(sent, sent + latency_us / 2, sent + latency_us, bytes, 10)
            })
            .collect()
    }

    #[test]
    fn aggregation_is_idempotent() {
        let samples = successes(50, 3_000, 512);
        let window = batch_window(&samples);

        let first = aggregate(&samples, point(3), window);
        let second = aggregate(&samples, point(3), window);

        assert_eq!(first, second);
    }

    #[test]
    fn rates_are_non_negative_and_grow_with_successes_for_a_fixed_window() {
        let window = Duration::from_secs(1);
        let mut previous = 0.0;
        for count in [1, 10, 100] {
            let stat = aggregate(&successes(count, 1_000, 100), point(1), window);
            assert!(stat.requests_per_sec >= 0.0);
            assert!(stat.bytes_per_sec >= 0.0);
            assert!(stat.requests_per_sec > previous);
            previous = stat.requests_per_sec;
        }
    }

    #[test]
    fn zero_successes_is_degenerate() {
        let samples: Vec<RequestSample> = (0..5)
            .map(|i| RequestSample::failure(i * 10, i * 10 + 500, 4, FailureKind::Timeout))
            .collect();

        let stat = aggregate(&samples, point(2), batch_window(&samples));

        assert!(stat.degenerate);
        assert_eq!(stat.sample_count, 5);
        assert_eq!(stat.timeout_count, 5);
        assert_eq!(stat.mean_latency_ms, None);
        assert_eq!(stat.p95_latency_ms, None);
        assert_eq!(stat.requests_per_sec, 0.0);
        assert_eq!(stat.bytes_per_sec, 0.0);
        assert!(stat.latency_distribution.is_none());
    }

    #[test]
    fn empty_batch_is_degenerate_with_zero_window() {
        let stat = aggregate(&[], point(1), batch_window(&[]));
        assert!(stat.degenerate);
        assert_eq!(stat.window_secs, 0.0);
        assert_eq!(stat.sample_count, 0);
    }

    #[test]
    fn half_timeouts_divide_by_the_full_window() {
        let mut samples = Vec::new();
        for i in 0..10 {
            let sent = i * 1_000;
            samples.push(RequestSample::success(sent, sent + 500, sent + 1_000, 100, 8));
        }
        for i in 0..10 {
            samples.push(RequestSample::failure(
                i * 1_000,
                2_000_000,
                8,
                FailureKind::Timeout,
            ));
        }

        let window = batch_window(&samples);
        assert_eq!(window, Duration::from_secs(2));

        let stat = aggregate(&samples, point(4), window);
        assert!(!stat.degenerate);
        assert_eq!(stat.success_count, 10);
        assert_eq!(stat.timeout_count, 10);
        assert!((stat.requests_per_sec - 5.0).abs() < 1e-9);
        assert!((stat.bytes_per_sec - 500.0).abs() < 1e-9);
        assert_eq!(stat.mean_latency_ms, Some(1.0));
    }

    #[test]
    fn linearly_growing_latency_is_strictly_increasing_after_sort() {
        let mut sweep = SweepResult::new();
        for query_length in [50u32, 1, 10, 5] {
            let latency_us = 1_000 + u64::from(query_length) * 200;
            let samples = successes(100, latency_us, 256);
            let stat = aggregate(&samples, point(query_length), batch_window(&samples));
            sweep.insert(SweepEntry::Measured(stat)).unwrap();
        }

        let means: Vec<f64> = sweep
            .sorted_entries()
            .iter()
            .filter_map(|e| e.usable_stat().and_then(|s| s.mean_latency_ms))
            .collect();

        assert_eq!(means.len(), 4);
        assert!(means.windows(2).all(|w| w[0] < w[1]), "{means:?}");
    }

    #[test]
    fn percentiles_interpolate_linearly() {
        let sorted = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(calculate_percentile(&sorted, 0.0), 10.0);
        assert_eq!(calculate_percentile(&sorted, 50.0), 25.0);
        assert_eq!(calculate_percentile(&sorted, 100.0), 40.0);
        assert_eq!(calculate_percentile(&[], 95.0), 0.0);
    }
}
