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

use super::aggregate::calculate_percentile;
use bench_report::latency_distribution::{
    DistributionPercentiles, HistogramBin, LatencyDistribution, LogNormalParams,
};

const MAX_BINS: usize = 50;
const MIN_BINS: usize = 5;

/// Upper histogram range, as a multiple of P99.
const RANGE_FACTOR: f64 = 1.5;

/// Builds the latency histogram of one batch from its sorted,
/// non-empty request latencies (ms).
///
/// The range is `[min, P99 * 1.5]`. Small batches get fewer bins, roughly
/// the square root of the sample count, so a batch of ten requests is not
/// spread over fifty mostly empty bins.
pub fn compute_latency_distribution(sorted_latencies_ms: &[f64]) -> LatencyDistribution {
    let percentiles = DistributionPercentiles {
        p05_ms: calculate_percentile(sorted_latencies_ms, 5.0),
        p50_ms: calculate_percentile(sorted_latencies_ms, 50.0),
        p95_ms: calculate_percentile(sorted_latencies_ms, 95.0),
        p99_ms: calculate_percentile(sorted_latencies_ms, 99.0),
    };

    LatencyDistribution {
        bins: histogram(sorted_latencies_ms, percentiles.p99_ms),
        log_normal_params: fit_log_normal(sorted_latencies_ms),
        percentiles,
    }
}

fn bin_count(samples: usize) -> usize {
    ((samples as f64).sqrt().ceil() as usize).clamp(MIN_BINS, MAX_BINS)
}

/// Density histogram, `count / (samples * bin_width)` per bin.
/// Latencies above the range land in the last bin.
fn histogram(sorted: &[f64], p99: f64) -> Vec<HistogramBin> {
    let (Some(&lowest), Some(&highest)) = (sorted.first(), sorted.last()) else {
        return Vec::new();
    };
    let upper_limit = (p99 * RANGE_FACTOR).min(highest);

    if upper_limit <= lowest {
        return vec![HistogramBin {
            edge_ms: lowest,
            density: 1.0,
        }];
    }

    let bins = bin_count(sorted.len());
    let width = (upper_limit - lowest) / bins as f64;
    let total = sorted.len() as f64;

    let mut counts = vec![0u64; bins];
    for &latency in sorted {
        let idx = ((latency - lowest) / width) as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            edge_ms: (i as f64).mul_add(width, lowest),
            density: count as f64 / (total * width),
        })
        .collect()
}

/// Maximum likelihood log-normal fit over the positive latencies.
fn fit_log_normal(sorted: &[f64]) -> LogNormalParams {
    let logs: Vec<f64> = sorted.iter().filter(|&&x| x > 0.0).map(|x| x.ln()).collect();

    if logs.is_empty() {
        return LogNormalParams {
            mu: 0.0,
            sigma: 0.0,
        };
    }

    let n = logs.len() as f64;
    let mu = logs.iter().sum::<f64>() / n;
    let variance = logs.iter().map(|l| (l - mu).powi(2)).sum::<f64>() / n;

    LogNormalParams {
        mu,
        sigma: variance.sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_area_is_close_to_one() {
        let samples: Vec<f64> = (1..=2_500).map(|i| f64::from(i) * 0.04).collect();

        let dist = compute_latency_distribution(&samples);

        assert_eq!(dist.bins.len(), MAX_BINS);
        let width = dist.bin_width_ms();
        let area: f64 = dist.bins.iter().map(|b| b.density * width).sum();
        assert!(area > 0.9 && area < 1.2, "area {area}");
    }

    #[test]
    fn small_batches_use_fewer_bins() {
        let samples: Vec<f64> = (1..=10).map(f64::from).collect();
        let dist = compute_latency_distribution(&samples);
        assert_eq!(dist.bins.len(), MIN_BINS);

        let counted: f64 = dist
            .bins
            .iter()
            .map(|b| b.density * dist.bin_width_ms() * 10.0)
            .sum();
        assert!((counted - 10.0).abs() < 1e-9);
    }

    #[test]
    fn large_batches_are_capped_at_fifty_bins() {
        let samples: Vec<f64> = (1..=10_000).map(f64::from).collect();
        let dist = compute_latency_distribution(&samples);
        assert_eq!(dist.bins.len(), MAX_BINS);
    }

    #[test]
    fn constant_latency_collapses_to_one_bin() {
        let dist = compute_latency_distribution(&[12.5; 40]);

        assert_eq!(dist.bins.len(), 1);
        assert_eq!(dist.percentiles.p50_ms, 12.5);
        assert!(dist.log_normal_params.sigma < 1e-9);
    }

    #[test]
    fn log_normal_fit_recovers_median() {
        let samples: Vec<f64> = (1..=999).map(|i| f64::from(i) / 100.0).collect();
        let dist = compute_latency_distribution(&samples);

        assert!(dist.log_normal_params.sigma > 0.0);
        assert!(dist.percentiles.p05_ms < dist.percentiles.p95_ms);
        assert!(dist.log_normal_params.mu.exp() < dist.percentiles.p50_ms);
    }
}
