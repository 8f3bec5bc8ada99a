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

use super::chart_kind::ChartKind;
use crate::error::ReportError;
use crate::types::aggregate_stat::AggregateStat;
use crate::types::sweep::SweepResult;
use serde::{Deserialize, Serialize};

pub const X_AXIS_LABEL: &str = "Query Length [words]";

/// Structured plot data of one chart, independent of the rendering backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartData {
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    /// Query lengths, ascending
    pub x: Vec<u32>,
    pub series: Vec<ChartSeries>,
    pub gaps: Vec<ChartGap>,
}

/// One curve. `values[i]` belongs to `x[i]`, `None` marks a gap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartGap {
    pub query_length: u32,
    pub reason: String,
}

#[derive(Debug, Clone, Copy)]
enum Metric {
    MeanLatency,
    P95Latency,
    P99Latency,
    MegabytesPerSec,
    RequestsPerSec,
}

impl Metric {
    fn series_name(&self) -> &'static str {
        match self {
            Metric::MeanLatency => "Mean [ms]",
            Metric::P95Latency => "P95 [ms]",
            Metric::P99Latency => "P99 [ms]",
            Metric::MegabytesPerSec => "Throughput [MB/s]",
            Metric::RequestsPerSec => "Throughput [req/s]",
        }
    }

    fn value(&self, stat: &AggregateStat) -> Option<f64> {
        match self {
            Metric::MeanLatency => stat.mean_latency_ms,
            Metric::P95Latency => stat.p95_latency_ms,
            Metric::P99Latency => stat.p99_latency_ms,
            Metric::MegabytesPerSec => Some(stat.megabytes_per_sec()),
            Metric::RequestsPerSec => Some(stat.requests_per_sec),
        }
    }
}

fn metrics_for(kind: ChartKind) -> &'static [Metric] {
    match kind {
        ChartKind::Latency => &[Metric::MeanLatency, Metric::P95Latency],
        ChartKind::BytesThroughput => &[Metric::MegabytesPerSec],
        ChartKind::RequestsThroughput => &[Metric::RequestsPerSec],
        ChartKind::DictionaryLatency => &[
            Metric::MeanLatency,
            Metric::P95Latency,
            Metric::P99Latency,
        ],
    }
}

/// Builds the plot data of `kind` from the sweep.
///
/// Degenerate and unmeasured points stay on the x axis with `None` values
/// and are listed in `gaps`, so they are never interpolated over.
pub fn chart_data(sweep: &SweepResult, kind: ChartKind) -> Result<ChartData, ReportError> {
    if sweep.is_empty() {
        return Err(ReportError::EmptyInput);
    }

    let entries = sweep.sorted_entries();
    let x = entries.iter().map(|e| e.query_length()).collect();

    let series = metrics_for(kind)
        .iter()
        .map(|metric| ChartSeries {
            name: metric.series_name().to_owned(),
            values: entries
                .iter()
                .map(|e| e.usable_stat().and_then(|stat| metric.value(stat)))
                .collect(),
        })
        .collect();

    let gaps = entries
        .iter()
        .filter_map(|e| {
            e.gap_reason().map(|reason| ChartGap {
                query_length: e.query_length(),
                reason: reason.to_owned(),
            })
        })
        .collect();

    Ok(ChartData {
        kind,
        x_label: X_AXIS_LABEL.to_owned(),
        y_label: kind.y_axis_label().to_owned(),
        x,
        series,
        gaps,
    })
}
