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

use super::latency_distribution::LatencyDistribution;
use super::query_length_point::QueryLengthPoint;
use crate::utils::{round_float, round_optional_float};
use serde::{Deserialize, Serialize};

/// Statistics of one batch, i.e. of one query length point.
///
/// Latency fields are `None` exactly when the point is degenerate, which
/// happens when not a single request of the batch succeeded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateStat {
    pub point: QueryLengthPoint,

    /// Number of attempted requests
    pub sample_count: u64,
    pub success_count: u64,
    pub failed_count: u64,
    pub timeout_count: u64,

    /// Wall clock window of the batch, first issue to last completion
    #[serde(serialize_with = "round_float")]
    pub window_secs: f64,

    #[serde(serialize_with = "round_optional_float")]
    pub mean_latency_ms: Option<f64>,
    #[serde(serialize_with = "round_optional_float")]
    pub p50_latency_ms: Option<f64>,
    #[serde(serialize_with = "round_optional_float")]
    pub p95_latency_ms: Option<f64>,
    #[serde(serialize_with = "round_optional_float")]
    pub p99_latency_ms: Option<f64>,
    #[serde(serialize_with = "round_optional_float")]
    pub min_latency_ms: Option<f64>,
    #[serde(serialize_with = "round_optional_float")]
    pub max_latency_ms: Option<f64>,
    #[serde(serialize_with = "round_optional_float")]
    pub std_dev_latency_ms: Option<f64>,
    #[serde(serialize_with = "round_optional_float")]
    pub mean_first_byte_ms: Option<f64>,

    #[serde(serialize_with = "round_float")]
    pub requests_per_sec: f64,
    #[serde(serialize_with = "round_float")]
    pub bytes_per_sec: f64,
    #[serde(serialize_with = "round_float")]
    pub mean_query_chars: f64,

    pub degenerate: bool,

    pub latency_distribution: Option<LatencyDistribution>,
}

impl AggregateStat {
    pub fn query_length(&self) -> u32 {
        self.point.query_length()
    }

    pub fn megabytes_per_sec(&self) -> f64 {
        self.bytes_per_sec / 1_000_000.0
    }
}
