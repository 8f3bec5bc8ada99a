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

use super::sweep::SweepEntry;
use crate::utils::round_optional_float;
use serde::{Deserialize, Serialize};

/// Flat per-point record, written one per line to `points.jsonl`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointRecord {
    pub query_length: u32,
    pub status: PointStatus,
    #[serde(serialize_with = "round_optional_float")]
    pub mean_latency_ms: Option<f64>,
    #[serde(serialize_with = "round_optional_float")]
    pub p95_latency_ms: Option<f64>,
    #[serde(serialize_with = "round_optional_float")]
    pub requests_per_sec: Option<f64>,
    #[serde(serialize_with = "round_optional_float")]
    pub bytes_per_sec: Option<f64>,
    pub sample_count: u64,
    pub degenerate: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PointStatus {
    Measured,
    NoData,
}

impl From<&SweepEntry> for PointRecord {
    fn from(entry: &SweepEntry) -> Self {
        match entry {
            SweepEntry::Measured(stat) => PointRecord {
                query_length: stat.query_length(),
                status: PointStatus::Measured,
                mean_latency_ms: stat.mean_latency_ms,
                p95_latency_ms: stat.p95_latency_ms,
                requests_per_sec: Some(stat.requests_per_sec),
                bytes_per_sec: Some(stat.bytes_per_sec),
                sample_count: stat.sample_count,
                degenerate: stat.degenerate,
                reason: None,
            },
            SweepEntry::NoData(missing) => PointRecord {
                query_length: missing.point.query_length(),
                status: PointStatus::NoData,
                mean_latency_ms: None,
                p95_latency_ms: None,
                requests_per_sec: None,
                bytes_per_sec: None,
                sample_count: 0,
                degenerate: false,
                reason: Some(missing.reason.clone()),
            },
        }
    }
}
