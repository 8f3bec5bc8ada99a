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

use super::query_mode::QueryMode;
use serde::{Deserialize, Serialize};

/// Configuration of the sweep as it was run, echoed into the report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SweepParams {
    pub server_address: String,
    pub path: String,
    pub query_param: String,
    pub dictionary: String,
    pub dictionary_size: u32,
    pub sorted_by_frequency: bool,
    pub query_mode: QueryMode,
    pub query_lengths: Vec<u32>,
    /// Requests per point, `None` when the batch is bounded by duration
    pub samples: Option<u64>,
    /// Batch duration in humantime format, `None` when bounded by count
    pub duration: Option<String>,
    pub concurrency: u32,
    pub request_timeout: String,
    pub warmup: Option<String>,
    pub rate_limit: Option<u32>,
    pub parallel_points: u32,
    pub remark: Option<String>,
    pub command_line: String,
}

impl SweepParams {
    /// Short description of how each batch is bounded.
    pub fn batch_bound(&self) -> String {
        match (&self.samples, &self.duration) {
            (_, Some(duration)) => format!("{duration} per point"),
            (Some(samples), None) => format!("{samples} requests per point"),
            (None, None) => "unbounded".to_owned(),
        }
    }
}
