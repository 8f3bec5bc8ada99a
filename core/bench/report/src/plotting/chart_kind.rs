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

use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum ChartKind {
    #[display("Latency")]
    #[serde(rename = "latency")]
    Latency,
    #[display("Byte Throughput")]
    #[serde(rename = "bytes_throughput")]
    BytesThroughput,
    #[display("Request Throughput")]
    #[serde(rename = "requests_throughput")]
    RequestsThroughput,
    #[display("Dictionary Latency")]
    #[serde(rename = "dictionary_latency")]
    DictionaryLatency,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Latency,
        ChartKind::BytesThroughput,
        ChartKind::RequestsThroughput,
        ChartKind::DictionaryLatency,
    ];

    /// File name (without extension) the chart is saved under.
    pub const fn file_stem(&self) -> &'static str {
        match self {
            ChartKind::Latency => "latency",
            ChartKind::BytesThroughput => "bytes_throughput",
            ChartKind::RequestsThroughput => "requests_throughput",
            ChartKind::DictionaryLatency => "dictionary_latency",
        }
    }

    pub const fn y_axis_label(&self) -> &'static str {
        match self {
            ChartKind::Latency | ChartKind::DictionaryLatency => "Latency [ms]",
            ChartKind::BytesThroughput => "Throughput [MB/s]",
            ChartKind::RequestsThroughput => "Throughput [req/s]",
        }
    }
}
