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

use crate::report::SweepReport;
use crate::sweep::SweepEntry;
use human_repr::HumanCount;

fn format_optional_ms(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{v:.3}"))
}

impl SweepReport {
    pub fn print_summary(&self) {
        println!(
            "Sweep against {} ({} points, {})",
            self.params.server_address,
            self.sweep.len(),
            self.params.batch_bound()
        );
        println!(
            "{:>8} {:>9} {:>9} {:>12} {:>12} {:>12} {:>14}  note",
            "length", "samples", "failed", "mean [ms]", "p95 [ms]", "req/s", "bytes/s"
        );

        for entry in self.sweep.sorted_entries() {
            match entry {
                SweepEntry::Measured(stat) => {
                    let note = if stat.degenerate { "degenerate" } else { "" };
                    println!(
                        "{:>8} {:>9} {:>9} {:>12} {:>12} {:>12.2} {:>14}  {}",
                        stat.query_length(),
                        stat.sample_count,
                        stat.failed_count,
                        format_optional_ms(stat.mean_latency_ms),
                        format_optional_ms(stat.p95_latency_ms),
                        stat.requests_per_sec,
                        format!("{}/s", (stat.bytes_per_sec as u64).human_count_bytes()),
                        note
                    );
                }
                SweepEntry::NoData(missing) => {
                    println!(
                        "{:>8} {:>9} {:>9} {:>12} {:>12} {:>12} {:>14}  no data: {}",
                        missing.point.query_length(),
                        "-",
                        "-",
                        "-",
                        "-",
                        "-",
                        "-",
                        missing.reason
                    );
                }
            }
        }
    }
}
