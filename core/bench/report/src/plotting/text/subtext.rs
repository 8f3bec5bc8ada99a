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
use human_repr::HumanCount;

impl SweepReport {
    pub fn subtext(&self) -> String {
        format!(
            "{}\n{}",
            self.format_params(),
            self.format_hardware()
        )
    }

    fn format_params(&self) -> String {
        let params = &self.params;
        let mut text = format!(
            "Target: {}{}?{}=..., Dictionary: {} ({} words, {} mode), Concurrency: {}, {}, Timeout: {}",
            params.server_address,
            params.path,
            params.query_param,
            params.dictionary,
            params.dictionary_size,
            params.query_mode,
            params.concurrency,
            params.batch_bound(),
            params.request_timeout,
        );
        if let Some(rate_limit) = params.rate_limit {
            text.push_str(&format!(", Rate limit: {rate_limit} req/s"));
        }
        text
    }

    fn format_hardware(&self) -> String {
        let hardware = &self.hardware;
        format!(
            "{}, {} cores, {} RAM, {} {}",
            hardware.cpu_name,
            hardware.cpu_cores,
            (hardware.total_memory_mb * 1024 * 1024).human_count_bytes(),
            hardware.os_name,
            hardware.os_version,
        )
    }
}
