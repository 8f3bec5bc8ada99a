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

use bench_report::{
    hardware::BenchmarkHardware, params::SweepParams, report::SweepReport, sweep::SweepResult,
};
use chrono::{DateTime, Utc};

pub struct SweepReportBuilder;

impl SweepReportBuilder {
    pub fn build(
        hardware: BenchmarkHardware,
        params: SweepParams,
        sweep: SweepResult,
    ) -> SweepReport {
        let uuid = uuid::Uuid::new_v4();
        let timestamp: DateTime<Utc> = Utc::now();

        SweepReport {
            uuid,
            timestamp: timestamp.to_rfc3339(),
            hardware,
            params,
            sweep,
        }
    }
}
