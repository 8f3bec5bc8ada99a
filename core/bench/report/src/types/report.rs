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

use super::hardware::BenchmarkHardware;
use super::params::SweepParams;
use super::point_record::PointRecord;
use super::sweep::SweepResult;
use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use uuid::Uuid;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SweepReport {
    /// Sweep unique identifier
    pub uuid: Uuid,

    /// Timestamp when the sweep was finished
    pub timestamp: String,

    /// Hardware the load generator ran on
    pub hardware: BenchmarkHardware,

    /// Sweep parameters
    pub params: SweepParams,

    /// One entry per query length point
    pub sweep: SweepResult,
}

impl SweepReport {
    pub fn dump_to_json(&self, output_dir: &Path) -> Result<(), ReportError> {
        std::fs::create_dir_all(output_dir)?;

        let report_path = output_dir.join("report.json");
        let report_json = serde_json::to_string_pretty(self)?;
        std::fs::write(report_path, report_json)?;
        Ok(())
    }

    /// Writes one `PointRecord` per line, ordered by query length.
    pub fn dump_points_to_jsonl(&self, output_dir: &Path) -> Result<(), ReportError> {
        std::fs::create_dir_all(output_dir)?;

        let file = File::create(output_dir.join("points.jsonl"))?;
        let mut writer = BufWriter::new(file);
        for entry in self.sweep.sorted_entries() {
            serde_json::to_writer(&mut writer, &PointRecord::from(entry))?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}
