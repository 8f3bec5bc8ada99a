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

use crate::error::QueryBenchError;
use bench_report::plotting::chart_data::chart_data;
use bench_report::plotting::chart_kind::ChartKind;
use bench_report::report::SweepReport;
use bench_report::{ReportError, create_chart};
use charming::theme::Theme;
use charming::{Chart, HtmlRenderer};
use human_repr::HumanCount;
use std::path::Path;
use std::process::Command;
use std::time::Instant;
use tracing::info;

const CHART_WIDTH: u64 = 1600;
const CHART_HEIGHT: u64 = 1200;

fn open_in_browser(path: &Path) -> std::io::Result<()> {
    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open").arg(path).spawn().map(|_| ())
    }

    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(path).spawn().map(|_| ())
    }

    #[cfg(target_os = "windows")]
    {
        Command::new("cmd")
            .arg("/C")
            .arg("start")
            .arg(path)
            .spawn()
            .map(|_| ())
    }
}

/// Writes `{kind}.html` and the underlying plot data as `{kind}.json`.
pub fn plot_chart(
    report: &SweepReport,
    output_directory: &Path,
    kind: ChartKind,
    should_open_in_browser: bool,
) -> Result<(), QueryBenchError> {
    let data_processing_start = Instant::now();
    let data = chart_data(&report.sweep, kind)?;
    let chart = create_chart(&data, &report.title(kind), &report.subtext(), true, false);
    let data_processing_time = data_processing_start.elapsed();

    let chart_render_start = Instant::now();
    let file_name = kind.file_stem();
    std::fs::create_dir_all(output_directory)?;

    let data_path = output_directory.join(format!("{file_name}.json"));
    std::fs::write(&data_path, serde_json::to_string_pretty(&data)?)?;

    let chart_path = save_chart(&chart, file_name, output_directory)?;
    if should_open_in_browser {
        open_in_browser(&chart_path)?;
    }

    let html_size = std::fs::metadata(&chart_path)?.len();
    let chart_render_time = chart_render_start.elapsed();

    info!(
        "Generated {} plot at: {} ({} points, {} gaps, size: {}, data processing: {:.2?}, chart render: {:.2?})",
        file_name,
        chart_path.display(),
        data.x.len(),
        data.gaps.len(),
        html_size.human_count_bytes(),
        data_processing_time,
        chart_render_time
    );
    Ok(())
}

fn save_chart(
    chart: &Chart,
    file_name: &str,
    output_directory: &Path,
) -> Result<std::path::PathBuf, QueryBenchError> {
    let full_output_path = output_directory.join(format!("{file_name}.html"));

    let mut renderer =
        HtmlRenderer::new(file_name, CHART_WIDTH, CHART_HEIGHT).theme(Theme::Dark);
    renderer
        .save(chart, &full_output_path)
        .map_err(|e| ReportError::Render(format!("failed to save {file_name}.html: {e}")))?;
    Ok(full_output_path)
}
