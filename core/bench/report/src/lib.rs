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

pub mod error;
pub mod plotting;
pub mod types;
pub mod utils;

mod prints;

use crate::report::SweepReport;
use charming::Chart;
use charming::element::Symbol;
use plotting::chart::SweepChart;
use plotting::chart_data::{ChartData, chart_data};
use plotting::chart_kind::ChartKind;

pub use error::ReportError;
pub use types::*;

const SERIES_COLORS: [&str; 3] = ["#5470C6", "#EE6666", "#FAC858"];
const GAP_COLOR: &str = "#9A9A9A";

/// Renders one chart of the sweep.
///
/// Fails with `ReportError::EmptyInput` when the sweep has no entries.
pub fn render(
    report: &SweepReport,
    kind: ChartKind,
    dark: bool,
    strip_title_and_subtext: bool,
) -> Result<Chart, ReportError> {
    let data = chart_data(&report.sweep, kind)?;
    Ok(create_chart(
        &data,
        &report.title(kind),
        &report.subtext(),
        dark,
        strip_title_and_subtext,
    ))
}

fn series_symbol(idx: usize) -> Symbol {
    match idx % 3 {
        0 => Symbol::Circle,
        1 => Symbol::Triangle,
        _ => Symbol::Rect,
    }
}

pub fn create_chart(
    data: &ChartData,
    title: &str,
    subtext: &str,
    dark: bool,
    strip_title_and_subtext: bool,
) -> Chart {
    let mut chart = SweepChart::new(title, subtext, dark, strip_title_and_subtext)
        .with_query_length_x_axis(&data.x_label, &data.x)
        .with_y_axis(&data.y_label);

    for (idx, series) in data.series.iter().enumerate() {
        chart = chart.add_series(
            &series.name,
            &series.values,
            series_symbol(idx),
            SERIES_COLORS[idx % SERIES_COLORS.len()],
        );
    }

    let markers = data
        .gaps
        .iter()
        .filter_map(|gap| {
            data.x
                .iter()
                .position(|&x| x == gap.query_length)
                .map(|idx| (idx, gap.reason.clone()))
        })
        .collect();
    chart = chart.add_gap_markers("Missing points", markers, GAP_COLOR);

    chart.inner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate_stat::AggregateStat;
    use crate::query_length_point::QueryLengthPoint;
    use crate::sweep::{MissingPoint, SweepEntry, SweepResult};

    fn measured(query_length: u32, mean_ms: f64) -> SweepEntry {
        SweepEntry::Measured(AggregateStat {
            point: QueryLengthPoint::new(query_length, "inline"),
            sample_count: 10,
            success_count: 10,
            failed_count: 0,
            timeout_count: 0,
            window_secs: 1.0,
            mean_latency_ms: Some(mean_ms),
            p50_latency_ms: Some(mean_ms),
            p95_latency_ms: Some(mean_ms * 1.5),
            p99_latency_ms: Some(mean_ms * 2.0),
            min_latency_ms: Some(mean_ms / 2.0),
            max_latency_ms: Some(mean_ms * 2.0),
            std_dev_latency_ms: Some(1.0),
            mean_first_byte_ms: Some(mean_ms / 2.0),
            requests_per_sec: 10.0,
            bytes_per_sec: 2_000_000.0,
            mean_query_chars: 12.0,
            degenerate: false,
            latency_distribution: None,
        })
    }

    fn degenerate(query_length: u32) -> SweepEntry {
        SweepEntry::Measured(AggregateStat {
            point: QueryLengthPoint::new(query_length, "inline"),
            sample_count: 10,
            success_count: 0,
            failed_count: 10,
            timeout_count: 10,
            window_secs: 1.0,
            mean_latency_ms: None,
            p50_latency_ms: None,
            p95_latency_ms: None,
            p99_latency_ms: None,
            min_latency_ms: None,
            max_latency_ms: None,
            std_dev_latency_ms: None,
            mean_first_byte_ms: None,
            requests_per_sec: 0.0,
            bytes_per_sec: 0.0,
            mean_query_chars: 12.0,
            degenerate: true,
            latency_distribution: None,
        })
    }

    fn report_with(entries: Vec<SweepEntry>) -> SweepReport {
        SweepReport {
            sweep: SweepResult::from_entries(entries).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_sweep_fails_to_render() {
        let report = report_with(vec![]);
        for kind in ChartKind::ALL {
            assert!(matches!(
                render(&report, kind, true, false),
                Err(ReportError::EmptyInput)
            ));
        }
    }

    #[test]
    fn degenerate_point_is_a_marked_gap() {
        let sweep =
            SweepResult::from_entries(vec![measured(1, 2.0), degenerate(5), measured(10, 4.0)])
                .unwrap();
        let data = chart_data(&sweep, ChartKind::Latency).unwrap();

        assert_eq!(data.x, vec![1, 5, 10]);
        assert_eq!(data.series[0].values, vec![Some(2.0), None, Some(4.0)]);
        assert_eq!(data.gaps.len(), 1);
        assert_eq!(data.gaps[0].query_length, 5);
        assert_eq!(data.gaps[0].reason, "degenerate");

        let throughput = chart_data(&sweep, ChartKind::RequestsThroughput).unwrap();
        assert_eq!(throughput.series[0].values, vec![Some(10.0), None, Some(10.0)]);
    }

    #[test]
    fn no_data_point_keeps_its_reason() {
        let sweep = SweepResult::from_entries(vec![
            measured(3, 1.0),
            SweepEntry::NoData(MissingPoint {
                point: QueryLengthPoint::new(2, "inline"),
                reason: "target unreachable".to_owned(),
            }),
        ])
        .unwrap();
        let data = chart_data(&sweep, ChartKind::BytesThroughput).unwrap();

        assert_eq!(data.x, vec![2, 3]);
        assert_eq!(data.series[0].values, vec![None, Some(2.0)]);
        assert_eq!(data.gaps[0].reason, "target unreachable");
    }

    #[test]
    fn dictionary_chart_has_three_latency_series() {
        let sweep = SweepResult::from_entries(vec![measured(1, 2.0)]).unwrap();
        let data = chart_data(&sweep, ChartKind::DictionaryLatency).unwrap();
        let names: Vec<&str> = data.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Mean [ms]", "P95 [ms]", "P99 [ms]"]);
    }

    #[test]
    fn renders_every_chart_kind() {
        let report = report_with(vec![measured(1, 2.0), degenerate(2), measured(4, 3.0)]);
        for kind in ChartKind::ALL {
            assert!(render(&report, kind, true, false).is_ok());
        }
    }
}
