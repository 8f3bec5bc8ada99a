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

use crate::analytics::metrics::aggregate::aggregate;
use crate::analytics::report_builder::SweepReportBuilder;
use crate::args::common::QueryBenchArgs;
use crate::dictionary::Dictionary;
use crate::driver::{BatchSpec, Endpoint, run_batch};
use crate::error::QueryBenchError;
use crate::plot::plot_chart;
use bench_report::hardware::BenchmarkHardware;
use bench_report::plotting::chart_kind::ChartKind;
use bench_report::query_length_point::QueryLengthPoint;
use bench_report::report::SweepReport;
use bench_report::sweep::{MissingPoint, SweepEntry, SweepResult};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

pub const SWEEP_CANCELLED: &str = "sweep cancelled";

pub struct SweepRunner {
    args: QueryBenchArgs,
}

impl SweepRunner {
    pub const fn new(args: QueryBenchArgs) -> Self {
        Self { args }
    }

    pub async fn run(self) -> Result<SweepReport, QueryBenchError> {
        let args = self.args;
        let dictionary = Arc::new(args.load_dictionary()?);
        let query_lengths = args.query_lengths(&dictionary);
        let endpoint = args.endpoint();

        info!(
            "Starting query length sweep against http://{}{} with {} lengths, dictionary '{}' ({} words{}), {} per point, concurrency {}",
            endpoint.server_address,
            endpoint.path,
            query_lengths.len(),
            dictionary.name(),
            dictionary.len(),
            if dictionary.sorted_by_frequency() {
                ", by frequency"
            } else {
                ""
            },
            args.batch_bound(),
            args.concurrency,
        );
        info!(
            "Up to {} requests in flight ({} points at once × concurrency {})",
            args.connection_budget(),
            args.parallel_points,
            args.concurrency,
        );

        let cancel = CancellationToken::new();
        spawn_cancellation_triggers(&cancel, args.max_sweep_duration());

        let template = BatchSpec {
            point: QueryLengthPoint::default(),
            concurrency: args.concurrency,
            bound: args.batch_bound(),
            query_mode: args.query_mode,
            request_timeout: args.request_timeout(),
            connect_timeout: args.connect_timeout(),
            warmup: args.warmup(),
            rate_limit: args.rate_limit,
        };

        let sweep = run_sweep(
            &endpoint,
            &template,
            dictionary.clone(),
            &query_lengths,
            args.parallel_points.get() as usize,
            &cancel,
        )
        .await?;
        cancel.cancel();

        let hardware = BenchmarkHardware::get_system_info_with_identifier(args.identifier.clone());
        let params = args.to_params(&dictionary, &query_lengths);
        let report = SweepReportBuilder::build(hardware, params, sweep);

        report.print_summary();

        if let Some(output_dir) = &args.output_dir {
            write_outputs(&report, output_dir, args.open_charts)?;
        }

        Ok(report)
    }
}

/// Ctrl-C and the optional sweep deadline both cancel the sweep.
fn spawn_cancellation_triggers(cancel: &CancellationToken, max_duration: Option<Duration>) {
    let token = cancel.clone();
    tokio::spawn(async move {
        tokio::select! {
            () = token.cancelled() => {}
            result = tokio::signal::ctrl_c() => {
                if result.is_ok() {
                    warn!("Interrupted, cancelling the sweep...");
                    token.cancel();
                }
            }
        }
    });

    if let Some(max_duration) = max_duration {
        let token = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = tokio::time::sleep(max_duration) => {
                    warn!(
                        "Sweep exceeded {}, cancelling...",
                        humantime::format_duration(max_duration)
                    );
                    token.cancel();
                }
            }
        });
    }
}

/// Measures every query length, at most `parallel_points` at a time.
///
/// A batch that fails as a whole is recorded as missing and the sweep
/// moves on. Lengths not started before cancellation are missing too.
pub async fn run_sweep(
    endpoint: &Endpoint,
    template: &BatchSpec,
    dictionary: Arc<Dictionary>,
    query_lengths: &[u32],
    parallel_points: usize,
    cancel: &CancellationToken,
) -> Result<SweepResult, QueryBenchError> {
    let permits = Arc::new(Semaphore::new(parallel_points.max(1)));
    let mut batches = JoinSet::new();

    for &query_length in query_lengths {
        let endpoint = endpoint.clone();
        let spec = BatchSpec {
            point: QueryLengthPoint::new(query_length, dictionary.name()),
            ..template.clone()
        };
        let dictionary = dictionary.clone();
        let permits = permits.clone();
        let cancel = cancel.clone();

        batches.spawn(async move {
            let permit = tokio::select! {
                () = cancel.cancelled() => None,
                permit = permits.acquire_owned() => permit.ok(),
            };
            let Some(_permit) = permit else {
                return missing(spec.point, SWEEP_CANCELLED);
            };
            if cancel.is_cancelled() {
                return missing(spec.point, SWEEP_CANCELLED);
            }
            measure_point(&endpoint, &spec, dictionary, &cancel).await
        });
    }

    let mut sweep = SweepResult::new();
    while let Some(entry) = batches.join_next().await {
        sweep.insert(entry?)?;
    }
    Ok(sweep)
}

pub async fn measure_point(
    endpoint: &Endpoint,
    spec: &BatchSpec,
    dictionary: Arc<Dictionary>,
    cancel: &CancellationToken,
) -> SweepEntry {
    info!(
        "Query length {} → sending {}...",
        spec.point.query_length(),
        spec.bound
    );

    match run_batch(endpoint, spec, dictionary, cancel).await {
        Ok(outcome) => {
            let stat = aggregate(&outcome.samples, spec.point.clone(), outcome.window);
            info!(
                "Query length {} → {} requests ({} failed, {} timed out) in {:.2?}, mean latency: {}, p95 latency: {}, {:.2} req/s, {:.2} MB/s",
                spec.point.query_length(),
                stat.sample_count,
                stat.failed_count,
                stat.timeout_count,
                outcome.window,
                format_ms(stat.mean_latency_ms),
                format_ms(stat.p95_latency_ms),
                stat.requests_per_sec,
                stat.megabytes_per_sec(),
            );
            SweepEntry::Measured(stat)
        }
        Err(QueryBenchError::Cancelled) => {
            warn!(
                "Query length {} → sweep cancelled before measuring",
                spec.point.query_length()
            );
            missing(spec.point.clone(), SWEEP_CANCELLED)
        }
        Err(e) => {
            error!(
                "Query length {} → batch failed: {e}",
                spec.point.query_length()
            );
            missing(spec.point.clone(), &e.to_string())
        }
    }
}

fn missing(point: QueryLengthPoint, reason: &str) -> SweepEntry {
    SweepEntry::NoData(MissingPoint {
        point,
        reason: reason.to_owned(),
    })
}

fn format_ms(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_owned(), |v| format!("{v:.2} ms"))
}

/// Writes the report, the per-point records and every chart. A chart that
/// fails is logged and does not stop the others.
pub fn write_outputs(
    report: &SweepReport,
    output_dir: &Path,
    open_charts: bool,
) -> Result<(), QueryBenchError> {
    report.dump_to_json(output_dir)?;
    report.dump_points_to_jsonl(output_dir)?;
    info!("Report written to {}", output_dir.display());

    for kind in ChartKind::ALL {
        if let Err(e) = plot_chart(report, output_dir, kind, open_charts) {
            error!("Failed to generate {} chart: {e}", kind.file_stem());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::finish_condition::BatchBound;
    use axum::{Router, extract::Query, routing::get};
    use bench_report::point_record::{PointRecord, PointStatus};
    use bench_report::query_mode::QueryMode;
    use std::collections::HashMap;
    use std::num::NonZeroU32;

    async fn spawn_search_server() -> String {
        let app = Router::new().route(
            "/query",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let terms = params.get("terms").cloned().unwrap_or_default();
                format!("results for {terms}")
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        address.to_string()
    }

    async fn spawn_slow_server(delay: Duration) -> String {
        let app = Router::new().route(
            "/query",
            get(move || async move {
                tokio::time::sleep(delay).await;
                "slow results"
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        address.to_string()
    }

    fn endpoint(server_address: &str, path: &str) -> Endpoint {
        Endpoint {
            server_address: server_address.to_owned(),
            path: path.to_owned(),
            query_param: "terms".to_owned(),
        }
    }

    fn template(samples: u64) -> BatchSpec {
        BatchSpec {
            point: QueryLengthPoint::default(),
            concurrency: NonZeroU32::new(2).unwrap(),
            bound: BatchBound::Count(samples),
            query_mode: QueryMode::Prefix,
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(1),
            warmup: None,
            rate_limit: None,
        }
    }

    fn dictionary() -> Arc<Dictionary> {
        let words = ["search", "engine", "index", "query"]
            .iter()
            .map(|w| (*w).to_owned())
            .collect();
        Arc::new(Dictionary::from_words(words).unwrap())
    }

    #[tokio::test]
    async fn sweep_against_a_live_server_measures_every_length() {
        let address = spawn_search_server().await;

        let sweep = run_sweep(
            &endpoint(&address, "/query"),
            &template(8),
            dictionary(),
            &[4, 1, 2],
            2,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        let lengths: Vec<u32> = sweep.sorted_entries().iter().map(|e| e.query_length()).collect();
        assert_eq!(lengths, vec![1, 2, 4]);
        for entry in sweep.sorted_entries() {
            let stat = entry.usable_stat().expect("point should be measured");
            assert_eq!(stat.sample_count, 8);
            assert_eq!(stat.success_count, 8);
            assert!(stat.bytes_per_sec > 0.0);
            assert!(stat.requests_per_sec > 0.0);
        }
    }

    #[tokio::test]
    async fn error_status_makes_a_degenerate_point() {
        let address = spawn_search_server().await;

        let entry = measure_point(
            &endpoint(&address, "/missing"),
            &BatchSpec {
                point: QueryLengthPoint::new(1, "inline"),
                ..template(4)
            },
            dictionary(),
            &CancellationToken::new(),
        )
        .await;

        let SweepEntry::Measured(stat) = entry else {
            panic!("expected a measured point, got {entry:?}");
        };
        assert!(stat.degenerate);
        assert_eq!(stat.failed_count, 4);
    }

    #[tokio::test]
    async fn unreachable_target_is_no_data_and_the_sweep_continues() {
        let sweep = run_sweep(
            &endpoint("nonexistent.invalid:80", "/query"),
            &template(2),
            dictionary(),
            &[1, 2],
            1,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(sweep.len(), 2);
        assert!(
            sweep
                .entries()
                .iter()
                .all(|e| matches!(e, SweepEntry::NoData(_)))
        );
    }

    #[tokio::test]
    async fn cancelled_sweep_reports_missing_points() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let sweep = run_sweep(
            &endpoint("127.0.0.1:9", "/query"),
            &template(2),
            dictionary(),
            &[1, 2, 3],
            1,
            &cancel,
        )
        .await
        .unwrap();

        assert_eq!(sweep.len(), 3);
        for entry in sweep.entries() {
            assert_eq!(entry.gap_reason(), Some(SWEEP_CANCELLED));
        }
    }

    #[tokio::test]
    async fn cancellation_during_warmup_is_no_data() {
        let address = spawn_search_server().await;
        let cancel = CancellationToken::new();
        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let entry = measure_point(
            &endpoint(&address, "/query"),
            &BatchSpec {
                point: QueryLengthPoint::new(2, "inline"),
                warmup: Some(Duration::from_secs(5)),
                ..template(50)
            },
            dictionary(),
            &cancel,
        )
        .await;

        assert!(matches!(entry, SweepEntry::NoData(_)), "{entry:?}");
        assert_eq!(entry.gap_reason(), Some(SWEEP_CANCELLED));
    }

    #[tokio::test]
    async fn sweep_deadline_cancels_the_running_and_remaining_points() {
        let address = spawn_slow_server(Duration::from_secs(10)).await;
        let cancel = CancellationToken::new();
        spawn_cancellation_triggers(&cancel, Some(Duration::from_millis(200)));

        let sweep = run_sweep(
            &endpoint(&address, "/query"),
            &template(100),
            dictionary(),
            &[1, 2, 3],
            1,
            &cancel,
        )
        .await
        .unwrap();

        assert!(cancel.is_cancelled());
        assert_eq!(sweep.len(), 3);

        let interrupted: Vec<_> = sweep
            .entries()
            .iter()
            .filter_map(|e| match e {
                SweepEntry::Measured(stat) => Some(stat),
                SweepEntry::NoData(_) => None,
            })
            .collect();
        assert_eq!(interrupted.len(), 1);
        let stat = interrupted[0];
        assert!(stat.degenerate);
        assert_eq!(stat.sample_count, 2);
        assert_eq!(stat.failed_count, 2);
        assert_eq!(stat.timeout_count, 0);

        let not_started = sweep
            .entries()
            .iter()
            .filter(|e| e.gap_reason() == Some(SWEEP_CANCELLED))
            .count();
        assert_eq!(not_started, 2);
    }

    #[tokio::test]
    async fn outputs_are_written_to_the_directory() {
        let address = spawn_search_server().await;
        let sweep = run_sweep(
            &endpoint(&address, "/query"),
            &template(4),
            dictionary(),
            &[1, 3],
            1,
            &CancellationToken::new(),
        )
        .await
        .unwrap();
        let report = SweepReportBuilder::build(BenchmarkHardware::default(), Default::default(), sweep);

        let dir = tempfile::tempdir().unwrap();
        write_outputs(&report, dir.path(), false).unwrap();

        let report_json = std::fs::read_to_string(dir.path().join("report.json")).unwrap();
        let parsed: SweepReport = serde_json::from_str(&report_json).unwrap();
        assert_eq!(parsed.sweep.len(), 2);

        let records: Vec<PointRecord> = std::fs::read_to_string(dir.path().join("points.jsonl"))
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].query_length, 1);
        assert_eq!(records[1].status, PointStatus::Measured);

        for kind in ChartKind::ALL {
            assert!(dir.path().join(format!("{}.html", kind.file_stem())).exists());
            assert!(dir.path().join(format!("{}.json", kind.file_stem())).exists());
        }
    }
}
