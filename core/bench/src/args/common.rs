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

use super::defaults::{
    DEFAULT_CONCURRENCY, DEFAULT_CONNECT_TIMEOUT, DEFAULT_LOG_LEVEL, DEFAULT_PARALLEL_POINTS,
    DEFAULT_QUERY_PARAM, DEFAULT_QUERY_PATH, DEFAULT_REQUEST_TIMEOUT, DEFAULT_SAMPLES,
    DEFAULT_SERVER_ADDRESS,
};
use super::query_lengths::QueryLengths;
use crate::dictionary::Dictionary;
use crate::driver::Endpoint;
use crate::error::QueryBenchError;
use crate::utils::finish_condition::BatchBound;
use bench_report::params::SweepParams;
use bench_report::query_mode::QueryMode;
use clap::Parser;
use humantime::Duration as HumanDuration;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

/// Sweeps the query length of an HTTP search endpoint and charts latency
/// and throughput against it.
///
/// Example:
///   query-bench --server-address 127.0.0.1:8080 --dictionary words.txt \
///       --sort-by-frequency --query-lengths 1,5,10,50 --samples 100 -c 8 -o results
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, verbatim_doc_comment)]
pub struct QueryBenchArgs {
    /// Dictionary words, used when no dictionary file is given
    #[arg(value_name = "WORDS")]
    pub words: Vec<String>,

    /// Target address as host:port
    #[arg(long, short = 's', default_value = DEFAULT_SERVER_ADDRESS)]
    pub server_address: String,

    /// Path of the query endpoint
    #[arg(long, default_value = DEFAULT_QUERY_PATH)]
    pub path: String,

    /// Name of the query parameter carrying the words
    #[arg(long, default_value = DEFAULT_QUERY_PARAM)]
    pub query_param: String,

    /// Dictionary file: one word per line, optionally followed by its frequency
    #[arg(long, short = 'd')]
    pub dictionary: Option<PathBuf>,

    /// Order the dictionary by frequency, most frequent word first
    #[arg(long, default_value_t = false)]
    pub sort_by_frequency: bool,

    /// How query words are picked: prefix (first N words) or random
    #[arg(long, default_value_t = QueryMode::Prefix)]
    pub query_mode: QueryMode,

    /// Query lengths to sweep, e.g. `1,5,10,50` or `1..20`.
    /// Defaults to every length from 1 to the dictionary size.
    #[arg(long, short = 'l')]
    pub query_lengths: Option<QueryLengths>,

    /// Requests per query length
    #[arg(long, short = 'n', conflicts_with = "duration")]
    pub samples: Option<u64>,

    /// Send requests for this long per query length instead of a fixed count
    #[arg(long)]
    pub duration: Option<HumanDuration>,

    /// Concurrent requests per query length
    #[arg(long, short = 'c', default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: NonZeroU32,

    /// Timeout of a single request
    #[arg(long, default_value = DEFAULT_REQUEST_TIMEOUT)]
    pub request_timeout: HumanDuration,

    /// Timeout for establishing a connection
    #[arg(long, default_value = DEFAULT_CONNECT_TIMEOUT)]
    pub connect_timeout: HumanDuration,

    /// Unmeasured warmup before every query length
    #[arg(long)]
    pub warmup: Option<HumanDuration>,

    /// Maximum requests per second of one query length, shared by all workers
    #[arg(long)]
    pub rate_limit: Option<NonZeroU32>,

    /// Query lengths measured at the same time. Each runs its own batch, so
    /// up to parallel points × concurrency requests are in flight overall.
    #[arg(long, default_value_t = DEFAULT_PARALLEL_POINTS)]
    pub parallel_points: NonZeroU32,

    /// Stop the sweep after this long, unmeasured lengths are reported as missing
    #[arg(long)]
    pub max_sweep_duration: Option<HumanDuration>,

    /// Directory for report.json, points.jsonl and the charts
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// Open the generated charts in a browser
    #[arg(long, default_value_t = false)]
    pub open_charts: bool,

    /// Remark shown in chart titles
    #[arg(long)]
    pub remark: Option<String>,

    /// Identifier of the machine running the benchmark
    #[arg(long)]
    pub identifier: Option<String>,

    /// Log level (error|warn|info|debug|trace), RUST_LOG takes precedence
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl QueryBenchArgs {
    pub fn validate(&self) -> Result<(), QueryBenchError> {
        match (&self.dictionary, self.words.is_empty()) {
            (Some(_), false) => {
                return Err(QueryBenchError::InvalidArgument(
                    "give either a dictionary file or words, not both".to_owned(),
                ));
            }
            (None, true) => {
                return Err(QueryBenchError::InvalidArgument(
                    "a dictionary file or at least one word is required".to_owned(),
                ));
            }
            _ => {}
        }

        let Some((host, port)) = self.server_address.rsplit_once(':') else {
            return Err(QueryBenchError::InvalidArgument(format!(
                "server address '{}' must be host:port",
                self.server_address
            )));
        };
        if host.is_empty() || port.parse::<u16>().is_err() {
            return Err(QueryBenchError::InvalidArgument(format!(
                "server address '{}' must be host:port",
                self.server_address
            )));
        }

        if !self.path.starts_with('/') {
            return Err(QueryBenchError::InvalidArgument(format!(
                "path '{}' must start with '/'",
                self.path
            )));
        }
        if self.query_param.is_empty() {
            return Err(QueryBenchError::InvalidArgument(
                "query parameter name must not be empty".to_owned(),
            ));
        }
        if self.samples == Some(0) {
            return Err(QueryBenchError::InvalidArgument(
                "samples must be greater than zero".to_owned(),
            ));
        }
        if self.duration.is_some_and(|d| Duration::from(d).is_zero()) {
            return Err(QueryBenchError::InvalidArgument(
                "duration must be greater than zero".to_owned(),
            ));
        }
        if Duration::from(self.request_timeout).is_zero() {
            return Err(QueryBenchError::InvalidArgument(
                "request timeout must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn load_dictionary(&self) -> Result<Dictionary, QueryBenchError> {
        match &self.dictionary {
            Some(path) => Dictionary::from_file(path, self.sort_by_frequency),
            None => Dictionary::from_words(self.words.clone()),
        }
    }

    /// Query lengths to sweep, `1..=dictionary size` unless given.
    pub fn query_lengths(&self, dictionary: &Dictionary) -> Vec<u32> {
        match &self.query_lengths {
            Some(lengths) => lengths.values(),
            None => (1..=u32::try_from(dictionary.len()).unwrap_or(u32::MAX)).collect(),
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint {
            server_address: self.server_address.clone(),
            path: self.path.clone(),
            query_param: self.query_param.clone(),
        }
    }

    pub fn batch_bound(&self) -> BatchBound {
        match (self.duration, self.samples) {
            (Some(duration), _) => BatchBound::Duration(duration.into()),
            (None, Some(samples)) => BatchBound::Count(samples),
            (None, None) => BatchBound::Count(DEFAULT_SAMPLES),
        }
    }

    /// Requests in flight at most across the whole sweep.
    pub fn connection_budget(&self) -> u64 {
        u64::from(self.parallel_points.get()) * u64::from(self.concurrency.get())
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout.into()
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout.into()
    }

    pub fn warmup(&self) -> Option<Duration> {
        self.warmup.map(Duration::from)
    }

    pub fn max_sweep_duration(&self) -> Option<Duration> {
        self.max_sweep_duration.map(Duration::from)
    }

    pub fn to_params(&self, dictionary: &Dictionary, query_lengths: &[u32]) -> SweepParams {
        let (samples, duration) = match self.batch_bound() {
            BatchBound::Count(count) => (Some(count), None),
            BatchBound::Duration(duration) => {
                (None, Some(humantime::format_duration(duration).to_string()))
            }
        };

        SweepParams {
            server_address: self.server_address.clone(),
            path: self.path.clone(),
            query_param: self.query_param.clone(),
            dictionary: dictionary.name().to_owned(),
            dictionary_size: u32::try_from(dictionary.len()).unwrap_or(u32::MAX),
            sorted_by_frequency: dictionary.sorted_by_frequency(),
            query_mode: self.query_mode,
            query_lengths: query_lengths.to_vec(),
            samples,
            duration,
            concurrency: self.concurrency.get(),
            request_timeout: self.request_timeout.to_string(),
            warmup: self.warmup.map(|w| w.to_string()),
            rate_limit: self.rate_limit.map(NonZeroU32::get),
            parallel_points: self.parallel_points.get(),
            remark: self.remark.clone(),
            command_line: std::env::args().collect::<Vec<String>>().join(" "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> QueryBenchArgs {
        QueryBenchArgs::try_parse_from(std::iter::once("query-bench").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn positional_words_form_the_dictionary() {
        let args = parse(&["-s", "localhost:9000", "the", "of", "and"]);
        args.validate().unwrap();

        let dictionary = args.load_dictionary().unwrap();
        assert_eq!(dictionary.len(), 3);
        assert_eq!(args.query_lengths(&dictionary), vec![1, 2, 3]);
        assert_eq!(args.batch_bound(), BatchBound::Count(DEFAULT_SAMPLES));
    }

    #[test]
    fn duration_replaces_sample_count() {
        let args = parse(&["--duration", "10s", "--query-lengths", "5,1", "word"]);
        assert_eq!(
            args.batch_bound(),
            BatchBound::Duration(Duration::from_secs(10))
        );
        let dictionary = args.load_dictionary().unwrap();
        assert_eq!(args.query_lengths(&dictionary), vec![1, 5]);

        let params = args.to_params(&dictionary, &[1, 5]);
        assert_eq!(params.samples, None);
        assert_eq!(params.duration.as_deref(), Some("10s"));
    }

    #[test]
    fn connection_budget_spans_parallel_points() {
        assert_eq!(parse(&["word"]).connection_budget(), 4);
        assert_eq!(
            parse(&["-c", "8", "--parallel-points", "3", "word"]).connection_budget(),
            24
        );
    }

    #[test]
    fn samples_and_duration_conflict() {
        let result = QueryBenchArgs::try_parse_from([
            "query-bench",
            "--samples",
            "5",
            "--duration",
            "1s",
            "word",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_combinations_fail_validation() {
        assert!(parse(&[]).validate().is_err());
        assert!(parse(&["-d", "words.txt", "extra"]).validate().is_err());
        assert!(parse(&["-s", "localhost", "word"]).validate().is_err());
        assert!(parse(&["--path", "query", "word"]).validate().is_err());
        assert!(parse(&["-n", "0", "word"]).validate().is_err());
    }
}
