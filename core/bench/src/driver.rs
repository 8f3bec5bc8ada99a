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

use crate::{
    actors::{
        client::{HttpQueryClient, QueryClient},
        request_worker::RequestWorker,
    },
    analytics::{metrics::aggregate::batch_window, record::RequestSample},
    dictionary::Dictionary,
    error::QueryBenchError,
    utils::{
        client_factory::HttpClientFactory,
        finish_condition::{BatchBound, BenchmarkFinishCondition},
        query_generator::QueryGenerator,
        rate_limiter::BenchmarkRateLimiter,
    },
};
use bench_report::{query_length_point::QueryLengthPoint, query_mode::QueryMode};
use reqwest::Url;
use std::{num::NonZeroU32, sync::Arc, time::Duration};
use tokio::{task::JoinSet, time::Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Where queries are sent: `http://{server_address}{path}?{query_param}=...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub server_address: String,
    pub path: String,
    pub query_param: String,
}

impl Endpoint {
    pub fn base_url(&self) -> Result<Url, QueryBenchError> {
        let url = format!("http://{}{}", self.server_address, self.path);
        Url::parse(&url).map_err(|e| QueryBenchError::InvalidUrl {
            url,
            reason: e.to_string(),
        })
    }

    /// Resolves the target host once, before any request of a batch.
    pub async fn resolve(&self) -> Result<(), QueryBenchError> {
        let unreachable = |reason: String| QueryBenchError::TargetUnreachable {
            address: self.server_address.clone(),
            reason,
        };

        let mut addresses = tokio::net::lookup_host(self.server_address.as_str())
            .await
            .map_err(|e| unreachable(e.to_string()))?;
        match addresses.next() {
            Some(address) => {
                debug!("Resolved {} to {}", self.server_address, address);
                Ok(())
            }
            None => Err(unreachable("no addresses found".to_owned())),
        }
    }
}

/// Everything one batch needs besides the endpoint and the dictionary.
#[derive(Debug, Clone)]
pub struct BatchSpec {
    pub point: QueryLengthPoint,
    pub concurrency: NonZeroU32,
    pub bound: BatchBound,
    pub query_mode: QueryMode,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub warmup: Option<Duration>,
    pub rate_limit: Option<NonZeroU32>,
}

impl BatchSpec {
    pub fn validate(&self) -> Result<(), QueryBenchError> {
        if self.point.query_length() == 0 {
            return Err(QueryBenchError::InvalidArgument(
                "query length must be greater than zero".to_owned(),
            ));
        }
        if matches!(self.bound, BatchBound::Count(0))
            || matches!(self.bound, BatchBound::Duration(d) if d.is_zero())
        {
            return Err(QueryBenchError::InvalidArgument(format!(
                "batch bound must not be empty, got {}",
                self.bound
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(QueryBenchError::InvalidArgument(
                "request timeout must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Samples of one batch, in completion order per worker, and the batch window.
#[derive(Debug)]
pub struct BatchOutcome {
    pub samples: Vec<RequestSample>,
    pub window: Duration,
}

/// Runs one batch against a real HTTP target.
///
/// Fails with `TargetUnreachable` when the host does not resolve, and with
/// `Cancelled` when cancellation comes before any measured request was
/// issued. Failures of individual requests are recorded in the samples
/// instead.
pub async fn run_batch(
    endpoint: &Endpoint,
    spec: &BatchSpec,
    dictionary: Arc<Dictionary>,
    cancel: &CancellationToken,
) -> Result<BatchOutcome, QueryBenchError> {
    spec.validate()?;
    endpoint.resolve().await?;

    let client: HttpQueryClient = HttpClientFactory::new(
        spec.concurrency.get() as usize,
        spec.connect_timeout,
    )
    .create_client()?;

    run_batch_with_client(Arc::new(client), endpoint, spec, dictionary, cancel).await
}

pub async fn run_batch_with_client<C: QueryClient>(
    client: Arc<C>,
    endpoint: &Endpoint,
    spec: &BatchSpec,
    dictionary: Arc<Dictionary>,
    cancel: &CancellationToken,
) -> Result<BatchOutcome, QueryBenchError> {
    spec.validate()?;
    let base_url = endpoint.base_url()?;
    let rate_limiter = spec
        .rate_limit
        .map(|limit| Arc::new(BenchmarkRateLimiter::new(limit)));

    if let Some(warmup) = spec.warmup.filter(|w| !w.is_zero()) {
        info!(
            "Query length {} → warming up for {}...",
            spec.point.query_length(),
            humantime::format_duration(warmup)
        );
        let pool = WorkerPool {
            client: client.clone(),
            base_url: &base_url,
            endpoint,
            spec,
            dictionary: dictionary.clone(),
            rate_limiter: rate_limiter.clone(),
        };
        let discarded = pool.run(BatchBound::Duration(warmup), cancel).await?;
        debug!("Warmup issued {} requests", discarded.len());
    }

    if cancel.is_cancelled() {
        return Err(QueryBenchError::Cancelled);
    }

    let pool = WorkerPool {
        client,
        base_url: &base_url,
        endpoint,
        spec,
        dictionary,
        rate_limiter,
    };
    let samples = pool.run(spec.bound, cancel).await?;
    if samples.is_empty() && cancel.is_cancelled() {
        return Err(QueryBenchError::Cancelled);
    }
    let window = batch_window(&samples);

    Ok(BatchOutcome { samples, window })
}

struct WorkerPool<'a, C: QueryClient> {
    client: Arc<C>,
    base_url: &'a Url,
    endpoint: &'a Endpoint,
    spec: &'a BatchSpec,
    dictionary: Arc<Dictionary>,
    rate_limiter: Option<Arc<BenchmarkRateLimiter>>,
}

impl<C: QueryClient> WorkerPool<'_, C> {
    async fn run(
        self,
        bound: BatchBound,
        cancel: &CancellationToken,
    ) -> Result<Vec<RequestSample>, QueryBenchError> {
        let batch_start = Instant::now();
        let finish_condition = Arc::new(BenchmarkFinishCondition::new(bound));
        let mut workers = JoinSet::new();

        for worker_id in 1..=self.spec.concurrency.get() {
            let worker = RequestWorker {
                worker_id,
                client: self.client.clone(),
                generator: QueryGenerator::new(
                    self.base_url.clone(),
                    self.endpoint.query_param.clone(),
                    self.dictionary.clone(),
                    self.spec.point.query_length(),
                    self.spec.query_mode,
                ),
                finish_condition: finish_condition.clone(),
                rate_limiter: self.rate_limiter.clone(),
                request_timeout: self.spec.request_timeout,
                batch_start,
                cancel: cancel.clone(),
            };
            workers.spawn(worker.run());
        }

        let mut samples = Vec::with_capacity(finish_condition.expected_samples());
        while let Some(worker_samples) = workers.join_next().await {
            samples.extend(worker_samples?);
        }
        Ok(samples)
    }
}
