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
    actors::client::{QueryClient, QueryResponse},
    analytics::record::{FailureKind, RequestSample},
    utils::{
        finish_condition::BenchmarkFinishCondition, query_generator::QueryGenerator,
        rate_limiter::BenchmarkRateLimiter,
    },
};
use human_repr::HumanCount;
use std::{sync::Arc, time::Duration};
use tokio::time::{Instant, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// One of the `concurrency` workers of a batch. Issues requests one after
/// another while the shared finish condition hands out slots.
pub struct RequestWorker<C: QueryClient> {
    pub worker_id: u32,
    pub client: Arc<C>,
    pub generator: QueryGenerator,
    pub finish_condition: Arc<BenchmarkFinishCondition>,
    pub rate_limiter: Option<Arc<BenchmarkRateLimiter>>,
    pub request_timeout: Duration,
    /// Offsets of all samples are measured from this instant
    pub batch_start: Instant,
    pub cancel: CancellationToken,
}

impl<C: QueryClient> RequestWorker<C> {
    pub async fn run(mut self) -> Vec<RequestSample> {
        let mut samples = Vec::with_capacity(self.finish_condition.expected_samples());

        while !self.cancel.is_cancelled() && self.finish_condition.claim() {
            if let Some(rate_limiter) = &self.rate_limiter {
                tokio::select! {
                    () = self.cancel.cancelled() => break,
                    () = rate_limiter.wait_until_necessary() => {}
                }
            }

            samples.push(self.send_one().await);
        }

        let succeeded = samples.iter().filter(|s| s.is_success()).count() as u64;
        debug!(
            "Worker #{} → finished {} requests ({} succeeded), batch status: {}",
            self.worker_id,
            (samples.len() as u64).human_count_bare(),
            succeeded.human_count_bare(),
            self.finish_condition.status(),
        );

        samples
    }

    async fn send_one(&mut self) -> RequestSample {
        let query = self.generator.next_query();
        let sent_at = Instant::now();
        let sent_us = self.offset_us(sent_at);

        let result = tokio::select! {
            () = self.cancel.cancelled() => Err(FailureKind::Cancelled),
            response = timeout(self.request_timeout, self.client.send_query(&query.url)) => {
                response.unwrap_or(Err(FailureKind::Timeout))
            }
        };
        let completed_us = self.offset_us(Instant::now());

        match result {
            Ok(QueryResponse {
                first_byte_at,
                bytes_received,
            }) => {
                trace!("Worker #{} ← {} bytes from {}", self.worker_id, bytes_received, query.url);
                RequestSample::success(
                    sent_us,
                    self.offset_us(first_byte_at),
                    completed_us,
                    bytes_received,
                    query.chars,
                )
            }
            Err(kind) => {
                trace!("Worker #{} ✗ {} for {}", self.worker_id, kind, query.url);
                RequestSample::failure(sent_us, completed_us, query.chars, kind)
            }
        }
    }

    fn offset_us(&self, at: Instant) -> u64 {
        u64::try_from(at.saturating_duration_since(self.batch_start).as_micros())
            .unwrap_or(u64::MAX)
    }
}
