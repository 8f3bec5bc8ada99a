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

use crate::actors::client::HttpQueryClient;
use crate::error::QueryBenchError;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client of one batch. Each batch owns its client and
/// connection pool, which are dropped together with the batch.
#[derive(Debug, Clone)]
pub struct HttpClientFactory {
    /// Idle connections kept per host, one per worker
    pub concurrency: usize,
    pub connect_timeout: Duration,
}

impl HttpClientFactory {
    pub fn new(concurrency: usize, connect_timeout: Duration) -> Self {
        Self {
            concurrency,
            connect_timeout,
        }
    }

    pub fn create_client(&self) -> Result<HttpQueryClient, QueryBenchError> {
        let client = Client::builder()
            .pool_max_idle_per_host(self.concurrency)
            .http1_only()
            .tcp_nodelay(true)
            .no_proxy()
            .connect_timeout(self.connect_timeout)
            .build()?;
        Ok(HttpQueryClient::new(client))
    }
}
