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

use crate::analytics::record::FailureKind;
use reqwest::Client;
use std::future::Future;
use tokio::time::Instant;

/// Size of `HTTP/1.1 200 OK\r\n` plus the blank line ending the headers.
const STATUS_LINE_BYTES: u64 = 19;

/// A completed response with a 2xx or 3xx status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryResponse {
    pub first_byte_at: Instant,
    /// Body bytes plus header bytes
    pub bytes_received: u64,
}

/// Sends one query and reads the whole response.
///
/// Failures are returned as the kind of failure to record, they are
/// never fatal to the batch.
pub trait QueryClient: Send + Sync + 'static {
    fn send_query(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<QueryResponse, FailureKind>> + Send;
}

pub struct HttpQueryClient {
    client: Client,
}

impl HttpQueryClient {
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

impl QueryClient for HttpQueryClient {
    async fn send_query(&self, url: &str) -> Result<QueryResponse, FailureKind> {
        let response = self.client.get(url).send().await.map_err(classify)?;
        let first_byte_at = Instant::now();

        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(FailureKind::Status(status.as_u16()));
        }

        let header_bytes: u64 = response
            .headers()
            .iter()
            .map(|(name, value)| (name.as_str().len() + value.len() + 4) as u64)
            .sum();
        let body = response.bytes().await.map_err(classify)?;

        Ok(QueryResponse {
            first_byte_at,
            bytes_received: body.len() as u64 + header_bytes + STATUS_LINE_BYTES,
        })
    }
}

fn classify(error: reqwest::Error) -> FailureKind {
    if error.is_timeout() {
        FailureKind::Timeout
    } else if error.is_connect() {
        FailureKind::Connect
    } else if let Some(status) = error.status() {
        FailureKind::Status(status.as_u16())
    } else {
        FailureKind::Io(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::client_factory::HttpClientFactory;
    use axum::{Router, routing::get};
    use std::time::Duration;

    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/query", get(|| async { "0123456789" }))
            .route(
                "/broken",
                get(|| async { (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "oops") }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{address}")
    }

    fn client() -> HttpQueryClient {
        HttpClientFactory::new(1, Duration::from_secs(1))
            .create_client()
            .unwrap()
    }

    #[tokio::test]
    async fn counts_body_and_header_bytes() {
        let base = spawn_server().await;

        let response = client()
            .send_query(&format!("{base}/query?terms=a+b"))
            .await
            .unwrap();

        assert!(response.bytes_received > 10 + STATUS_LINE_BYTES);
    }

    #[test]
    fn status_line_size_matches_a_plain_ok_response() {
        assert_eq!(STATUS_LINE_BYTES, "HTTP/1.1 200 OK\r\n\r\n".len() as u64);
    }

    #[tokio::test]
    async fn error_statuses_are_failures() {
        let base = spawn_server().await;
        let client = client();

        let missing = client.send_query(&format!("{base}/nope")).await;
        let broken = client.send_query(&format!("{base}/broken")).await;

        assert_eq!(missing, Err(FailureKind::Status(404)));
        assert_eq!(broken, Err(FailureKind::Status(500)));
    }

    #[tokio::test]
    async fn refused_connection_is_a_connect_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let result = client()
            .send_query(&format!("http://{address}/query?terms=a"))
            .await;

        assert_eq!(result, Err(FailureKind::Connect));
    }
}
