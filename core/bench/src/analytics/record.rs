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

use std::fmt::Display;

/// Why a single request did not produce a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Connect,
    Status(u16),
    Io(String),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Success,
    Failed(FailureKind),
}

/// One attempted request. All offsets are microseconds since the batch start.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSample {
    pub sent_us: u64,
    pub first_byte_us: Option<u64>,
    pub last_byte_us: Option<u64>,
    /// Last byte for successes, the moment the failure was observed otherwise
    pub completed_us: u64,
    /// `None` for failures
    pub bytes_received: Option<u64>,
    pub query_chars: u32,
    pub outcome: RequestOutcome,
}

impl RequestSample {
    pub fn success(
        sent_us: u64,
        first_byte_us: u64,
        last_byte_us: u64,
        bytes_received: u64,
        query_chars: u32,
    ) -> Self {
        Self {
            sent_us,
            first_byte_us: Some(first_byte_us),
            last_byte_us: Some(last_byte_us),
            completed_us: last_byte_us,
            bytes_received: Some(bytes_received),
            query_chars,
            outcome: RequestOutcome::Success,
        }
    }

    pub fn failure(sent_us: u64, completed_us: u64, query_chars: u32, kind: FailureKind) -> Self {
        Self {
            sent_us,
            first_byte_us: None,
            last_byte_us: None,
            completed_us,
            bytes_received: None,
            query_chars,
            outcome: RequestOutcome::Failed(kind),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == RequestOutcome::Success
    }

    pub fn is_timeout(&self) -> bool {
        self.outcome == RequestOutcome::Failed(FailureKind::Timeout)
    }

    /// Latency from issue to last byte, only for successful requests.
    pub fn latency_us(&self) -> Option<u64> {
        match (&self.outcome, self.last_byte_us) {
            (RequestOutcome::Success, Some(last)) => Some(last.saturating_sub(self.sent_us)),
            _ => None,
        }
    }
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Connect => write!(f, "connect"),
            FailureKind::Status(code) => write!(f, "status {code}"),
            FailureKind::Io(reason) => write!(f, "io: {reason}"),
            FailureKind::Cancelled => write!(f, "cancelled"),
        }
    }
}
