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

use human_repr::HumanCount;
use std::{
    fmt::Display,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};
use tokio::time::Instant;

/// How a batch is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchBound {
    /// Exactly this many requests are issued
    Count(u64),
    /// Requests are issued until this much time has passed
    Duration(Duration),
}

/// Shared request queue of one batch. Workers call [`claim`](Self::claim)
/// before every request, so the total never overshoots the bound no matter
/// how many workers draw from it.
pub struct BenchmarkFinishCondition {
    bound: BatchBound,
    issued: AtomicU64,
    deadline: Option<Instant>,
}

impl BenchmarkFinishCondition {
    /// Creates a condition whose clock, for duration bounds, starts now.
    pub fn new(bound: BatchBound) -> Self {
        let deadline = match bound {
            BatchBound::Count(_) => None,
            BatchBound::Duration(duration) => Some(Instant::now() + duration),
        };
        Self {
            bound,
            issued: AtomicU64::new(0),
            deadline,
        }
    }

    /// Takes one request slot. Returns `false` once the batch is complete.
    pub fn claim(&self) -> bool {
        match (self.bound, self.deadline) {
            (BatchBound::Count(total), _) => self
                .issued
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |issued| {
                    (issued < total).then_some(issued + 1)
                })
                .is_ok(),
            (BatchBound::Duration(_), Some(deadline)) => {
                if Instant::now() >= deadline {
                    return false;
                }
                self.issued.fetch_add(1, Ordering::AcqRel);
                true
            }
            (BatchBound::Duration(_), None) => false,
        }
    }

    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::Acquire)
    }

    /// Upper estimate of the number of samples, for preallocation.
    pub fn expected_samples(&self) -> usize {
        match self.bound {
            BatchBound::Count(total) => usize::try_from(total).unwrap_or(usize::MAX),
            BatchBound::Duration(_) => 0,
        }
    }

    pub fn status(&self) -> String {
        match self.bound {
            BatchBound::Count(total) => format!(
                "{}/{} requests",
                self.issued().human_count_bare(),
                total.human_count_bare()
            ),
            BatchBound::Duration(duration) => format!(
                "{} requests in {}",
                self.issued().human_count_bare(),
                humantime::format_duration(duration)
            ),
        }
    }
}

impl Display for BatchBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchBound::Count(total) => write!(f, "{total} requests"),
            BatchBound::Duration(duration) => write!(f, "{}", humantime::format_duration(*duration)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn count_bound_never_overshoots_across_threads() {
        let condition = Arc::new(BenchmarkFinishCondition::new(BatchBound::Count(1_000)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let condition = condition.clone();
                std::thread::spawn(move || {
                    let mut claimed = 0u64;
                    while condition.claim() {
                        claimed += 1;
                    }
                    claimed
                })
            })
            .collect();

        let claimed: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(claimed, 1_000);
        assert_eq!(condition.issued(), 1_000);
        assert!(!condition.claim());
    }

    #[tokio::test(start_paused = true)]
    async fn duration_bound_stops_at_deadline() {
        let condition = BenchmarkFinishCondition::new(BatchBound::Duration(Duration::from_millis(100)));

        assert!(condition.claim());
        tokio::time::sleep(Duration::from_millis(99)).await;
        assert!(condition.claim());
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(!condition.claim());
        assert_eq!(condition.issued(), 2);
    }
}
