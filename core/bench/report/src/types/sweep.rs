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

use super::aggregate_stat::AggregateStat;
use super::query_length_point::QueryLengthPoint;
use crate::error::ReportError;
use serde::{Deserialize, Serialize};

/// Why a point has no measurement at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MissingPoint {
    pub point: QueryLengthPoint,
    pub reason: String,
}

/// Outcome of one sweep point. `NoData` is not the same as a degenerate
/// measurement: the latter ran and measured zero successes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SweepEntry {
    Measured(AggregateStat),
    NoData(MissingPoint),
}

impl SweepEntry {
    pub fn point(&self) -> &QueryLengthPoint {
        match self {
            SweepEntry::Measured(stat) => &stat.point,
            SweepEntry::NoData(missing) => &missing.point,
        }
    }

    pub fn query_length(&self) -> u32 {
        self.point().query_length()
    }

    /// Returns the statistics only for points that produced latency data.
    pub fn usable_stat(&self) -> Option<&AggregateStat> {
        match self {
            SweepEntry::Measured(stat) if !stat.degenerate => Some(stat),
            _ => None,
        }
    }

    /// Reason for a gap in the charts, `None` for usable points.
    pub fn gap_reason(&self) -> Option<&str> {
        match self {
            SweepEntry::Measured(stat) if stat.degenerate => Some("degenerate"),
            SweepEntry::Measured(_) => None,
            SweepEntry::NoData(missing) => Some(&missing.reason),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SweepResult {
    entries: Vec<SweepEntry>,
}

impl SweepResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = SweepEntry>) -> Result<Self, ReportError> {
        let mut result = Self::new();
        for entry in entries {
            result.insert(entry)?;
        }
        Ok(result)
    }

    pub fn insert(&mut self, entry: SweepEntry) -> Result<(), ReportError> {
        let query_length = entry.query_length();
        if self.entries.iter().any(|e| e.query_length() == query_length) {
            return Err(ReportError::DuplicatePoint(query_length));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn entries(&self) -> &[SweepEntry] {
        &self.entries
    }

    /// Entries ordered by ascending query length.
    pub fn sorted_entries(&self) -> Vec<&SweepEntry> {
        let mut sorted: Vec<&SweepEntry> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.query_length());
        sorted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing(query_length: u32) -> SweepEntry {
        SweepEntry::NoData(MissingPoint {
            point: QueryLengthPoint::new(query_length, "inline"),
            reason: "target unreachable".to_owned(),
        })
    }

    #[test]
    fn rejects_duplicate_query_length() {
        let mut sweep = SweepResult::new();
        sweep.insert(missing(5)).unwrap();
        let err = sweep.insert(missing(5)).unwrap_err();
        assert!(matches!(err, ReportError::DuplicatePoint(5)));
        assert_eq!(sweep.len(), 1);
    }

    #[test]
    fn sorts_entries_ascending() {
        let sweep = SweepResult::from_entries([missing(10), missing(1), missing(5)]).unwrap();
        let lengths: Vec<u32> = sweep
            .sorted_entries()
            .iter()
            .map(|e| e.query_length())
            .collect();
        assert_eq!(lengths, vec![1, 5, 10]);
    }

    #[test]
    fn no_data_is_tagged_in_json() {
        let json = serde_json::to_value(missing(3)).unwrap();
        assert_eq!(json["status"], "no_data");
        assert_eq!(json["reason"], "target unreachable");
    }
}
