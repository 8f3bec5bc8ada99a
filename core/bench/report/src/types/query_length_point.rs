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

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;

/// One x-axis setting of a sweep: how many dictionary words a query carries
/// and which dictionary they come from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct QueryLengthPoint {
    query_length: u32,
    dictionary: String,
}

impl QueryLengthPoint {
    pub fn new(query_length: u32, dictionary: impl Into<String>) -> Self {
        Self {
            query_length,
            dictionary: dictionary.into(),
        }
    }

    pub fn query_length(&self) -> u32 {
        self.query_length
    }

    pub fn dictionary(&self) -> &str {
        &self.dictionary
    }
}

impl PartialOrd for QueryLengthPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueryLengthPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.query_length
            .cmp(&other.query_length)
            .then_with(|| self.dictionary.cmp(&other.dictionary))
    }
}

impl Display for QueryLengthPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} words ({})", self.query_length, self.dictionary)
    }
}
