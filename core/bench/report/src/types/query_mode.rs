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

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the words of a query are picked from the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, Default)]
pub enum QueryMode {
    /// The first N words of the dictionary, wrapping around when N exceeds it.
    #[display("prefix")]
    #[serde(rename = "prefix")]
    #[default]
    Prefix,
    /// N words sampled at random for every request.
    #[display("random")]
    #[serde(rename = "random")]
    Random,
}

impl FromStr for QueryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prefix" => Ok(Self::Prefix),
            "random" => Ok(Self::Random),
            other => Err(format!(
                "Unknown query mode '{other}', expected 'prefix' or 'random'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitive() {
        assert_eq!("Prefix".parse::<QueryMode>().unwrap(), QueryMode::Prefix);
        assert_eq!("random".parse::<QueryMode>().unwrap(), QueryMode::Random);
        assert!("shuffled".parse::<QueryMode>().is_err());
    }
}
