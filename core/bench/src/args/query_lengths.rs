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
use std::str::FromStr;

/// Query lengths of a sweep, either `min..max` (inclusive) or a comma
/// separated list such as `1,5,10,50`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryLengths {
    List(Vec<u32>),
    Range { min: u32, max: u32 },
}

impl QueryLengths {
    /// Sorted, de-duplicated lengths.
    pub fn values(&self) -> Vec<u32> {
        let mut values = match self {
            Self::List(values) => values.clone(),
            Self::Range { min, max } => (*min..=*max).collect(),
        };
        values.sort_unstable();
        values.dedup();
        values
    }
}

fn parse_length(raw: &str) -> Result<u32, String> {
    let value = raw
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("Invalid query length '{raw}': {e}"))?;
    if value == 0 {
        return Err("Query length must be greater than zero".to_string());
    }
    Ok(value)
}

impl FromStr for QueryLengths {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains("..") {
            let parts: Vec<&str> = s.split("..").collect();
            if parts.len() != 2 {
                return Err("Invalid range format. Expected format: min..max".to_string());
            }

            let min = parse_length(parts[0])?;
            let max = parse_length(parts[1].trim_start_matches('='))?;

            if min > max {
                return Err("Minimum value cannot be greater than maximum value".to_string());
            }

            Ok(QueryLengths::Range { min, max })
        } else {
            let values = s
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(parse_length)
                .collect::<Result<Vec<u32>, String>>()?;
            if values.is_empty() {
                return Err("At least one query length is required".to_string());
            }
            Ok(QueryLengths::List(values))
        }
    }
}

impl Display for QueryLengths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List(values) => {
                let joined: Vec<String> = values.iter().map(u32::to_string).collect();
                write!(f, "{}", joined.join(","))
            }
            Self::Range { min, max } => write!(f, "{}..{}", min, max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_sorts_and_dedups() {
        let lengths = "10,1,5,50,5".parse::<QueryLengths>().unwrap();
        assert_eq!(lengths.values(), vec![1, 5, 10, 50]);
    }

    #[test]
    fn test_parse_range_inclusive() {
        let lengths = "1..4".parse::<QueryLengths>().unwrap();
        assert_eq!(lengths, QueryLengths::Range { min: 1, max: 4 });
        assert_eq!(lengths.values(), vec![1, 2, 3, 4]);
        assert_eq!("2..=3".parse::<QueryLengths>().unwrap().values(), vec![2, 3]);
    }

    #[test]
    fn test_invalid_lengths() {
        assert!("0,1".parse::<QueryLengths>().is_err());
        assert!("5..1".parse::<QueryLengths>().is_err());
        assert!("a..3".parse::<QueryLengths>().is_err());
        assert!(",".parse::<QueryLengths>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(QueryLengths::List(vec![1, 5]).to_string(), "1,5");
        assert_eq!(QueryLengths::Range { min: 1, max: 9 }.to_string(), "1..9");
    }
}
