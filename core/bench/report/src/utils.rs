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

use serde::Serializer;

pub(crate) fn round_float<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64((value * 1000.0).round() / 1000.0)
}

pub(crate) fn round_optional_float<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => round_float(v, serializer),
        None => serializer.serialize_none(),
    }
}

/// Calculate the minimum of the values
///
/// Returns None if there are no values
pub fn min(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}

/// Calculate the maximum of the values
///
/// Returns None if there are no values
pub fn max(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}

/// Calculate the population standard deviation of the values
///
/// Returns None if there are fewer than 2 values
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let count = values.len();

    if count < 2 {
        return None;
    }

    let mean = values.iter().sum::<f64>() / count as f64;

    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / count as f64;

    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_max_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(min(&values), Some(2.0));
        assert_eq!(max(&values), Some(9.0));
        assert_eq!(std_dev(&values), Some(2.0));
        assert_eq!(std_dev(&[1.0]), None);
        assert_eq!(min(&[]), None);
    }

    #[test]
    fn round_float_keeps_three_decimals() {
        #[derive(serde::Serialize)]
        struct Wrapper {
            #[serde(serialize_with = "round_float")]
            value: f64,
            #[serde(serialize_with = "round_optional_float")]
            missing: Option<f64>,
        }
        let json = serde_json::to_string(&Wrapper {
            value: 1.23456,
            missing: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"value":1.235,"missing":null}"#);
    }
}
