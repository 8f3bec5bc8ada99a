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

use crate::dictionary::Dictionary;
use bench_report::query_mode::QueryMode;
use rand::{Rng, SeedableRng, rngs::StdRng};
use reqwest::Url;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub url: String,
    /// Length of the decoded query value, separators included
    pub chars: u32,
}

/// Builds the query URLs of one worker.
///
/// In prefix mode every request carries the same query, the first
/// `query_length` dictionary words, so it is built once.
pub struct QueryGenerator {
    base_url: Url,
    query_param: String,
    dictionary: Arc<Dictionary>,
    query_length: usize,
    rng: StdRng,
    fixed: Option<Query>,
}

impl QueryGenerator {
    pub fn new(
        base_url: Url,
        query_param: impl Into<String>,
        dictionary: Arc<Dictionary>,
        query_length: u32,
        mode: QueryMode,
    ) -> Self {
        let mut generator = Self {
            base_url,
            query_param: query_param.into(),
            dictionary,
            query_length: query_length as usize,
            rng: StdRng::from_os_rng(),
            fixed: None,
        };

        if mode == QueryMode::Prefix {
            let fixed = generator.build(&generator.prefix_words());
            generator.fixed = Some(fixed);
        }

        generator
    }

    pub fn next_query(&mut self) -> Query {
        if let Some(query) = &self.fixed {
            return query.clone();
        }
        let words = self.random_words();
        self.build(&words)
    }

    fn prefix_words(&self) -> Vec<&str> {
        let words = self.dictionary.words();
        (0..self.query_length)
            .map(|i| words[i % words.len()].as_str())
            .collect()
    }

    fn random_words(&mut self) -> Vec<String> {
        let words = self.dictionary.words();
        (0..self.query_length)
            .map(|_| words[self.rng.random_range(0..words.len())].clone())
            .collect()
    }

    fn build<S: AsRef<str>>(&self, words: &[S]) -> Query {
        let value = words
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(" ");
        let mut url = self.base_url.clone();
        // Form encoding turns the separating spaces into '+'
        url.query_pairs_mut().append_pair(&self.query_param, &value);
        Query {
            url: url.into(),
            chars: u32::try_from(value.chars().count()).unwrap_or(u32::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary(words: &[&str]) -> Arc<Dictionary> {
        Arc::new(Dictionary::from_words(words.iter().map(|w| (*w).to_owned()).collect()).unwrap())
    }

    fn base_url() -> Url {
        Url::parse("http://127.0.0.1:8080/query").unwrap()
    }

    #[test]
    fn prefix_mode_joins_first_words_with_plus() {
        let mut generator = QueryGenerator::new(
            base_url(),
            "terms",
            dictionary(&["the", "of", "and", "to"]),
            3,
            QueryMode::Prefix,
        );

        let query = generator.next_query();
        assert_eq!(query.url, "http://127.0.0.1:8080/query?terms=the+of+and");
        assert_eq!(query.chars, 10);
        assert_eq!(generator.next_query(), query);
    }

    #[test]
    fn prefix_mode_wraps_around_the_dictionary() {
        let mut generator =
            QueryGenerator::new(base_url(), "q", dictionary(&["a", "b"]), 5, QueryMode::Prefix);
        assert_eq!(
            generator.next_query().url,
            "http://127.0.0.1:8080/query?q=a+b+a+b+a"
        );
    }

    #[test]
    fn special_characters_are_percent_encoded() {
        let mut generator =
            QueryGenerator::new(base_url(), "terms", dictionary(&["c++"]), 1, QueryMode::Prefix);
        assert_eq!(
            generator.next_query().url,
            "http://127.0.0.1:8080/query?terms=c%2B%2B"
        );
    }

    #[test]
    fn random_mode_uses_dictionary_words() {
        let words = ["alpha", "beta", "gamma"];
        let mut generator =
            QueryGenerator::new(base_url(), "terms", dictionary(&words), 4, QueryMode::Random);

        for _ in 0..20 {
            let url = Url::parse(&generator.next_query().url).unwrap();
            let (_, value) = url.query_pairs().next().unwrap();
            let picked: Vec<&str> = value.split(' ').collect();
            assert_eq!(picked.len(), 4);
            assert!(picked.iter().all(|w| words.contains(w)));
        }
    }
}
