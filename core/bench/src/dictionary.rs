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

use crate::error::QueryBenchError;
use std::path::Path;

pub const INLINE_DICTIONARY_NAME: &str = "inline";

/// Word list queries are built from.
///
/// The file format is one word per line with an optional whitespace
/// separated frequency column. Blank lines and lines starting with `#`
/// are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary {
    name: String,
    words: Vec<String>,
    sorted_by_frequency: bool,
}

// Never empty, construction fails instead.
#[allow(clippy::len_without_is_empty)]
impl Dictionary {
    pub fn from_file(path: &Path, sort_by_frequency: bool) -> Result<Self, QueryBenchError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            QueryBenchError::Dictionary(format!("cannot read {}: {e}", path.display()))
        })?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::parse(name, &content, sort_by_frequency)
    }

    pub fn from_words(words: Vec<String>) -> Result<Self, QueryBenchError> {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.trim().to_owned())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return Err(QueryBenchError::Dictionary(
                "no words were given".to_owned(),
            ));
        }
        Ok(Self {
            name: INLINE_DICTIONARY_NAME.to_owned(),
            words,
            sorted_by_frequency: false,
        })
    }

    pub fn parse(
        name: impl Into<String>,
        content: &str,
        sort_by_frequency: bool,
    ) -> Result<Self, QueryBenchError> {
        let mut entries: Vec<(String, u64)> = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut columns = line.split_whitespace();
            let Some(word) = columns.next() else {
                continue;
            };
            let frequency = match columns.next() {
                Some(raw) => raw.parse::<u64>().map_err(|e| {
                    QueryBenchError::Dictionary(format!(
                        "line {}: invalid frequency '{raw}': {e}",
                        idx + 1
                    ))
                })?,
                None => 0,
            };
            if columns.next().is_some() {
                return Err(QueryBenchError::Dictionary(format!(
                    "line {}: expected 'word [frequency]'",
                    idx + 1
                )));
            }
            entries.push((word.to_owned(), frequency));
        }

        if entries.is_empty() {
            return Err(QueryBenchError::Dictionary(
                "dictionary contains no words".to_owned(),
            ));
        }

        if sort_by_frequency {
            entries.sort_by(|a, b| b.1.cmp(&a.1));
        }

        Ok(Self {
            name: name.into(),
            words: entries.into_iter().map(|(word, _)| word).collect(),
            sorted_by_frequency: sort_by_frequency,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn sorted_by_frequency(&self) -> bool {
        self.sorted_by_frequency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORDS: &str = "# most common english words\n\
                         of 3000\n\
                         the 5000\n\
                         \n\
                         and 2500\n\
                         rare\n";

    #[test]
    fn keeps_file_order_without_sorting() {
        let dictionary = Dictionary::parse("common", WORDS, false).unwrap();
        assert_eq!(dictionary.words(), ["of", "the", "and", "rare"]);
        assert_eq!(dictionary.name(), "common");
        assert!(!dictionary.sorted_by_frequency());
    }

    #[test]
    fn sorts_most_frequent_first() {
        let dictionary = Dictionary::parse("common", WORDS, true).unwrap();
        assert_eq!(dictionary.words(), ["the", "of", "and", "rare"]);
    }

    #[test]
    fn rejects_bad_lines_and_empty_input() {
        assert!(matches!(
            Dictionary::parse("d", "word many\n", false),
            Err(QueryBenchError::Dictionary(_))
        ));
        assert!(Dictionary::parse("d", "word 1 extra\n", false).is_err());
        assert!(Dictionary::parse("d", "# only a comment\n", false).is_err());
        assert!(Dictionary::from_words(vec![" ".to_owned()]).is_err());
    }

    #[test]
    fn reads_dictionary_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big_dictionary.txt");
        std::fs::write(&path, WORDS).unwrap();

        let dictionary = Dictionary::from_file(&path, true).unwrap();
        assert_eq!(dictionary.name(), "big_dictionary");
        assert_eq!(dictionary.len(), 4);
    }
}
