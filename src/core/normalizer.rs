use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::core::stop_words::StopWordSet;
use crate::models::{NormalizedQuery, SearchExpression};

/// Any character in the Unicode punctuation category
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{P}").expect("valid punctuation regex"));

/// Turns raw query text into search tokens
#[derive(Debug, Clone)]
pub struct QueryNormalizer {
    stop_words: Arc<StopWordSet>,
}

impl QueryNormalizer {
    pub fn new(stop_words: Arc<StopWordSet>) -> Self {
        Self { stop_words }
    }

    pub fn with_default_stop_words() -> Self {
        Self::new(Arc::new(StopWordSet::english().clone()))
    }

    /// Normalize a raw query.
    ///
    /// Words are split on whitespace, stripped of punctuation anywhere in the
    /// word, and dropped when empty, a single character, or a stop word.
    /// Never fails; degenerate input yields no tokens and the `()` expression.
    pub fn normalize(&self, raw: &str) -> NormalizedQuery {
        let tokens: Vec<String> = raw
            .split_whitespace()
            .map(|word| PUNCTUATION.replace_all(word.trim(), "").into_owned())
            .filter(|word| word.chars().count() > 1 && !self.stop_words.is_stop_word(word))
            .collect();

        NormalizedQuery {
            expression: SearchExpression::new(tokens.clone()),
            tokens,
        }
    }

    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }
}

impl Default for QueryNormalizer {
    fn default() -> Self {
        Self::with_default_stop_words()
    }
}
