// Core algorithm exports
pub mod distance;
pub mod error;
pub mod filters;
pub mod fuzzy;
pub mod normalizer;
pub mod search;
pub mod stop_words;

pub use distance::{levenshtein, is_similar};
pub use error::SearchError;
pub use filters::{compose_filters, FilterPlan};
pub use fuzzy::FuzzyMatcher;
pub use normalizer::QueryNormalizer;
pub use search::ProductSearch;
pub use stop_words::StopWordSet;
