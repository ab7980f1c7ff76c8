//! Error types for the search core.

use thiserror::Error;

use crate::services::StoreError;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A catalog store call failed
    #[error("Catalog store error: {0}")]
    Store(#[from] StoreError),

    /// The search was cancelled between candidate comparisons
    #[error("Search cancelled")]
    Cancelled,

    /// The blocking worker running the fuzzy pass died
    #[error("Search worker failed: {0}")]
    Worker(String),
}
