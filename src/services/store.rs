use crate::models::{Product, SearchExpression};
use thiserror::Error;

/// Errors raised by a catalog store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid search pattern: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only query primitives the search core composes.
///
/// Text primitives receive a [`SearchExpression`]; each backend chooses how to
/// evaluate the token disjunction. The regex backends in this crate treat the
/// empty expression `()` as matching every row.
#[allow(async_fn_in_trait)]
pub trait CatalogStore {
    async fn list_all(&self) -> Result<Vec<Product>, StoreError>;

    /// Case-insensitive match of any token against name or description
    async fn containment_search(&self, expr: &SearchExpression) -> Result<Vec<Product>, StoreError>;

    /// Case-insensitive match of any token against the name only
    async fn name_similarity_search(&self, expr: &SearchExpression) -> Result<Vec<Product>, StoreError>;

    async fn price_range_search(&self, min: f64, max: f64) -> Result<Vec<Product>, StoreError>;

    async fn tag_search(&self, tag: &str) -> Result<Vec<Product>, StoreError>;

    async fn price_range_and_tag_and_text_search(
        &self,
        min: f64,
        max: f64,
        tag: &str,
        expr: &SearchExpression,
    ) -> Result<Vec<Product>, StoreError>;

    async fn price_range_and_text_search(
        &self,
        min: f64,
        max: f64,
        expr: &SearchExpression,
    ) -> Result<Vec<Product>, StoreError>;

    /// Whether the backend is reachable
    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
