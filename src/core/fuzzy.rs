use rayon::prelude::*;
use tokio_util::sync::CancellationToken;

use crate::core::distance::is_similar;
use crate::core::error::{Result, SearchError};
use crate::models::{Product, ResultSet};

/// Edit-distance re-scoring of catalog items against a normalized query
///
/// Each candidate's name is compared with the whole query string. The
/// comparison is independent per item, so the pass can run on the rayon pool;
/// accepted items are merged in candidate order either way.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    parallel: bool,
}

impl FuzzyMatcher {
    pub fn new(parallel: bool) -> Self {
        Self { parallel }
    }

    pub fn sequential() -> Self {
        Self::new(false)
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Keep the candidates whose name is within edit-distance threshold of `query`
    ///
    /// # Arguments
    /// * `candidates` - Items to compare, normally the whole catalog
    /// * `query` - Normalized query, tokens joined by single spaces
    /// * `cancel` - Checked before every candidate comparison
    ///
    /// # Returns
    /// The accepted items, or `SearchError::Cancelled` if the token fired
    pub fn filter(
        &self,
        candidates: Vec<Product>,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<ResultSet> {
        if query.is_empty() {
            return Ok(ResultSet::new());
        }

        let check = |product: Product| -> Result<Option<Product>> {
            if cancel.is_cancelled() {
                return Err(SearchError::Cancelled);
            }
            Ok(is_similar(&product.name, query).then_some(product))
        };

        let accepted: Vec<Option<Product>> = if self.parallel {
            candidates.into_par_iter().map(check).collect::<Result<_>>()?
        } else {
            candidates.into_iter().map(check).collect::<Result<_>>()?
        };

        Ok(accepted.into_iter().flatten().collect())
    }

    /// Run [`FuzzyMatcher::filter`] on the blocking thread pool
    pub async fn filter_blocking(
        &self,
        candidates: Vec<Product>,
        query: String,
        cancel: CancellationToken,
    ) -> Result<ResultSet> {
        let matcher = *self;
        tokio::task::spawn_blocking(move || matcher.filter(candidates, &query, &cancel))
            .await
            .map_err(|e| SearchError::Worker(e.to_string()))?
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(true)
    }
}
