use tokio_util::sync::CancellationToken;

use crate::core::error::Result;
use crate::core::filters::compose_filters;
use crate::core::fuzzy::FuzzyMatcher;
use crate::core::normalizer::QueryNormalizer;
use crate::models::{PriceRange, Product, ResultSet, SearchFilters};
use crate::services::CatalogStore;

/// Product search orchestrator - normalizes the query, runs the structural
/// store queries and unions them with the fuzzy pass over the whole catalog
///
/// # Pipeline Stages
/// 1. Query normalization
/// 2. Structural filter composition against the store
/// 3. Edit-distance re-scoring of the catalog snapshot
/// 4. Union by product id
pub struct ProductSearch<S> {
    store: S,
    normalizer: QueryNormalizer,
    fuzzy: FuzzyMatcher,
}

impl<S: CatalogStore> ProductSearch<S> {
    pub fn new(store: S, normalizer: QueryNormalizer, fuzzy: FuzzyMatcher) -> Self {
        Self {
            store,
            normalizer,
            fuzzy,
        }
    }

    pub fn with_defaults(store: S) -> Self {
        Self::new(store, QueryNormalizer::default(), FuzzyMatcher::default())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Containment search of the normalized query over name and description
    pub async fn find_by_description(&self, raw: &str) -> Result<Vec<Product>> {
        let query = self.normalizer.normalize(raw);
        tracing::debug!("find_by_description expression {}", query.expression);

        Ok(self.store.containment_search(&query.expression).await?)
    }

    /// Name-similarity and containment matches unioned with fuzzy name matches
    pub async fn find_by_similar_name_description(
        &self,
        raw: &str,
        cancel: &CancellationToken,
    ) -> Result<ResultSet> {
        self.search(raw, &SearchFilters::default(), cancel).await
    }

    pub async fn search_by_price_range(&self, min: f64, max: f64) -> Result<Vec<Product>> {
        Ok(self.store.price_range_search(min, max).await?)
    }

    pub async fn search_by_tag(&self, tag: &str) -> Result<Vec<Product>> {
        Ok(self.store.tag_search(tag).await?)
    }

    /// Price range and optional tag filtered text matches unioned with fuzzy
    /// name matches
    ///
    /// # Arguments
    /// * `min` - Lower price bound, inclusive
    /// * `max` - Upper price bound, inclusive
    /// * `tag` - Exact tag to require, `None` for no tag constraint
    /// * `raw` - Free-text query
    /// * `cancel` - Cancels the fuzzy pass
    pub async fn super_search(
        &self,
        min: f64,
        max: f64,
        tag: Option<&str>,
        raw: &str,
        cancel: &CancellationToken,
    ) -> Result<ResultSet> {
        let filters = SearchFilters {
            price_range: Some(PriceRange::new(min, max)),
            tag: tag.map(str::to_string),
        };
        self.search(raw, &filters, cancel).await
    }

    /// Structural filters for `filters` unioned with the fuzzy pass
    pub async fn search(
        &self,
        raw: &str,
        filters: &SearchFilters,
        cancel: &CancellationToken,
    ) -> Result<ResultSet> {
        let query = self.normalizer.normalize(raw);

        let mut results = compose_filters(&self.store, filters, &query.expression).await?;
        let structural = results.len();

        let catalog = self.store.list_all().await?;
        let total_candidates = catalog.len();

        let fuzzy = self
            .fuzzy
            .filter_blocking(catalog, query.joined(), cancel.clone())
            .await?;
        let fuzzy_matches = fuzzy.len();

        results.merge(fuzzy);

        tracing::debug!(
            "Search {:?}: {} structural, {} fuzzy, {} total of {} candidates",
            query.tokens,
            structural,
            fuzzy_matches,
            results.len(),
            total_candidates
        );

        Ok(results)
    }
}
