use crate::core::error::Result;
use crate::models::{PriceRange, ResultSet, SearchExpression, SearchFilters};
use crate::services::CatalogStore;

/// Store primitive chosen for a set of structural constraints
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPlan<'a> {
    /// Price range, tag and text match in one query
    PriceTagText { range: PriceRange, tag: &'a str },
    /// Price range and text match
    PriceText { range: PriceRange },
    /// Containment plus name-similarity text match
    TextOnly,
}

impl<'a> FilterPlan<'a> {
    /// Pick the store query for the given filters
    ///
    /// A tag always selects the tagged primitive, with the unbounded range when
    /// no price range was given.
    pub fn for_filters(filters: &'a SearchFilters) -> Self {
        match (&filters.tag, filters.price_range) {
            (Some(tag), range) => FilterPlan::PriceTagText {
                range: range.unwrap_or_else(PriceRange::unbounded),
                tag: tag.as_str(),
            },
            (None, Some(range)) => FilterPlan::PriceText { range },
            (None, None) => FilterPlan::TextOnly,
        }
    }
}

/// Issue the store queries for `filters` and union their results
///
/// Store errors abort the composition and are returned unchanged.
pub async fn compose_filters<S: CatalogStore>(
    store: &S,
    filters: &SearchFilters,
    expr: &SearchExpression,
) -> Result<ResultSet> {
    let mut results = ResultSet::new();

    match FilterPlan::for_filters(filters) {
        FilterPlan::PriceTagText { range, tag } => {
            results.extend(
                store
                    .price_range_and_tag_and_text_search(range.min, range.max, tag, expr)
                    .await?,
            );
        }
        FilterPlan::PriceText { range } => {
            results.extend(
                store
                    .price_range_and_text_search(range.min, range.max, expr)
                    .await?,
            );
        }
        FilterPlan::TextOnly => {
            results.extend(store.name_similarity_search(expr).await?);
            results.extend(store.containment_search(expr).await?);
        }
    }

    tracing::debug!("Structural filters {:?} matched {} products for {}", filters, results.len(), expr);

    Ok(results)
}
