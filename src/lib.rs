//! Propane Search - fuzzy product search for the Propane Gaming storefront
//!
//! This library normalizes free-text queries, composes the catalog store's
//! structural filters and unions the result with a typo-tolerant edit-distance
//! pass over the catalog.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{ProductSearch, QueryNormalizer, FuzzyMatcher, StopWordSet, SearchError, distance::levenshtein};
pub use models::{Product, PriceRange, SearchFilters, SearchExpression, NormalizedQuery, ResultSet};
pub use services::{CatalogStore, StoreError, InMemoryCatalog, PostgresCatalog};
