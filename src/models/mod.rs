// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Product, PriceRange, SearchFilters, SearchExpression, NormalizedQuery, ResultSet};
pub use requests::{TextQuery, PriceRangeQuery, SuperSearchRequest, NO_TAG_SENTINEL};
pub use responses::{SearchResponse, HealthResponse, ErrorResponse};
