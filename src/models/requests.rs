use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Tag value older clients send to mean "no tag filter"
pub const NO_TAG_SENTINEL: &str = "NULL";

/// Free-text query parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextQuery {
    #[serde(alias = "query")]
    pub q: String,
}

/// Price range query parameters
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_price_query"))]
pub struct PriceRangeQuery {
    #[validate(range(min = 0.0))]
    pub min: f64,
    #[validate(range(min = 0.0))]
    pub max: f64,
}

fn validate_price_query(query: &PriceRangeQuery) -> Result<(), ValidationError> {
    check_bounds(query.min, query.max)
}

/// Request body for the combined search
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_super_search"))]
pub struct SuperSearchRequest {
    #[validate(range(min = 0.0))]
    #[serde(alias = "min_price", rename = "minPrice")]
    pub min_price: f64,
    #[validate(range(min = 0.0))]
    #[serde(alias = "max_price", rename = "maxPrice")]
    pub max_price: f64,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub query: String,
}

impl SuperSearchRequest {
    /// Tag constraint, treating a missing, blank or `"NULL"` tag as absent
    pub fn tag_filter(&self) -> Option<&str> {
        match self.tag.as_deref().map(str::trim) {
            None | Some("") | Some(NO_TAG_SENTINEL) => None,
            Some(tag) => Some(tag),
        }
    }
}

fn validate_super_search(req: &SuperSearchRequest) -> Result<(), ValidationError> {
    check_bounds(req.min_price, req.max_price)
}

fn check_bounds(min: f64, max: f64) -> Result<(), ValidationError> {
    if min > max {
        return Err(ValidationError::new("min_exceeds_max"));
    }
    Ok(())
}
