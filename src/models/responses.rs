use serde::{Deserialize, Serialize};
use crate::models::domain::Product;

/// Response for every product search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub products: Vec<Product>,
    pub total_results: usize,
}

impl From<Vec<Product>> for SearchResponse {
    fn from(products: Vec<Product>) -> Self {
        let total_results = products.len();
        Self {
            products,
            total_results,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
