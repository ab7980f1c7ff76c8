// Shared fixtures and store doubles for integration tests
#![allow(dead_code)]

use propane_search::models::{Product, SearchExpression};
use propane_search::services::{CatalogStore, InMemoryCatalog, StoreError};
use std::sync::Mutex;

pub fn create_product(id: i32, name: &str, description: &str, price: f64, tag: Option<&str>) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price,
        tag: tag.map(str::to_string),
    }
}

pub fn create_catalog() -> Vec<Product> {
    vec![
        create_product(1, "Dragon Shield", "Matte card sleeves in jet black", 11.99, Some("accessories")),
        create_product(2, "Dice Tower", "Wooden tower for rolling dice", 34.0, Some("dice")),
        create_product(3, "Deck Box", "Holds a hundred sleeved cards", 8.5, Some("accessories")),
        create_product(4, "Playmat", "Neoprene mat with dragon artwork", 22.0, None),
        create_product(5, "Metal Dice Set", "Seven polyhedral dice", 45.0, Some("dice")),
        create_product(6, "Card Binder", "Nine pocket pages for dragon cards", 19.0, Some("accessories")),
    ]
}

/// Store primitive invoked on a [`RecordingStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCall {
    ListAll,
    Containment,
    NameSimilarity,
    PriceRange,
    Tag,
    PriceTagText,
    PriceText,
}

/// In-memory catalog that records which primitives were called
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: InMemoryCatalog,
    calls: Mutex<Vec<StoreCall>>,
}

impl RecordingStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            inner: InMemoryCatalog::new(products),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, call: StoreCall) -> bool {
        self.calls().contains(&call)
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl CatalogStore for RecordingStore {
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        self.record(StoreCall::ListAll);
        self.inner.list_all().await
    }

    async fn containment_search(&self, expr: &SearchExpression) -> Result<Vec<Product>, StoreError> {
        self.record(StoreCall::Containment);
        self.inner.containment_search(expr).await
    }

    async fn name_similarity_search(&self, expr: &SearchExpression) -> Result<Vec<Product>, StoreError> {
        self.record(StoreCall::NameSimilarity);
        self.inner.name_similarity_search(expr).await
    }

    async fn price_range_search(&self, min: f64, max: f64) -> Result<Vec<Product>, StoreError> {
        self.record(StoreCall::PriceRange);
        self.inner.price_range_search(min, max).await
    }

    async fn tag_search(&self, tag: &str) -> Result<Vec<Product>, StoreError> {
        self.record(StoreCall::Tag);
        self.inner.tag_search(tag).await
    }

    async fn price_range_and_tag_and_text_search(
        &self,
        min: f64,
        max: f64,
        tag: &str,
        expr: &SearchExpression,
    ) -> Result<Vec<Product>, StoreError> {
        self.record(StoreCall::PriceTagText);
        self.inner.price_range_and_tag_and_text_search(min, max, tag, expr).await
    }

    async fn price_range_and_text_search(
        &self,
        min: f64,
        max: f64,
        expr: &SearchExpression,
    ) -> Result<Vec<Product>, StoreError> {
        self.record(StoreCall::PriceText);
        self.inner.price_range_and_text_search(min, max, expr).await
    }
}

/// Store whose every primitive fails
#[derive(Debug, Default)]
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

impl CatalogStore for FailingStore {
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        Err(unavailable())
    }

    async fn containment_search(&self, _expr: &SearchExpression) -> Result<Vec<Product>, StoreError> {
        Err(unavailable())
    }

    async fn name_similarity_search(&self, _expr: &SearchExpression) -> Result<Vec<Product>, StoreError> {
        Err(unavailable())
    }

    async fn price_range_search(&self, _min: f64, _max: f64) -> Result<Vec<Product>, StoreError> {
        Err(unavailable())
    }

    async fn tag_search(&self, _tag: &str) -> Result<Vec<Product>, StoreError> {
        Err(unavailable())
    }

    async fn price_range_and_tag_and_text_search(
        &self,
        _min: f64,
        _max: f64,
        _tag: &str,
        _expr: &SearchExpression,
    ) -> Result<Vec<Product>, StoreError> {
        Err(unavailable())
    }

    async fn price_range_and_text_search(
        &self,
        _min: f64,
        _max: f64,
        _expr: &SearchExpression,
    ) -> Result<Vec<Product>, StoreError> {
        Err(unavailable())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Err(unavailable())
    }
}
