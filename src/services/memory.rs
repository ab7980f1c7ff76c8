use regex::{Regex, RegexBuilder};
use std::sync::{Arc, RwLock};

use crate::models::{Product, SearchExpression};
use crate::services::store::{CatalogStore, StoreError};

/// Catalog held in process memory.
///
/// Text primitives compile the expression into a case-insensitive regex, the
/// same semantics as the PostgreSQL `~*` backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    /// Replace the product with the same id, or append it
    pub fn upsert(&self, product: Product) -> Result<(), StoreError> {
        let mut products = self
            .products
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => products.push(product),
        }
        Ok(())
    }

    fn select<F>(&self, predicate: F) -> Result<Vec<Product>, StoreError>
    where
        F: Fn(&Product) -> bool,
    {
        let products = self
            .products
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(products.iter().filter(|p| predicate(p)).cloned().collect())
    }
}

fn compile(expr: &SearchExpression) -> Result<Regex, StoreError> {
    Ok(RegexBuilder::new(&expr.to_regex_pattern())
        .case_insensitive(true)
        .build()?)
}

#[inline]
fn text_matches(re: &Regex, product: &Product) -> bool {
    re.is_match(&product.name) || re.is_match(&product.description)
}

#[inline]
fn in_range(product: &Product, min: f64, max: f64) -> bool {
    product.price >= min && product.price <= max
}

impl CatalogStore for InMemoryCatalog {
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        self.select(|_| true)
    }

    async fn containment_search(&self, expr: &SearchExpression) -> Result<Vec<Product>, StoreError> {
        let re = compile(expr)?;
        self.select(|p| text_matches(&re, p))
    }

    async fn name_similarity_search(&self, expr: &SearchExpression) -> Result<Vec<Product>, StoreError> {
        let re = compile(expr)?;
        self.select(|p| re.is_match(&p.name))
    }

    async fn price_range_search(&self, min: f64, max: f64) -> Result<Vec<Product>, StoreError> {
        self.select(|p| in_range(p, min, max))
    }

    async fn tag_search(&self, tag: &str) -> Result<Vec<Product>, StoreError> {
        self.select(|p| p.tag.as_deref() == Some(tag))
    }

    async fn price_range_and_tag_and_text_search(
        &self,
        min: f64,
        max: f64,
        tag: &str,
        expr: &SearchExpression,
    ) -> Result<Vec<Product>, StoreError> {
        let re = compile(expr)?;
        self.select(|p| in_range(p, min, max) && p.tag.as_deref() == Some(tag) && text_matches(&re, p))
    }

    async fn price_range_and_text_search(
        &self,
        min: f64,
        max: f64,
        expr: &SearchExpression,
    ) -> Result<Vec<Product>, StoreError> {
        let re = compile(expr)?;
        self.select(|p| in_range(p, min, max) && text_matches(&re, p))
    }
}
