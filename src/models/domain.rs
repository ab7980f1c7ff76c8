use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Catalog item as stored in the product table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub tag: Option<String>,
}

/// Inclusive price bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range that admits every finite price
    pub fn unbounded() -> Self {
        Self {
            min: f64::MIN,
            max: f64::MAX,
        }
    }

    #[inline]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Optional structural constraints for a search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub price_range: Option<PriceRange>,
    pub tag: Option<String>,
}

impl SearchFilters {
    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// Disjunction of literal tokens handed to the store's text-match primitives.
///
/// The store decides how to evaluate it. `Display` renders the canonical
/// `(tok1|tok2|...)` form, `()` when there are no tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchExpression {
    tokens: Vec<String>,
}

impl SearchExpression {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Alternation of regex-escaped literals, for regex-backed stores
    pub fn to_regex_pattern(&self) -> String {
        let escaped: Vec<String> = self.tokens.iter().map(|t| regex::escape(t)).collect();
        format!("({})", escaped.join("|"))
    }
}

impl fmt::Display for SearchExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.tokens.join("|"))
    }
}

/// Output of the query normalizer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedQuery {
    pub tokens: Vec<String>,
    pub expression: SearchExpression,
}

impl NormalizedQuery {
    /// Surviving tokens joined by a single space
    pub fn joined(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Set of products keyed by id.
///
/// Inserting a product whose id is already present replaces the stored copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    items: BTreeMap<i32, Product>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, product: Product) {
        self.items.insert(product.id, product);
    }

    pub fn merge(&mut self, other: ResultSet) {
        self.items.extend(other.items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.items.contains_key(&id)
    }

    pub fn get(&self, id: i32) -> Option<&Product> {
        self.items.get(&id)
    }

    pub fn ids(&self) -> Vec<i32> {
        self.items.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.items.values()
    }

    /// Products ordered by id
    pub fn into_vec(self) -> Vec<Product> {
        self.items.into_values().collect()
    }
}

impl Extend<Product> for ResultSet {
    fn extend<T: IntoIterator<Item = Product>>(&mut self, iter: T) {
        for product in iter {
            self.insert(product);
        }
    }
}

impl FromIterator<Product> for ResultSet {
    fn from_iter<T: IntoIterator<Item = Product>>(iter: T) -> Self {
        let mut set = ResultSet::new();
        set.extend(iter);
        set
    }
}
