use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

use crate::models::{Product, SearchExpression};
use crate::services::store::{CatalogStore, StoreError};

type PgQuery<'q> = sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>;

const PRODUCT_COLUMNS: &str = "id, name, description, price, tag";

/// PostgreSQL-backed product catalog
///
/// Text primitives use the case-insensitive POSIX regex operator `~*` with the
/// expression rendered as an alternation of escaped literals.
#[derive(Clone)]
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    /// Create a new catalog client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new catalog client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL catalog");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    async fn fetch(&self, query: PgQuery<'_>) -> Result<Vec<Product>, StoreError> {
        let rows = query.fetch_all(&self.pool).await?;
        let products = rows.iter().map(product_from_row).collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Catalog query returned {} products", products.len());

        Ok(products)
    }
}

fn product_from_row(row: &PgRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        tag: row.try_get("tag")?,
    })
}

fn select(predicate: &str) -> String {
    format!("SELECT {PRODUCT_COLUMNS} FROM product WHERE {predicate} ORDER BY id")
}

impl CatalogStore for PostgresCatalog {
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        let sql = select("TRUE");
        self.fetch(sqlx::query(&sql)).await
    }

    async fn containment_search(&self, expr: &SearchExpression) -> Result<Vec<Product>, StoreError> {
        let sql = select("(name ~* $1 OR description ~* $1)");
        self.fetch(sqlx::query(&sql).bind(expr.to_regex_pattern())).await
    }

    async fn name_similarity_search(&self, expr: &SearchExpression) -> Result<Vec<Product>, StoreError> {
        let sql = select("name ~* $1");
        self.fetch(sqlx::query(&sql).bind(expr.to_regex_pattern())).await
    }

    async fn price_range_search(&self, min: f64, max: f64) -> Result<Vec<Product>, StoreError> {
        let sql = select("price BETWEEN $1 AND $2");
        self.fetch(sqlx::query(&sql).bind(min).bind(max)).await
    }

    async fn tag_search(&self, tag: &str) -> Result<Vec<Product>, StoreError> {
        let sql = select("tag = $1");
        self.fetch(sqlx::query(&sql).bind(tag.to_string())).await
    }

    async fn price_range_and_tag_and_text_search(
        &self,
        min: f64,
        max: f64,
        tag: &str,
        expr: &SearchExpression,
    ) -> Result<Vec<Product>, StoreError> {
        let sql = select("price BETWEEN $1 AND $2 AND tag = $3 AND (name ~* $4 OR description ~* $4)");
        self.fetch(
            sqlx::query(&sql)
                .bind(min)
                .bind(max)
                .bind(tag.to_string())
                .bind(expr.to_regex_pattern()),
        )
        .await
    }

    async fn price_range_and_text_search(
        &self,
        min: f64,
        max: f64,
        expr: &SearchExpression,
    ) -> Result<Vec<Product>, StoreError> {
        let sql = select("price BETWEEN $1 AND $2 AND (name ~* $3 OR description ~* $3)");
        self.fetch(
            sqlx::query(&sql)
                .bind(min)
                .bind(max)
                .bind(expr.to_regex_pattern()),
        )
        .await
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
