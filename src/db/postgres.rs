//! Postgres-backed catalog repository
//!
//! Tables follow the ORM naming of the ordering platform: snake-case table
//! names, quoted camelCase columns (`"restaurantId"`, `"isVeg"`, ...).

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::records::{
    AuthenticFilter, AuthenticRecord, CategoryRecord, LineItem, OrderRecord, OrderStatus,
    ProductFilter, ProductRecord, RestaurantRecord,
};
use super::repository::{CatalogRepository, PageSource};

const RESTAURANT_COLUMNS: &str = r#"id, title, logo, address, tags"#;
const CATEGORY_COLUMNS: &str = r#"id, name, "restaurantId""#;
const PRODUCT_COLUMNS: &str = r#"id, "categoryId", title, description, details, "imageUrl",
       price, "isVeg", "seasonalTag""#;

/// Escape `%`, `_` and `\` so user input is matched literally inside LIKE
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach categories (and their products) to already loaded restaurants
    async fn expand_menus(&self, restaurants: &mut [RestaurantRecord]) -> Result<()> {
        if restaurants.is_empty() {
            return Ok(());
        }

        let restaurant_ids: Vec<Uuid> = restaurants.iter().map(|r| r.id).collect();
        let categories = sqlx::query_as::<_, CategoryRecord>(&format!(
            r#"
            SELECT {CATEGORY_COLUMNS}
            FROM categories
            WHERE "restaurantId" = ANY($1)
            ORDER BY "createdAt", id
            "#
        ))
        .bind(&restaurant_ids)
        .fetch_all(&self.pool)
        .await?;

        let category_ids: Vec<Uuid> = categories.iter().map(|c| c.id).collect();
        let products = self.find_products_by_category_ids(&category_ids).await?;

        let mut products_by_category: HashMap<Uuid, Vec<ProductRecord>> = HashMap::new();
        for product in products {
            if let Some(category_id) = product.category_id {
                products_by_category
                    .entry(category_id)
                    .or_default()
                    .push(product);
            }
        }

        let mut categories_by_restaurant: HashMap<Uuid, Vec<CategoryRecord>> = HashMap::new();
        for mut category in categories {
            category.products = products_by_category
                .remove(&category.id)
                .unwrap_or_default();
            if let Some(restaurant_id) = category.restaurant_id {
                categories_by_restaurant
                    .entry(restaurant_id)
                    .or_default()
                    .push(category);
            }
        }

        for restaurant in restaurants.iter_mut() {
            restaurant.categories = categories_by_restaurant
                .remove(&restaurant.id)
                .unwrap_or_default();
        }

        Ok(())
    }
}

#[async_trait]
impl PageSource<ProductFilter, ProductRecord> for PgCatalogRepository {
    async fn count(&self, filter: &ProductFilter) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM products
            WHERE ($1::bool IS NULL OR "isVeg" = $1)
            "#,
        )
        .bind(filter.is_veg)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    async fn fetch(
        &self,
        filter: &ProductFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ProductRecord>> {
        let records = sqlx::query_as::<_, ProductRecord>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE ($1::bool IS NULL OR "isVeg" = $1)
            ORDER BY "createdAt", id
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(filter.is_veg)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}

/// Row shape for `authentic` joined with its product
#[derive(sqlx::FromRow)]
struct AuthenticRow {
    authentic_id: Uuid,
    #[sqlx(flatten)]
    product: ProductRecord,
}

#[async_trait]
impl PageSource<AuthenticFilter, AuthenticRecord> for PgCatalogRepository {
    async fn count(&self, _filter: &AuthenticFilter) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM authentic")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn fetch(
        &self,
        _filter: &AuthenticFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AuthenticRecord>> {
        let rows = sqlx::query_as::<_, AuthenticRow>(
            r#"
            SELECT a.id AS authentic_id,
                   p.id, p."categoryId", p.title, p.description, p.details, p."imageUrl",
                   p.price, p."isVeg", p."seasonalTag"
            FROM authentic a
            JOIN products p ON p.id = a.product_id
            ORDER BY a."createdAt", a.id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| AuthenticRecord {
                id: row.authentic_id,
                product: row.product,
            })
            .collect())
    }
}

/// `orders."createdAt"` is a `timestamp` column (no time zone) holding UTC
type OrderTimestamp = NaiveDateTime;

/// Row shape of `orders`
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    #[sqlx(rename = "userId")]
    user_id: Option<Uuid>,
    status: OrderStatus,
    #[sqlx(rename = "createdAt")]
    created_at: OrderTimestamp,
    products: sqlx::types::Json<Vec<LineItem>>,
}

impl From<OrderRow> for OrderRecord {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            status: row.status,
            created_at: row.created_at.and_utc(),
            line_items: row.products,
        }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn find_restaurants(&self, address_contains: &str) -> Result<Vec<RestaurantRecord>> {
        let pattern = format!("%{}%", escape_like(address_contains));
        let mut restaurants = sqlx::query_as::<_, RestaurantRecord>(&format!(
            r#"
            SELECT {RESTAURANT_COLUMNS}
            FROM restaurants
            WHERE address ILIKE $1
            ORDER BY "createdAt", id
            "#
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        self.expand_menus(&mut restaurants).await?;
        Ok(restaurants)
    }

    async fn find_restaurant(&self, id: Uuid) -> Result<Option<RestaurantRecord>> {
        let record = sqlx::query_as::<_, RestaurantRecord>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(restaurant) = record else {
            return Ok(None);
        };

        let mut restaurants = vec![restaurant];
        self.expand_menus(&mut restaurants).await?;
        Ok(restaurants.pop())
    }

    async fn find_categories(&self) -> Result<Vec<CategoryRecord>> {
        let records = sqlx::query_as::<_, CategoryRecord>(&format!(
            r#"SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY "createdAt", id"#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn count_products(&self, category_id: Uuid) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as(r#"SELECT COUNT(*) FROM products WHERE "categoryId" = $1"#)
                .bind(category_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }

    async fn find_products_by_category_ids(&self, ids: &[Uuid]) -> Result<Vec<ProductRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let records = sqlx::query_as::<_, ProductRecord>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE "categoryId" = ANY($1)
            ORDER BY "createdAt", id
            "#
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn find_orders(
        &self,
        status: OrderStatus,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<OrderRecord>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, "userId", status, "createdAt", products
            FROM orders
            WHERE status = $1 AND "createdAt" BETWEEN $2 AND $3
            ORDER BY "createdAt", id
            "#,
        )
        .bind(status)
        .bind(start.naive_utc())
        .bind(end.naive_utc())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(OrderRecord::from).collect())
    }

    async fn find_product_by_id(&self, id: Uuid) -> Result<Option<ProductRecord>> {
        let record = sqlx::query_as::<_, ProductRecord>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_products_by_seasonal_prefix(&self, prefix: &str) -> Result<Vec<ProductRecord>> {
        let pattern = format!("{}%", escape_like(prefix));
        let records = sqlx::query_as::<_, ProductRecord>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE "seasonalTag" ILIKE $1
            ORDER BY "createdAt", id
            "#
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn find_recommended_products(&self, restaurant_id: Uuid) -> Result<Vec<ProductRecord>> {
        let records = sqlx::query_as::<_, ProductRecord>(
            r#"
            SELECT p.id, p."categoryId", p.title, p.description, p.details, p."imageUrl",
                   p.price, p."isVeg", p."seasonalTag"
            FROM recommendations r
            JOIN products p ON p.id = r.product_id
            WHERE r.restaurant_id = $1
            ORDER BY r."order" ASC
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
