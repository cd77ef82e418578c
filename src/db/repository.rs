//! Read contract between the discovery engine and the entity store
//!
//! The engine never writes. Every method is a plain read that either the
//! Postgres repository or the in-memory catalog can serve:
//!
//! ```rust,ignore
//! let restaurants = repo.find_restaurants("Mumbai").await?;
//! let count = repo.count_products(category.id).await?;
//! ```

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::records::{
    AuthenticFilter, AuthenticRecord, CategoryRecord, OrderRecord, OrderStatus, ProductFilter,
    ProductRecord, RestaurantRecord,
};

/// A filterable, countable collection that can be read one window at a time.
///
/// The same filter value is applied to both the count and the fetch so that
/// totals describe exactly the collection being sliced.
#[async_trait]
pub trait PageSource<F, T>: Send + Sync
where
    F: Send + Sync,
    T: Send,
{
    /// Count every entity matching the filter
    async fn count(&self, filter: &F) -> Result<i64>;

    /// Fetch at most `limit` matching entities starting at `offset`
    async fn fetch(&self, filter: &F, offset: i64, limit: i64) -> Result<Vec<T>>;
}

/// Catalog reads used by search, clustering, trending and collections
#[async_trait]
pub trait CatalogRepository:
    PageSource<ProductFilter, ProductRecord> + PageSource<AuthenticFilter, AuthenticRecord>
{
    /// Restaurants whose address contains `address_contains`
    /// (case-insensitive), with categories and products expanded
    async fn find_restaurants(&self, address_contains: &str) -> Result<Vec<RestaurantRecord>>;

    /// A single restaurant with categories and products expanded
    async fn find_restaurant(&self, id: Uuid) -> Result<Option<RestaurantRecord>>;

    /// Every category, without products
    async fn find_categories(&self) -> Result<Vec<CategoryRecord>>;

    /// Number of products owned by a category
    async fn count_products(&self, category_id: Uuid) -> Result<i64>;

    /// Products belonging to any of the given categories
    async fn find_products_by_category_ids(&self, ids: &[Uuid]) -> Result<Vec<ProductRecord>>;

    /// Orders in `status` created within `[start, end]`
    async fn find_orders(
        &self,
        status: OrderStatus,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<OrderRecord>>;

    async fn find_product_by_id(&self, id: Uuid) -> Result<Option<ProductRecord>>;

    /// Products whose seasonal tag starts with `prefix` (case-insensitive)
    async fn find_products_by_seasonal_prefix(&self, prefix: &str) -> Result<Vec<ProductRecord>>;

    /// Recommended products of a restaurant, in curated order
    async fn find_recommended_products(&self, restaurant_id: Uuid) -> Result<Vec<ProductRecord>>;

    /// Cheapest round trip to the store, used by readiness checks
    async fn health_check(&self) -> Result<()>;
}
