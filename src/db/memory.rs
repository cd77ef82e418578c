//! In-memory catalog
//!
//! Serves the same read contract as the Postgres repository from plain
//! vectors. Used for fixtures, tests and running the engine without a
//! database.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::records::{
    AuthenticFilter, AuthenticRecord, CategoryRecord, OrderRecord, OrderStatus, ProductFilter,
    ProductRecord, RestaurantRecord,
};
use super::repository::{CatalogRepository, PageSource};

/// Recommended product of a restaurant with its curated position
#[derive(Debug, Clone)]
struct Recommendation {
    restaurant_id: Uuid,
    product_id: Uuid,
    order: i32,
}

/// Catalog held entirely in memory
///
/// Restaurants own their categories and products; insertion order is the
/// store order reported to callers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    restaurants: Vec<RestaurantRecord>,
    orders: Vec<OrderRecord>,
    authentic: Vec<Uuid>,
    recommendations: Vec<Recommendation>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a restaurant together with its nested menu.
    ///
    /// Back references (`restaurant_id`, `category_id`) are filled in.
    pub fn with_restaurant(mut self, mut restaurant: RestaurantRecord) -> Self {
        for category in &mut restaurant.categories {
            category.restaurant_id = Some(restaurant.id);
            for product in &mut category.products {
                product.category_id = Some(category.id);
            }
        }
        self.restaurants.push(restaurant);
        self
    }

    pub fn with_order(mut self, order: OrderRecord) -> Self {
        self.orders.push(order);
        self
    }

    /// List a product in the curated "authentic" collection
    pub fn with_authentic(mut self, product_id: Uuid) -> Self {
        self.authentic.push(product_id);
        self
    }

    pub fn with_recommendation(mut self, restaurant_id: Uuid, product_id: Uuid, order: i32) -> Self {
        self.recommendations.push(Recommendation {
            restaurant_id,
            product_id,
            order,
        });
        self
    }

    /// Drop a product from the catalog, leaving order snapshots untouched
    pub fn remove_product(&mut self, product_id: Uuid) {
        for restaurant in &mut self.restaurants {
            for category in &mut restaurant.categories {
                category.products.retain(|p| p.id != product_id);
            }
        }
    }

    fn categories(&self) -> impl Iterator<Item = &CategoryRecord> {
        self.restaurants.iter().flat_map(|r| r.categories.iter())
    }

    fn products(&self) -> impl Iterator<Item = &ProductRecord> {
        self.categories().flat_map(|c| c.products.iter())
    }

    fn product(&self, id: Uuid) -> Option<&ProductRecord> {
        self.products().find(|p| p.id == id)
    }
}

fn window<T: Clone>(items: Vec<T>, offset: i64, limit: i64) -> Vec<T> {
    let offset = usize::try_from(offset).unwrap_or(0);
    let limit = usize::try_from(limit).unwrap_or(0);
    items.into_iter().skip(offset).take(limit).collect()
}

#[async_trait]
impl PageSource<ProductFilter, ProductRecord> for InMemoryCatalog {
    async fn count(&self, filter: &ProductFilter) -> Result<i64> {
        Ok(self.products().filter(|p| filter.accepts(p)).count() as i64)
    }

    async fn fetch(
        &self,
        filter: &ProductFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ProductRecord>> {
        let matching: Vec<ProductRecord> = self
            .products()
            .filter(|p| filter.accepts(p))
            .cloned()
            .collect();
        Ok(window(matching, offset, limit))
    }
}

#[async_trait]
impl PageSource<AuthenticFilter, AuthenticRecord> for InMemoryCatalog {
    async fn count(&self, _filter: &AuthenticFilter) -> Result<i64> {
        Ok(self.authentic.len() as i64)
    }

    async fn fetch(
        &self,
        _filter: &AuthenticFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AuthenticRecord>> {
        let listed: Vec<AuthenticRecord> = self
            .authentic
            .iter()
            .filter_map(|id| {
                self.product(*id).map(|product| AuthenticRecord {
                    id: *id,
                    product: product.clone(),
                })
            })
            .collect();
        Ok(window(listed, offset, limit))
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn find_restaurants(&self, address_contains: &str) -> Result<Vec<RestaurantRecord>> {
        let needle = address_contains.to_lowercase();
        Ok(self
            .restaurants
            .iter()
            .filter(|r| r.address.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_restaurant(&self, id: Uuid) -> Result<Option<RestaurantRecord>> {
        Ok(self.restaurants.iter().find(|r| r.id == id).cloned())
    }

    async fn find_categories(&self) -> Result<Vec<CategoryRecord>> {
        Ok(self
            .categories()
            .map(|c| CategoryRecord {
                products: Vec::new(),
                ..c.clone()
            })
            .collect())
    }

    async fn count_products(&self, category_id: Uuid) -> Result<i64> {
        Ok(self
            .categories()
            .find(|c| c.id == category_id)
            .map(|c| c.products.len() as i64)
            .unwrap_or(0))
    }

    async fn find_products_by_category_ids(&self, ids: &[Uuid]) -> Result<Vec<ProductRecord>> {
        Ok(self
            .products()
            .filter(|p| p.category_id.is_some_and(|id| ids.contains(&id)))
            .cloned()
            .collect())
    }

    async fn find_orders(
        &self,
        status: OrderStatus,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<OrderRecord>> {
        Ok(self
            .orders
            .iter()
            .filter(|o| o.status == status && o.created_at >= start && o.created_at <= end)
            .cloned()
            .collect())
    }

    async fn find_product_by_id(&self, id: Uuid) -> Result<Option<ProductRecord>> {
        Ok(self.product(id).cloned())
    }

    async fn find_products_by_seasonal_prefix(&self, prefix: &str) -> Result<Vec<ProductRecord>> {
        let prefix = prefix.to_lowercase();
        Ok(self
            .products()
            .filter(|p| {
                p.seasonal_tag
                    .as_deref()
                    .is_some_and(|tag| tag.to_lowercase().starts_with(&prefix))
            })
            .cloned()
            .collect())
    }

    async fn find_recommended_products(&self, restaurant_id: Uuid) -> Result<Vec<ProductRecord>> {
        let mut recommended: Vec<&Recommendation> = self
            .recommendations
            .iter()
            .filter(|r| r.restaurant_id == restaurant_id)
            .collect();
        recommended.sort_by_key(|r| r.order);

        Ok(recommended
            .into_iter()
            .filter_map(|r| self.product(r.product_id).cloned())
            .collect())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
