//! GraphQL type definitions
//!
//! These types mirror the catalog records but are decorated with async-graphql attributes.

use async_graphql::{ID, SimpleObject, Union};

/// A dish on a restaurant's menu
#[derive(Debug, Clone, SimpleObject)]
pub struct Product {
    pub id: ID,
    pub title: String,
    pub description: String,
    pub details: String,
    pub image_url: Option<String>,
    /// Price in the store's currency unit
    pub price: f64,
    pub is_veg: bool,
    pub seasonal_tag: Option<String>,
}

/// A menu section
#[derive(Debug, Clone, SimpleObject)]
pub struct Category {
    pub id: ID,
    pub name: String,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Restaurant {
    pub id: ID,
    pub title: String,
    pub logo: String,
    pub address: String,
    pub tags: Vec<String>,
    pub categories: Vec<Category>,
}

/// The entity a search result points at
#[derive(Debug, Clone, Union)]
pub enum ItemType {
    Restaurant(Restaurant),
    Product(Product),
    Category(Category),
}

/// One ranked search hit
#[derive(Debug, Clone, SimpleObject)]
pub struct SearchResult {
    pub item: ItemType,
    /// Match quality, 0.0 is a perfect match
    pub score: f64,
    /// `restaurant`, `category` or `product`
    #[graphql(name = "type")]
    pub item_type: String,
}

/// A cluster of related categories with all of their products
#[derive(Debug, Clone, SimpleObject)]
pub struct PopularCategory {
    pub name: String,
    pub products: Vec<Product>,
}

/// One page of a product collection
#[derive(Debug, Clone, SimpleObject)]
pub struct PaginatedResult {
    pub total_records: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub results: Vec<Product>,
}
