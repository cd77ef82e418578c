//! Catalog and order records as read from the entity store

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Restaurant record with its menu expanded
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct RestaurantRecord {
    pub id: Uuid,
    pub title: String,
    pub logo: String,
    pub address: String,
    pub tags: Vec<String>,
    #[sqlx(skip)]
    pub categories: Vec<CategoryRecord>,
}

/// Category record; `products` is empty unless the query expanded it
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CategoryRecord {
    pub id: Uuid,
    pub name: String,
    #[sqlx(rename = "restaurantId")]
    pub restaurant_id: Option<Uuid>,
    #[sqlx(skip)]
    pub products: Vec<ProductRecord>,
}

/// Product record
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ProductRecord {
    pub id: Uuid,
    #[sqlx(rename = "categoryId")]
    pub category_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub details: String,
    #[sqlx(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub price: Decimal,
    #[sqlx(rename = "isVeg")]
    pub is_veg: bool,
    #[sqlx(rename = "seasonalTag")]
    pub seasonal_tag: Option<String>,
}

impl RestaurantRecord {
    pub fn new(title: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            logo: String::new(),
            address: address.into(),
            tags: Vec::new(),
            categories: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: CategoryRecord) -> Self {
        self.categories.push(category);
        self
    }
}

impl CategoryRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            restaurant_id: None,
            products: Vec::new(),
        }
    }

    pub fn with_product(mut self, product: ProductRecord) -> Self {
        self.products.push(product);
        self
    }
}

impl ProductRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id: None,
            title: title.into(),
            description: String::new(),
            details: String::new(),
            image_url: None,
            price: Decimal::ZERO,
            is_veg: false,
            seasonal_tag: None,
        }
    }

    pub fn vegetarian(mut self) -> Self {
        self.is_veg = true;
        self
    }

    pub fn with_seasonal_tag(mut self, tag: impl Into<String>) -> Self {
        self.seasonal_tag = Some(tag.into());
        self
    }
}

/// Delivery status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "orders_status_enum")]
pub enum OrderStatus {
    Placed,
    Preparing,
    Dispatched,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "Placed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Dispatched => "Dispatched",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

/// Product as captured inside an order at checkout time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
}

/// One embedded `{product, quantity}` entry of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product: ProductSnapshot,
    pub quantity: i64,
}

/// Order record with its embedded line items.
///
/// `created_at` is always UTC; stores that keep naive timestamps convert on read.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub line_items: sqlx::types::Json<Vec<LineItem>>,
}

impl OrderRecord {
    pub fn new(status: OrderStatus, created_at: DateTime<Utc>, line_items: Vec<LineItem>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: None,
            status,
            created_at,
            line_items: sqlx::types::Json(line_items),
        }
    }
}

impl LineItem {
    pub fn new(product_id: Uuid, quantity: i64) -> Self {
        Self {
            product: ProductSnapshot {
                id: product_id,
                title: String::new(),
            },
            quantity,
        }
    }
}

/// Curated "authentic" listing entry with the product relation expanded
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticRecord {
    pub id: Uuid,
    pub product: ProductRecord,
}

/// Filter over the product table used by paginated listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub is_veg: Option<bool>,
}

impl ProductFilter {
    pub fn vegetarian() -> Self {
        Self { is_veg: Some(true) }
    }

    pub fn accepts(&self, product: &ProductRecord) -> bool {
        self.is_veg.is_none_or(|is_veg| product.is_veg == is_veg)
    }
}

/// Filter over curated authentic listings (currently unrestricted)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AuthenticFilter;
