//! Curated product collections served as paginated listings

use std::str::FromStr;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::db::{AuthenticFilter, AuthenticRecord, CatalogRepository, ProductFilter, ProductRecord};
use crate::error::{DiscoveryError, Result};

use super::pagination::{Page, PageRequest, paginate};
use super::trending::{self, TrendingOptions};

/// Default page size for collections
pub const DEFAULT_PAGE_SIZE: i64 = 12;

/// Named product collection a client can browse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductCollection {
    /// Vegetarian products
    VeggieFriendly,
    /// Most delivered products of the trailing window
    TrendingThisWeek,
    /// Hand-picked authentic dishes
    Authentic,
}

impl ProductCollection {
    pub fn key(&self) -> &'static str {
        match self {
            ProductCollection::VeggieFriendly => "Veggie-Friendly",
            ProductCollection::TrendingThisWeek => "Trending-this-week",
            ProductCollection::Authentic => "Authentic",
        }
    }
}

impl FromStr for ProductCollection {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Veggie-Friendly" => Ok(ProductCollection::VeggieFriendly),
            "Trending-this-week" => Ok(ProductCollection::TrendingThisWeek),
            "Authentic" => Ok(ProductCollection::Authentic),
            other => Err(DiscoveryError::invalid_argument(format!(
                "Incorrect category: {}",
                other
            ))),
        }
    }
}

/// Options for collection listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionOptions {
    pub page_size: i64,
    pub trending: TrendingOptions,
}

impl Default for CollectionOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            trending: TrendingOptions::default(),
        }
    }
}

/// One page of a named collection
pub async fn products_by_collection<R>(
    repo: &R,
    key: &str,
    page: i64,
    now: DateTime<Utc>,
    options: CollectionOptions,
) -> Result<Page<ProductRecord>>
where
    R: CatalogRepository + ?Sized,
{
    let collection: ProductCollection = key.parse()?;
    let request = PageRequest::new(page, options.page_size)?;

    let result = match collection {
        ProductCollection::VeggieFriendly => {
            paginate::<ProductFilter, ProductRecord, R>(repo, &ProductFilter::vegetarian(), request)
                .await?
        }
        ProductCollection::TrendingThisWeek => {
            trending::trending_products(repo, now, request, options.trending).await?
        }
        ProductCollection::Authentic => {
            paginate::<AuthenticFilter, AuthenticRecord, R>(repo, &AuthenticFilter, request)
                .await?
                .map(|entry| entry.product)
        }
    };

    info!(
        operation = "products_by_collection",
        collection = collection.key(),
        page = result.page,
        total_records = result.total_records,
        returned = result.results.len(),
        "Collection page served"
    );

    Ok(result)
}
