//! Discovery engine: search, category clustering, trending and collections
//!
//! Every operation is a pure read over a [`CatalogRepository`](crate::db::CatalogRepository)
//! and owns nothing beyond the request it serves.

pub mod clustering;
pub mod collections;
pub mod fuzzy;
pub mod menu;
pub mod pagination;
pub mod ranker;
pub mod search;
pub mod seasonal;
pub mod trending;

pub use clustering::{
    CategoryCount, CategoryGroup, PopularCategory, PopularCategoryOptions, cluster_categories,
    popular_categories,
};
pub use collections::{CollectionOptions, ProductCollection, products_by_collection};
pub use fuzzy::{FuzzyMatch, FuzzyMatcher};
pub use menu::restaurant_menu;
pub use pagination::{Page, PageRequest, paginate};
pub use ranker::{ItemType, SearchItem, SearchMatch};
pub use search::{FieldWeights, SearchOptions, search_items};
pub use seasonal::{Season, seasonal_products};
pub use trending::{TrendingOptions, trending_products};

use crate::config::DiscoveryConfig;

impl From<&DiscoveryConfig> for SearchOptions {
    fn from(config: &DiscoveryConfig) -> Self {
        Self {
            threshold: config.search_threshold,
            distance: config.search_distance,
            limit: config.search_limit,
            weights: FieldWeights::default(),
        }
    }
}

impl From<&DiscoveryConfig> for PopularCategoryOptions {
    fn from(config: &DiscoveryConfig) -> Self {
        Self {
            limit: config.popular_category_limit,
            max_concurrent_reads: config.max_concurrent_reads,
        }
    }
}

impl From<&DiscoveryConfig> for TrendingOptions {
    fn from(config: &DiscoveryConfig) -> Self {
        Self {
            window_days: config.trending_window_days,
            max_concurrent_reads: config.max_concurrent_reads,
        }
    }
}

impl From<&DiscoveryConfig> for CollectionOptions {
    fn from(config: &DiscoveryConfig) -> Self {
        Self {
            page_size: config.collection_page_size,
            trending: TrendingOptions::from(config),
        }
    }
}
