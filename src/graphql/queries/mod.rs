pub mod categories;
pub mod products;
pub mod restaurants;
pub mod search;

pub use categories::CategoryQueries;
pub use products::ProductQueries;
pub use restaurants::RestaurantQueries;
pub use search::SearchQueries;

pub(crate) mod prelude {
    pub(crate) use std::sync::Arc;

    pub(crate) use async_graphql::{Context, ErrorExtensions, Object, Result};

    pub(crate) use crate::config::DiscoveryConfig;
    pub(crate) use crate::db::CatalogRepository;
    pub(crate) use crate::discovery;
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
}
