//! GraphQL schema definition
//!
//! The discovery API is read-only, so there are no mutations or subscriptions.

use std::sync::Arc;

use async_graphql::{EmptyMutation, EmptySubscription, MergedObject, Schema};

use crate::config::DiscoveryConfig;
use crate::db::CatalogRepository;

use super::queries::{CategoryQueries, ProductQueries, RestaurantQueries, SearchQueries};

/// The GraphQL schema type
pub type PlatterSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(SearchQueries, CategoryQueries, ProductQueries, RestaurantQueries);

/// Build the GraphQL schema with all resolvers
pub fn build_schema(repo: Arc<dyn CatalogRepository>, config: DiscoveryConfig) -> PlatterSchema {
    Schema::build(QueryRoot::default(), EmptyMutation, EmptySubscription)
        .data(repo)
        .data(config)
        .finish()
}
