//! Platter - restaurant and product discovery over a food-delivery catalog
//!
//! The engine lives in [`discovery`] and reads through the
//! [`CatalogRepository`](db::CatalogRepository) contract; [`graphql`] exposes
//! it over HTTP.

pub mod api;
pub mod config;
pub mod db;
pub mod discovery;
pub mod error;
pub mod graphql;

use std::sync::Arc;

use crate::config::Config;
use crate::db::CatalogRepository;
use crate::graphql::PlatterSchema;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub schema: PlatterSchema,
}
