//! GraphQL API for restaurant and product discovery
//!
//! This is the single query surface of the Platter backend. Each domain has
//! its own `#[derive(Default)]` query struct under `queries/`, merged into
//! `QueryRoot` in `schema.rs`.

pub(crate) mod helpers;
pub mod queries;
mod schema;
pub mod types;

pub use schema::{PlatterSchema, QueryRoot, build_schema};
