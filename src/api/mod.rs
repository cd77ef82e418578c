//! HTTP route definitions
//!
//! The discovery API is GraphQL at /graphql; the plain REST routes here are
//! liveness and readiness checks for orchestration.

pub mod health;
