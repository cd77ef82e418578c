//! Database connection and catalog repositories

pub mod memory;
pub mod postgres;
pub mod records;
pub mod repository;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub use memory::InMemoryCatalog;
pub use postgres::PgCatalogRepository;
pub use records::{
    AuthenticFilter, AuthenticRecord, CategoryRecord, LineItem, OrderRecord, OrderStatus,
    ProductFilter, ProductRecord, ProductSnapshot, RestaurantRecord,
};
pub use repository::{CatalogRepository, PageSource};

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool with retry logic
    /// Retries every `retry_interval` until successful
    pub async fn connect_with_retry(
        url: &str,
        max_connections: u32,
        retry_interval: std::time::Duration,
    ) -> Self {
        loop {
            match PgPoolOptions::new()
                .max_connections(max_connections)
                .acquire_timeout(std::time::Duration::from_secs(10))
                .connect(url)
                .await
            {
                Ok(pool) => {
                    return Self { pool };
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        retry_in_secs = retry_interval.as_secs(),
                        "Database connection failed, retrying"
                    );
                    tokio::time::sleep(retry_interval).await;
                }
            }
        }
    }

    /// Get a catalog repository
    pub fn catalog(&self) -> PgCatalogRepository {
        PgCatalogRepository::new(self.pool.clone())
    }
}
