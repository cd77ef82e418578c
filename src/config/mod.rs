//! Application configuration management

use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Database URL (PostgreSQL)
    pub database_url: String,

    /// Maximum pooled database connections
    pub database_max_connections: u32,

    /// Tunables for the discovery engine
    pub discovery: DiscoveryConfig,
}

/// Tunables for search, clustering, trending and collection paging
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryConfig {
    /// Worst acceptable fuzzy score (0.0 = perfect, 1.0 = anything)
    pub search_threshold: f64,

    /// Characters from the start of a field over which a match's position
    /// penalty grows to 1.0
    pub search_distance: usize,

    /// Maximum number of search results returned
    pub search_limit: usize,

    /// Number of category clusters surfaced as popular
    pub popular_category_limit: usize,

    /// Length of the trailing trending window in days
    pub trending_window_days: i64,

    /// Page size for product collections
    pub collection_page_size: i64,

    /// Upper bound on concurrent repository reads per request
    pub max_concurrent_reads: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            search_threshold: 0.4,
            search_distance: 100,
            search_limit: 5,
            popular_category_limit: 5,
            trending_window_days: 7,
            collection_page_size: 12,
            max_concurrent_reads: 8,
        }
    }
}

impl DiscoveryConfig {
    /// Build from an arbitrary key lookup, falling back to defaults for
    /// missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let search_threshold: f64 =
            parse_or(&lookup, "SEARCH_THRESHOLD", defaults.search_threshold)?;
        if !(0.0..=1.0).contains(&search_threshold) {
            anyhow::bail!("SEARCH_THRESHOLD must be between 0.0 and 1.0");
        }

        let config = Self {
            search_threshold,
            search_distance: parse_or(&lookup, "SEARCH_DISTANCE", defaults.search_distance)?,
            search_limit: parse_or(&lookup, "SEARCH_LIMIT", defaults.search_limit)?,
            popular_category_limit: parse_or(
                &lookup,
                "POPULAR_CATEGORY_LIMIT",
                defaults.popular_category_limit,
            )?,
            trending_window_days: parse_or(
                &lookup,
                "TRENDING_WINDOW_DAYS",
                defaults.trending_window_days,
            )?,
            collection_page_size: parse_or(
                &lookup,
                "COLLECTION_PAGE_SIZE",
                defaults.collection_page_size,
            )?,
            max_concurrent_reads: parse_or(
                &lookup,
                "MAX_CONCURRENT_READS",
                defaults.max_concurrent_reads,
            )?
            .max(1),
        };

        if config.search_distance < 1 {
            anyhow::bail!("SEARCH_DISTANCE must be at least 1");
        }
        if config.collection_page_size < 1 {
            anyhow::bail!("COLLECTION_PAGE_SIZE must be at least 1");
        }

        Ok(config)
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}", key)),
        None => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is required")?;

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .context("Invalid PORT")?,

            database_url,

            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),

            discovery: DiscoveryConfig::from_lookup(|key| env::var(key).ok())?,
        })
    }
}
