//! Seasonal products for the current month

use chrono::{DateTime, Datelike, Utc};
use tracing::info;

use crate::db::{CatalogRepository, ProductRecord};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Summer,
    Monsoon,
    Winter,
}

impl Season {
    /// Season for a zero-based month (0 = January).
    ///
    /// March-June is summer, July-October is monsoon, the rest is winter.
    pub fn for_month(month0: u32) -> Self {
        match month0 {
            2..=5 => Season::Summer,
            6..=9 => Season::Monsoon,
            _ => Season::Winter,
        }
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self::for_month(now.month0())
    }

    /// Prefix that seasonal tags of this season start with
    pub fn tag_prefix(&self) -> &'static str {
        match self {
            Season::Summer => "Summer",
            Season::Monsoon => "Monsoon",
            Season::Winter => "Winter",
        }
    }
}

/// Products tagged for the season `now` falls in
pub async fn seasonal_products<R>(repo: &R, now: DateTime<Utc>) -> Result<Vec<ProductRecord>>
where
    R: CatalogRepository + ?Sized,
{
    let season = Season::at(now);
    let products = repo
        .find_products_by_seasonal_prefix(season.tag_prefix())
        .await?;

    info!(
        operation = "seasonal_products",
        season = season.tag_prefix(),
        results = products.len(),
        "Seasonal products fetched"
    );

    Ok(products)
}
