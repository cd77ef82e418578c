//! Trending products: delivered quantity over a trailing window

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::db::{CatalogRepository, OrderRecord, OrderStatus, ProductRecord};
use crate::error::Result;

use super::pagination::{Page, PageRequest};

/// Default trailing window length in days
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Options for the trending aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendingOptions {
    pub window_days: i64,
    pub max_concurrent_reads: usize,
}

impl Default for TrendingOptions {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            max_concurrent_reads: 8,
        }
    }
}

/// Total ordered quantity per product id, ranked by quantity (descending).
/// Products with equal totals keep the order in which they were first seen.
pub fn aggregate_quantities(orders: &[OrderRecord]) -> Vec<(Uuid, i64)> {
    let mut totals: Vec<(Uuid, i64)> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    for order in orders {
        for item in order.line_items.iter() {
            match index.get(&item.product.id) {
                Some(&i) => totals[i].1 += item.quantity,
                None => {
                    index.insert(item.product.id, totals.len());
                    totals.push((item.product.id, item.quantity));
                }
            }
        }
    }

    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

/// Delivered orders from the trailing window, aggregated, ranked and paged.
///
/// Products that no longer exist are skipped, so a page can hold fewer than
/// `limit` entries.
pub async fn trending_products<R>(
    repo: &R,
    now: DateTime<Utc>,
    request: PageRequest,
    options: TrendingOptions,
) -> Result<Page<ProductRecord>>
where
    R: CatalogRepository + ?Sized,
{
    let start = now - Duration::days(options.window_days);
    let orders = repo.find_orders(OrderStatus::Delivered, start, now).await?;

    let ranked: Vec<Uuid> = aggregate_quantities(&orders)
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    let id_page = Page::from_window(request, ranked);

    debug!(
        orders = orders.len(),
        status = OrderStatus::Delivered.as_str(),
        ranked_products = id_page.total_records,
        page_ids = id_page.results.len(),
        "Aggregated trending quantities"
    );

    // `buffered` yields lookups in rank order
    let lookups: Vec<(Uuid, Option<ProductRecord>)> = stream::iter(id_page.results)
        .map(|id| async move {
            let product = repo.find_product_by_id(id).await?;
            Ok::<_, anyhow::Error>((id, product))
        })
        .buffered(options.max_concurrent_reads.max(1))
        .try_collect()
        .await?;

    let products: Vec<ProductRecord> = lookups
        .into_iter()
        .filter_map(|(id, product)| {
            if product.is_none() {
                warn!(product_id = %id, "Trending product no longer exists, skipping");
            }
            product
        })
        .collect();

    info!(
        operation = "trending_products",
        page = request.page(),
        limit = request.limit(),
        total_records = id_page.total_records,
        returned = products.len(),
        "Trending products computed"
    );

    Ok(Page::new(request, id_page.total_records, products))
}
