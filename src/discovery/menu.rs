//! Restaurant menu with the curated "Recommended" section on top

use tracing::debug;
use uuid::{Uuid, uuid};

use crate::db::{CatalogRepository, CategoryRecord};
use crate::error::{DiscoveryError, Result};

/// Fixed id of the synthetic "Recommended" category
pub const RECOMMENDED_CATEGORY_ID: Uuid = uuid!("179a5d4b-0023-41be-9684-5b66d4a1ff30");

pub const RECOMMENDED_CATEGORY_NAME: &str = "Recommended";

/// Categories of a restaurant, prefixed with "Recommended" when it has
/// recommended products
pub async fn restaurant_menu<R>(repo: &R, restaurant_id: Uuid) -> Result<Vec<CategoryRecord>>
where
    R: CatalogRepository + ?Sized,
{
    let restaurant = repo
        .find_restaurant(restaurant_id)
        .await?
        .ok_or_else(|| DiscoveryError::not_found("Restaurant with this id does not exist"))?;

    let recommended = repo.find_recommended_products(restaurant_id).await?;
    debug!(
        restaurant_id = %restaurant_id,
        categories = restaurant.categories.len(),
        recommended = recommended.len(),
        "Assembling restaurant menu"
    );

    let mut menu = Vec::with_capacity(restaurant.categories.len() + 1);
    if !recommended.is_empty() {
        menu.push(CategoryRecord {
            id: RECOMMENDED_CATEGORY_ID,
            name: RECOMMENDED_CATEGORY_NAME.to_string(),
            restaurant_id: Some(restaurant_id),
            products: recommended,
        });
    }
    menu.extend(restaurant.categories);

    Ok(menu)
}
