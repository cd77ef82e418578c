//! Merge corpus matches into one ranked, type-tagged, deduplicated list

use std::collections::HashSet;

use uuid::Uuid;

use crate::db::{CategoryRecord, ProductRecord, RestaurantRecord};

use super::fuzzy::FuzzyMatch;

/// Default number of ranked results returned
pub const DEFAULT_RESULT_LIMIT: usize = 5;

/// Kind of entity behind a search result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Restaurant,
    Category,
    Product,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Restaurant => "restaurant",
            ItemType::Category => "category",
            ItemType::Product => "product",
        }
    }
}

/// The entity a search result points at
#[derive(Debug, Clone, PartialEq)]
pub enum SearchItem {
    Restaurant(RestaurantRecord),
    Category(CategoryRecord),
    Product(ProductRecord),
}

impl SearchItem {
    pub fn id(&self) -> Uuid {
        match self {
            SearchItem::Restaurant(r) => r.id,
            SearchItem::Category(c) => c.id,
            SearchItem::Product(p) => p.id,
        }
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            SearchItem::Restaurant(_) => ItemType::Restaurant,
            SearchItem::Category(_) => ItemType::Category,
            SearchItem::Product(_) => ItemType::Product,
        }
    }

    /// The field the precision filter checks
    pub fn matched_text(&self) -> &str {
        match self {
            SearchItem::Restaurant(r) => &r.title,
            SearchItem::Category(c) => &c.name,
            SearchItem::Product(p) => &p.title,
        }
    }
}

/// One ranked search result
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMatch {
    pub item: SearchItem,
    pub score: f64,
}

impl SearchMatch {
    pub fn item_type(&self) -> ItemType {
        self.item.item_type()
    }
}

/// Rank restaurant-level matches into the final result list.
///
/// Every restaurant match expands into the restaurant itself, then each of
/// its categories, then each category's products, all carrying the
/// restaurant's score. An entry survives only when the query literally
/// occurs (case-insensitively) in its title or name, and only the first
/// entry seen for a given id is kept. The survivors are sorted ascending by
/// score, ties keeping expansion order, and cut to `limit`.
pub fn rank(query: &str, matches: &[FuzzyMatch<&RestaurantRecord>], limit: usize) -> Vec<SearchMatch> {
    let needle = query.to_lowercase();
    let mut seen: HashSet<Uuid> = HashSet::new();
    let mut ranked: Vec<SearchMatch> = Vec::new();

    let mut accept = |item: SearchItem, score: f64| {
        if item.matched_text().to_lowercase().contains(&needle) && seen.insert(item.id()) {
            ranked.push(SearchMatch { item, score });
        }
    };

    for m in matches {
        let restaurant = m.entity;
        accept(SearchItem::Restaurant(restaurant.clone()), m.score);

        for category in &restaurant.categories {
            accept(SearchItem::Category(category.clone()), m.score);

            for product in &category.products {
                accept(SearchItem::Product(product.clone()), m.score);
            }
        }
    }

    ranked.sort_by(|a, b| {
        a.score
            .partial_cmp(&b.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}
