// Conversions from catalog records and discovery results to GraphQL types.

use rust_decimal::prelude::ToPrimitive;

use crate::db::{CategoryRecord, ProductRecord, RestaurantRecord};
use crate::discovery::{Page, PopularCategory as PopularCluster, SearchItem, SearchMatch};
use crate::graphql::types::{
    Category, ItemType, PaginatedResult, PopularCategory, Product, Restaurant, SearchResult,
};

/// Convert a ProductRecord to a GraphQL Product
pub(crate) fn product_record_to_graphql(r: ProductRecord) -> Product {
    Product {
        id: r.id.into(),
        title: r.title,
        description: r.description,
        details: r.details,
        image_url: r.image_url,
        price: r.price.to_f64().unwrap_or_default(),
        is_veg: r.is_veg,
        seasonal_tag: r.seasonal_tag,
    }
}

pub(crate) fn category_record_to_graphql(r: CategoryRecord) -> Category {
    Category {
        id: r.id.into(),
        name: r.name,
        products: r.products.into_iter().map(product_record_to_graphql).collect(),
    }
}

pub(crate) fn restaurant_record_to_graphql(r: RestaurantRecord) -> Restaurant {
    Restaurant {
        id: r.id.into(),
        title: r.title,
        logo: r.logo,
        address: r.address,
        tags: r.tags,
        categories: r
            .categories
            .into_iter()
            .map(category_record_to_graphql)
            .collect(),
    }
}

pub(crate) fn search_match_to_graphql(m: SearchMatch) -> SearchResult {
    let item_type = m.item_type().as_str().to_string();
    let item = match m.item {
        SearchItem::Restaurant(r) => ItemType::Restaurant(restaurant_record_to_graphql(r)),
        SearchItem::Category(c) => ItemType::Category(category_record_to_graphql(c)),
        SearchItem::Product(p) => ItemType::Product(product_record_to_graphql(p)),
    };
    SearchResult {
        item,
        score: m.score,
        item_type,
    }
}

pub(crate) fn popular_category_to_graphql(c: PopularCluster) -> PopularCategory {
    PopularCategory {
        name: c.name,
        products: c.products.into_iter().map(product_record_to_graphql).collect(),
    }
}

pub(crate) fn product_page_to_graphql(page: Page<ProductRecord>) -> PaginatedResult {
    let page = page.map(product_record_to_graphql);
    PaginatedResult {
        total_records: page.total_records,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
        results: page.results,
    }
}
