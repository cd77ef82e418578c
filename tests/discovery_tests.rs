//! Integration tests for the discovery engine
//!
//! These drive the public operations end to end against the in-memory catalog:
//! - Search ranking and its guarantees
//! - Category clustering
//! - Trending aggregation and collection paging
//! - Seasonal products and restaurant menus
//! - Fan-out reads that complete out of order

use std::collections::HashSet;

use assert_matches::assert_matches;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use platter::db::{
    CategoryRecord, InMemoryCatalog, LineItem, OrderRecord, OrderStatus, ProductRecord,
    RestaurantRecord,
};
use platter::discovery::{
    self, CollectionOptions, ItemType, PopularCategoryOptions, SearchOptions,
    menu::RECOMMENDED_CATEGORY_ID,
};
use platter::error::DiscoveryError;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 7, 15, 18, 30, 0).unwrap()
}

fn pizza_palace() -> RestaurantRecord {
    RestaurantRecord::new("Pizza Palace", "12 Marine Drive, Mumbai")
        .with_category(
            CategoryRecord::new("Pizza")
                .with_product(ProductRecord::new("Margherita").vegetarian())
                .with_product(ProductRecord::new("Paneer Pizza").vegetarian()),
        )
        .with_category(CategoryRecord::new("Beverages").with_product(ProductRecord::new("Cola")))
}

// ============================================================================
// Search
// ============================================================================

mod search {
    use pretty_assertions::assert_eq;

    use super::*;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new()
            .with_restaurant(pizza_palace())
            .with_restaurant(
                RestaurantRecord::new("Curry House", "4 Linking Road, Mumbai").with_category(
                    CategoryRecord::new("Mains")
                        .with_product(ProductRecord::new("Butter Chicken"))
                        .with_product(ProductRecord::new("Pizza Naan")),
                ),
            )
            .with_restaurant(
                RestaurantRecord::new("Pizza Hub", "MG Road, Bengaluru")
                    .with_category(CategoryRecord::new("Pizza")),
            )
    }

    #[tokio::test]
    async fn test_exact_title_match_ranks_first() {
        let results =
            discovery::search_items(&catalog(), "Pizza Palace", "Mumbai", &SearchOptions::default())
                .await
                .unwrap();

        assert_eq!(results[0].item_type(), ItemType::Restaurant);
        assert_eq!(results[0].item.matched_text(), "Pizza Palace");
        assert_eq!(results[0].score, 0.0);

        let palace_hits = results
            .iter()
            .filter(|r| r.item.matched_text() == "Pizza Palace")
            .count();
        assert_eq!(palace_hits, 1);
    }

    #[tokio::test]
    async fn test_pizza_returns_restaurant_category_and_product() {
        let results = discovery::search_items(&catalog(), "pizza", "Mumbai", &SearchOptions::default())
            .await
            .unwrap();

        let texts: Vec<(ItemType, &str)> = results
            .iter()
            .map(|r| (r.item_type(), r.item.matched_text()))
            .collect();

        assert!(texts.contains(&(ItemType::Restaurant, "Pizza Palace")));
        assert!(texts.contains(&(ItemType::Category, "Pizza")));
        assert!(texts.contains(&(ItemType::Product, "Paneer Pizza")));
        // Bengaluru restaurants are outside the corpus
        assert!(!texts.contains(&(ItemType::Restaurant, "Pizza Hub")));
        // Nested entries need the literal query in their own text
        assert!(!texts.iter().any(|(_, t)| *t == "Margherita" || *t == "Cola"));
    }

    #[tokio::test]
    async fn test_results_are_bounded_sorted_and_unique() {
        let mut catalog = InMemoryCatalog::new();
        for i in 0..6 {
            catalog = catalog.with_restaurant(
                RestaurantRecord::new(format!("Biryani Point {}", i), "Hyderabad").with_category(
                    CategoryRecord::new("Biryani")
                        .with_product(ProductRecord::new("Chicken Biryani"))
                        .with_product(ProductRecord::new("Veg Biryani")),
                ),
            );
        }

        let results =
            discovery::search_items(&catalog, "biryani", "hyderabad", &SearchOptions::default())
                .await
                .unwrap();

        assert_eq!(results.len(), 5);
        assert!(results.windows(2).all(|w| w[0].score <= w[1].score));

        let ids: HashSet<Uuid> = results.iter().map(|r| r.item.id()).collect();
        assert_eq!(ids.len(), results.len());
    }

    #[tokio::test]
    async fn test_unknown_city_is_not_found() {
        let err = discovery::search_items(&catalog(), "pizza", "Atlantis", &SearchOptions::default())
            .await
            .unwrap_err();

        assert_matches!(err, DiscoveryError::NotFound(ref msg) if msg.ends_with("Atlantis"));
    }

    #[tokio::test]
    async fn test_blank_query_returns_nothing() {
        let results = discovery::search_items(&catalog(), "   ", "Mumbai", &SearchOptions::default())
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}

// ============================================================================
// Popular categories
// ============================================================================

mod popular_categories {
    use pretty_assertions::assert_eq;

    use super::*;

    fn category(name: &str, products: usize) -> CategoryRecord {
        (0..products).fold(CategoryRecord::new(name), |c, i| {
            c.with_product(ProductRecord::new(format!("{} item {}", name, i)))
        })
    }

    #[tokio::test]
    async fn test_fast_food_scenario() {
        let catalog = InMemoryCatalog::new().with_restaurant(
            RestaurantRecord::new("Snack Shack", "Pune")
                .with_category(category("Fast Food", 3))
                .with_category(category("Fast Snacks", 2))
                .with_category(category("Desserts", 5)),
        );

        let popular = discovery::popular_categories(&catalog, PopularCategoryOptions::default())
            .await
            .unwrap();

        let summary: Vec<(&str, usize)> = popular
            .iter()
            .map(|p| (p.name.as_str(), p.products.len()))
            .collect();
        assert_eq!(summary, vec![("fast food", 5), ("desserts", 5)]);
    }

    #[tokio::test]
    async fn test_caps_at_limit_and_is_repeatable() {
        let names = ["Starters", "Mains", "Breads", "Rice", "Drinks", "Desserts", "Soups"];
        let restaurant = names
            .iter()
            .enumerate()
            .fold(RestaurantRecord::new("Thali", "Jaipur"), |r, (i, name)| {
                r.with_category(category(name, i + 1))
            });
        let catalog = InMemoryCatalog::new().with_restaurant(restaurant);

        let first = discovery::popular_categories(&catalog, PopularCategoryOptions::default())
            .await
            .unwrap();
        let second = discovery::popular_categories(&catalog, PopularCategoryOptions::default())
            .await
            .unwrap();

        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
        assert_eq!(first[0].name, "soups");
    }

    #[tokio::test]
    async fn test_no_categories_is_not_found() {
        let err = discovery::popular_categories(&InMemoryCatalog::new(), PopularCategoryOptions::default())
            .await
            .unwrap_err();
        assert_matches!(err, DiscoveryError::NotFound(_));
    }
}

// ============================================================================
// Trending and collections
// ============================================================================

mod collections {
    use pretty_assertions::assert_eq;

    use super::*;

    pub(super) struct Fixture {
        pub(super) catalog: InMemoryCatalog,
        pub(super) paneer: Uuid,
        pub(super) dal: Uuid,
        pub(super) naan: Uuid,
    }

    pub(super) fn fixture() -> Fixture {
        let paneer = ProductRecord::new("Paneer Tikka").vegetarian();
        let dal = ProductRecord::new("Dal Makhani").vegetarian();
        let naan = ProductRecord::new("Garlic Naan").vegetarian();
        let ids = (paneer.id, dal.id, naan.id);

        let now = fixed_now();
        let catalog = InMemoryCatalog::new()
            .with_restaurant(
                RestaurantRecord::new("Punjab Grill", "Delhi").with_category(
                    CategoryRecord::new("North Indian")
                        .with_product(paneer)
                        .with_product(dal)
                        .with_product(naan)
                        .with_product(ProductRecord::new("Chicken Tikka")),
                ),
            )
            // Inside the window
            .with_order(OrderRecord::new(
                OrderStatus::Delivered,
                now - Duration::days(1),
                vec![LineItem::new(ids.1, 2), LineItem::new(ids.0, 1)],
            ))
            .with_order(OrderRecord::new(
                OrderStatus::Delivered,
                now - Duration::days(6),
                vec![LineItem::new(ids.0, 4)],
            ))
            // Outside the window
            .with_order(OrderRecord::new(
                OrderStatus::Delivered,
                now - Duration::days(8),
                vec![LineItem::new(ids.2, 100)],
            ))
            // Not delivered
            .with_order(OrderRecord::new(
                OrderStatus::Placed,
                now - Duration::hours(2),
                vec![LineItem::new(ids.2, 50)],
            ));

        Fixture {
            catalog,
            paneer: ids.0,
            dal: ids.1,
            naan: ids.2,
        }
    }

    fn titles(products: &[ProductRecord]) -> Vec<&str> {
        products.iter().map(|p| p.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_trending_counts_only_delivered_orders_in_window() {
        let f = fixture();
        let page = discovery::products_by_collection(
            &f.catalog,
            "Trending-this-week",
            1,
            fixed_now(),
            CollectionOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(titles(&page.results), vec!["Paneer Tikka", "Dal Makhani"]);
        assert_eq!(page.total_records, 2);
        assert_eq!(page.total_pages, 1);
        assert!(page.results.iter().all(|p| p.id != f.naan));
    }

    #[tokio::test]
    async fn test_trending_second_page() {
        let f = fixture();
        let options = CollectionOptions {
            page_size: 1,
            ..Default::default()
        };
        let fetch = |page| {
            discovery::products_by_collection(
                &f.catalog,
                "Trending-this-week",
                page,
                fixed_now(),
                options,
            )
        };

        let first = fetch(1).await.unwrap();
        assert_eq!(titles(&first.results), vec!["Paneer Tikka"]);

        let second = fetch(2).await.unwrap();
        assert_eq!(titles(&second.results), vec!["Dal Makhani"]);
        assert_eq!(second.total_records, 2);
        assert_eq!(second.total_pages, 2);

        let beyond = fetch(3).await.unwrap();
        assert!(beyond.results.is_empty());
        assert_eq!(beyond.total_records, 2);
    }

    #[tokio::test]
    async fn test_trending_skips_deleted_products() {
        let mut f = fixture();
        f.catalog.remove_product(f.paneer);

        let page = discovery::products_by_collection(
            &f.catalog,
            "Trending-this-week",
            1,
            fixed_now(),
            CollectionOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, f.dal);
        // The ranked id list still counts the vanished product
        assert_eq!(page.total_records, 2);
    }

    #[tokio::test]
    async fn test_trending_without_orders_is_an_empty_page() {
        let catalog = InMemoryCatalog::new().with_restaurant(pizza_palace());
        let page = discovery::products_by_collection(
            &catalog,
            "Trending-this-week",
            1,
            fixed_now(),
            CollectionOptions::default(),
        )
        .await
        .unwrap();

        assert!(page.results.is_empty());
        assert_eq!(page.total_records, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_veggie_friendly_pages() {
        let category = (0..13).fold(CategoryRecord::new("Salads"), |c, i| {
            c.with_product(ProductRecord::new(format!("Salad {}", i)).vegetarian())
        });
        let catalog = InMemoryCatalog::new().with_restaurant(
            RestaurantRecord::new("Green Bowl", "Goa")
                .with_category(category.with_product(ProductRecord::new("Chicken Salad"))),
        );

        let fetch = |page| {
            discovery::products_by_collection(
                &catalog,
                "Veggie-Friendly",
                page,
                fixed_now(),
                CollectionOptions::default(),
            )
        };

        let first = fetch(1).await.unwrap();
        assert_eq!(first.results.len(), 12);
        assert_eq!(first.total_records, 13);
        assert_eq!(first.total_pages, 2);
        assert!(first.results.iter().all(|p| p.is_veg));

        let second = fetch(2).await.unwrap();
        assert_eq!(titles(&second.results), vec!["Salad 12"]);

        let beyond = fetch(5).await.unwrap();
        assert!(beyond.results.is_empty());
        assert_eq!(beyond.total_records, 13);
    }

    #[tokio::test]
    async fn test_authentic_collection() {
        let f = fixture();
        let catalog = f.catalog.with_authentic(f.naan).with_authentic(f.dal);

        let page = discovery::products_by_collection(
            &catalog,
            "Authentic",
            1,
            fixed_now(),
            CollectionOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(titles(&page.results), vec!["Garlic Naan", "Dal Makhani"]);
        assert_eq!(page.total_records, 2);
    }

    #[tokio::test]
    async fn test_invalid_arguments() {
        let f = fixture();

        let err = discovery::products_by_collection(
            &f.catalog,
            "Chef-Specials",
            1,
            fixed_now(),
            CollectionOptions::default(),
        )
        .await
        .unwrap_err();
        assert_matches!(err, DiscoveryError::InvalidArgument(ref msg) if msg == "Incorrect category: Chef-Specials");

        let err = discovery::products_by_collection(
            &f.catalog,
            "Veggie-Friendly",
            0,
            fixed_now(),
            CollectionOptions::default(),
        )
        .await
        .unwrap_err();
        assert_matches!(err, DiscoveryError::InvalidArgument(_));
    }
}

// ============================================================================
// Seasonal products and menus
// ============================================================================

mod seasonal_and_menu {
    use pretty_assertions::assert_eq;

    use super::*;

    fn seasonal_catalog() -> InMemoryCatalog {
        InMemoryCatalog::new().with_restaurant(
            RestaurantRecord::new("Chai Stop", "Kolkata").with_category(
                CategoryRecord::new("Seasonal")
                    .with_product(ProductRecord::new("Mango Lassi").with_seasonal_tag("Summer Special"))
                    .with_product(ProductRecord::new("Pakora").with_seasonal_tag("Monsoon Treat"))
                    .with_product(ProductRecord::new("Gajar Halwa").with_seasonal_tag("winter warmer"))
                    .with_product(ProductRecord::new("Masala Chai")),
            ),
        )
    }

    #[tokio::test]
    async fn test_seasonal_products_follow_month() {
        let catalog = seasonal_catalog();

        let july = discovery::seasonal_products(&catalog, fixed_now()).await.unwrap();
        assert_eq!(july.len(), 1);
        assert_eq!(july[0].title, "Pakora");

        let january = Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap();
        let winter = discovery::seasonal_products(&catalog, january).await.unwrap();
        assert_eq!(winter.len(), 1);
        assert_eq!(winter[0].title, "Gajar Halwa");
    }

    #[tokio::test]
    async fn test_menu_prepends_recommended() {
        let restaurant = pizza_palace();
        let restaurant_id = restaurant.id;
        let cola = restaurant.categories[1].products[0].id;
        let paneer = restaurant.categories[0].products[1].id;

        let catalog = InMemoryCatalog::new()
            .with_restaurant(restaurant)
            .with_recommendation(restaurant_id, cola, 2)
            .with_recommendation(restaurant_id, paneer, 1);

        let menu = discovery::restaurant_menu(&catalog, restaurant_id).await.unwrap();

        let names: Vec<&str> = menu.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Recommended", "Pizza", "Beverages"]);
        assert_eq!(menu[0].id, RECOMMENDED_CATEGORY_ID);

        let recommended: Vec<&str> = menu[0].products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(recommended, vec!["Paneer Pizza", "Cola"]);
    }

    #[tokio::test]
    async fn test_menu_without_recommendations() {
        let restaurant = pizza_palace();
        let restaurant_id = restaurant.id;
        let catalog = InMemoryCatalog::new().with_restaurant(restaurant);

        let menu = discovery::restaurant_menu(&catalog, restaurant_id).await.unwrap();
        assert_eq!(menu.len(), 2);
        assert!(menu.iter().all(|c| c.id != RECOMMENDED_CATEGORY_ID));
    }

    #[tokio::test]
    async fn test_unknown_restaurant_is_not_found() {
        let err = discovery::restaurant_menu(&InMemoryCatalog::new(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert_matches!(err, DiscoveryError::NotFound(_));
    }
}

// ============================================================================
// Fan-out ordering
// ============================================================================

mod fan_out_order {
    use std::collections::HashMap;
    use std::time::Duration as StdDuration;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use platter::db::{AuthenticFilter, AuthenticRecord, CatalogRepository, PageSource, ProductFilter};

    use super::*;

    /// Delegates to an in-memory catalog, sleeping per id before each
    /// per-item read so completion order differs from request order
    struct SlowCatalog {
        inner: InMemoryCatalog,
        delays: HashMap<Uuid, u64>,
    }

    impl SlowCatalog {
        fn new(inner: InMemoryCatalog) -> Self {
            Self {
                inner,
                delays: HashMap::new(),
            }
        }

        fn with_delay(mut self, id: Uuid, millis: u64) -> Self {
            self.delays.insert(id, millis);
            self
        }

        async fn stall(&self, ids: &[Uuid]) {
            let millis = ids
                .iter()
                .filter_map(|id| self.delays.get(id))
                .copied()
                .max()
                .unwrap_or(0);
            if millis > 0 {
                tokio::time::sleep(StdDuration::from_millis(millis)).await;
            }
        }
    }

    #[async_trait]
    impl PageSource<ProductFilter, ProductRecord> for SlowCatalog {
        async fn count(&self, filter: &ProductFilter) -> anyhow::Result<i64> {
            <InMemoryCatalog as PageSource<ProductFilter, ProductRecord>>::count(&self.inner, filter)
                .await
        }

        async fn fetch(
            &self,
            filter: &ProductFilter,
            offset: i64,
            limit: i64,
        ) -> anyhow::Result<Vec<ProductRecord>> {
            <InMemoryCatalog as PageSource<ProductFilter, ProductRecord>>::fetch(
                &self.inner,
                filter,
                offset,
                limit,
            )
            .await
        }
    }

    #[async_trait]
    impl PageSource<AuthenticFilter, AuthenticRecord> for SlowCatalog {
        async fn count(&self, filter: &AuthenticFilter) -> anyhow::Result<i64> {
            <InMemoryCatalog as PageSource<AuthenticFilter, AuthenticRecord>>::count(
                &self.inner,
                filter,
            )
            .await
        }

        async fn fetch(
            &self,
            filter: &AuthenticFilter,
            offset: i64,
            limit: i64,
        ) -> anyhow::Result<Vec<AuthenticRecord>> {
            <InMemoryCatalog as PageSource<AuthenticFilter, AuthenticRecord>>::fetch(
                &self.inner,
                filter,
                offset,
                limit,
            )
            .await
        }
    }

    #[async_trait]
    impl CatalogRepository for SlowCatalog {
        async fn find_restaurants(&self, address_contains: &str) -> anyhow::Result<Vec<RestaurantRecord>> {
            self.inner.find_restaurants(address_contains).await
        }

        async fn find_restaurant(&self, id: Uuid) -> anyhow::Result<Option<RestaurantRecord>> {
            self.inner.find_restaurant(id).await
        }

        async fn find_categories(&self) -> anyhow::Result<Vec<CategoryRecord>> {
            self.inner.find_categories().await
        }

        async fn count_products(&self, category_id: Uuid) -> anyhow::Result<i64> {
            self.stall(&[category_id]).await;
            self.inner.count_products(category_id).await
        }

        async fn find_products_by_category_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<ProductRecord>> {
            self.stall(ids).await;
            self.inner.find_products_by_category_ids(ids).await
        }

        async fn find_orders(
            &self,
            status: OrderStatus,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> anyhow::Result<Vec<OrderRecord>> {
            self.inner.find_orders(status, start, end).await
        }

        async fn find_product_by_id(&self, id: Uuid) -> anyhow::Result<Option<ProductRecord>> {
            self.stall(&[id]).await;
            self.inner.find_product_by_id(id).await
        }

        async fn find_products_by_seasonal_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ProductRecord>> {
            self.inner.find_products_by_seasonal_prefix(prefix).await
        }

        async fn find_recommended_products(&self, restaurant_id: Uuid) -> anyhow::Result<Vec<ProductRecord>> {
            self.inner.find_recommended_products(restaurant_id).await
        }

        async fn health_check(&self) -> anyhow::Result<()> {
            self.inner.health_check().await
        }
    }

    fn category(name: &str, products: usize) -> CategoryRecord {
        (0..products).fold(CategoryRecord::new(name), |c, i| {
            c.with_product(ProductRecord::new(format!("{} item {}", name, i)))
        })
    }

    #[tokio::test]
    async fn test_clusters_keep_category_order_when_reads_finish_out_of_order() {
        let fast_food = category("Fast Food", 3);
        let fast_snacks = category("Fast Snacks", 2);
        let desserts = category("Desserts", 5);
        let delays = [(fast_food.id, 90), (fast_snacks.id, 60), (desserts.id, 0)];

        let inner = InMemoryCatalog::new().with_restaurant(
            RestaurantRecord::new("Snack Shack", "Pune")
                .with_category(fast_food)
                .with_category(fast_snacks)
                .with_category(desserts),
        );
        let slow = delays
            .into_iter()
            .fold(SlowCatalog::new(inner.clone()), |c, (id, ms)| c.with_delay(id, ms));

        let options = PopularCategoryOptions {
            max_concurrent_reads: 8,
            ..Default::default()
        };
        let expected = discovery::popular_categories(&inner, options).await.unwrap();
        let popular = discovery::popular_categories(&slow, options).await.unwrap();

        assert_eq!(popular, expected);
        let names: Vec<&str> = popular.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["fast food", "desserts"]);
    }

    #[tokio::test]
    async fn test_trending_keeps_rank_order_when_lookups_finish_out_of_order() {
        let f = super::collections::fixture();
        let slow = SlowCatalog::new(f.catalog)
            .with_delay(f.paneer, 90)
            .with_delay(f.dal, 0);

        let options = CollectionOptions {
            trending: discovery::TrendingOptions {
                max_concurrent_reads: 8,
                ..Default::default()
            },
            ..Default::default()
        };
        let page = discovery::products_by_collection(
            &slow,
            "Trending-this-week",
            1,
            fixed_now(),
            options,
        )
        .await
        .unwrap();

        let ids: Vec<Uuid> = page.results.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![f.paneer, f.dal]);
    }
}
