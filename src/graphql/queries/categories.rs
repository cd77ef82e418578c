use chrono::Utc;

use super::prelude::*;

#[derive(Default)]
pub struct CategoryQueries;

#[Object]
impl CategoryQueries {
    /// Topic clusters of categories with the most products
    async fn get_popular_categories(&self, ctx: &Context<'_>) -> Result<Vec<PopularCategory>> {
        let repo = ctx.data_unchecked::<Arc<dyn CatalogRepository>>();
        let config = ctx.data_unchecked::<DiscoveryConfig>();

        let clusters = discovery::popular_categories(repo.as_ref(), config.into())
            .await
            .map_err(|e| e.extend())?;

        Ok(clusters.into_iter().map(popular_category_to_graphql).collect())
    }

    /// One page of a named collection: `Veggie-Friendly`, `Trending-this-week`
    /// or `Authentic`
    async fn get_products_by_category(
        &self,
        ctx: &Context<'_>,
        category: String,
        page: i64,
    ) -> Result<PaginatedResult> {
        let repo = ctx.data_unchecked::<Arc<dyn CatalogRepository>>();
        let config = ctx.data_unchecked::<DiscoveryConfig>();

        let result = discovery::products_by_collection(
            repo.as_ref(),
            &category,
            page,
            Utc::now(),
            config.into(),
        )
        .await
        .map_err(|e| e.extend())?;

        Ok(product_page_to_graphql(result))
    }
}
