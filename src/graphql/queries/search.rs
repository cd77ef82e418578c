use super::prelude::*;

#[derive(Default)]
pub struct SearchQueries;

#[Object]
impl SearchQueries {
    /// Fuzzy search over restaurants, categories and products of a city
    async fn search_items(
        &self,
        ctx: &Context<'_>,
        query: String,
        city: String,
    ) -> Result<Vec<SearchResult>> {
        let repo = ctx.data_unchecked::<Arc<dyn CatalogRepository>>();
        let config = ctx.data_unchecked::<DiscoveryConfig>();

        let matches = discovery::search_items(repo.as_ref(), &query, &city, &config.into())
            .await
            .map_err(|e| e.extend())?;

        Ok(matches.into_iter().map(search_match_to_graphql).collect())
    }
}
