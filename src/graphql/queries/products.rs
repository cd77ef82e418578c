use chrono::Utc;

use super::prelude::*;

#[derive(Default)]
pub struct ProductQueries;

#[Object]
impl ProductQueries {
    /// Products tagged for the current season
    async fn get_seasonal_products(&self, ctx: &Context<'_>) -> Result<Vec<Product>> {
        let repo = ctx.data_unchecked::<Arc<dyn CatalogRepository>>();

        let products = discovery::seasonal_products(repo.as_ref(), Utc::now())
            .await
            .map_err(|e| e.extend())?;

        Ok(products.into_iter().map(product_record_to_graphql).collect())
    }
}
