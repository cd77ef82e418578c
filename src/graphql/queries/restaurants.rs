use async_graphql::ID;
use uuid::Uuid;

use super::prelude::*;

#[derive(Default)]
pub struct RestaurantQueries;

#[Object]
impl RestaurantQueries {
    /// Menu of a restaurant, recommended dishes first
    async fn get_restaurant_menu(&self, ctx: &Context<'_>, id: ID) -> Result<Vec<Category>> {
        let repo = ctx.data_unchecked::<Arc<dyn CatalogRepository>>();
        let restaurant_id = Uuid::parse_str(&id)
            .map_err(|e| async_graphql::Error::new(format!("Invalid restaurant ID: {}", e)))?;

        let menu = discovery::restaurant_menu(repo.as_ref(), restaurant_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(menu.into_iter().map(category_record_to_graphql).collect())
    }
}
