//! Multi-entity search over the restaurants of one city

use tracing::{debug, info};

use crate::db::{CatalogRepository, RestaurantRecord};
use crate::error::{DiscoveryError, Result};

use super::fuzzy::{FuzzyMatch, FuzzyMatcher, WeightedField};
use super::ranker::{self, SearchMatch};

/// Relative importance of the three searchable fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldWeights {
    pub restaurant_title: f64,
    pub category_name: f64,
    pub product_title: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            restaurant_title: 1.0,
            category_name: 1.0,
            product_title: 1.0,
        }
    }
}

/// Options for a search request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub threshold: f64,
    /// Location tolerance passed to the matcher
    pub distance: usize,
    pub limit: usize,
    pub weights: FieldWeights,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: super::fuzzy::DEFAULT_THRESHOLD,
            distance: super::fuzzy::DEFAULT_DISTANCE,
            limit: ranker::DEFAULT_RESULT_LIMIT,
            weights: FieldWeights::default(),
        }
    }
}

/// Every searchable field of a restaurant, in corpus order
fn restaurant_fields<'a>(
    restaurant: &'a RestaurantRecord,
    weights: &FieldWeights,
) -> Vec<WeightedField<'a>> {
    let mut fields = vec![WeightedField::new(&restaurant.title, weights.restaurant_title)];
    for category in &restaurant.categories {
        fields.push(WeightedField::new(&category.name, weights.category_name));
        for product in &category.products {
            fields.push(WeightedField::new(&product.title, weights.product_title));
        }
    }
    fields
}

/// Score an assembled corpus; each restaurant takes the best score among its
/// own title, category names and product titles.
pub fn match_corpus<'a>(
    query: &str,
    corpus: &'a [RestaurantRecord],
    options: &SearchOptions,
) -> Vec<FuzzyMatch<&'a RestaurantRecord>> {
    let matcher = FuzzyMatcher::new(query)
        .with_threshold(options.threshold)
        .with_distance(options.distance);
    let weights = options.weights;
    matcher.filter_and_score(corpus.iter().collect(), |restaurant| {
        restaurant_fields(restaurant, &weights)
    })
}

/// Search restaurants, categories and products of restaurants located in `city`
pub async fn search_items<R>(
    repo: &R,
    query: &str,
    city: &str,
    options: &SearchOptions,
) -> Result<Vec<SearchMatch>>
where
    R: CatalogRepository + ?Sized,
{
    let corpus = repo.find_restaurants(city).await?;
    if corpus.is_empty() {
        return Err(DiscoveryError::not_found(format!(
            "No restaurants found in the city: {}",
            city
        )));
    }

    if query.trim().is_empty() {
        debug!(city = %city, "Blank search query, returning no results");
        return Ok(Vec::new());
    }

    let matches = match_corpus(query, &corpus, options);
    debug!(
        corpus_size = corpus.len(),
        restaurant_matches = matches.len(),
        "Scored search corpus"
    );

    let results = ranker::rank(query, &matches, options.limit);

    info!(
        operation = "search_items",
        query = %query,
        city = %city,
        results = results.len(),
        "Search completed"
    );

    Ok(results)
}
