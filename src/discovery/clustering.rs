//! Topic clustering of category names and the "popular categories" listing
//!
//! Categories that share a word are grouped under the normalized name of the
//! first category that introduced the word. Lookup of an existing cluster is
//! by substring containment of the word in the cluster key, so "pizza" also
//! finds a cluster keyed "pizza corner".

use std::collections::HashSet;

use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::{CatalogRepository, ProductRecord};
use crate::error::{DiscoveryError, Result};

/// Default number of clusters surfaced
pub const DEFAULT_CLUSTER_LIMIT: usize = 5;

/// A category with its product count, as fed to the clusterer
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCount {
    pub category_id: Uuid,
    pub name: String,
    pub product_count: i64,
}

/// A category placed in a cluster
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterMember {
    pub category_id: Uuid,
    pub name: String,
    pub product_count: i64,
}

/// A group of topically related categories
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub key: String,
    pub members: Vec<ClusterMember>,
    pub total_products: i64,
}

impl CategoryGroup {
    fn new(key: String) -> Self {
        Self {
            key,
            members: Vec::new(),
            total_products: 0,
        }
    }

    fn push(&mut self, category: &CategoryCount) {
        self.total_products += category.product_count;
        self.members.push(ClusterMember {
            category_id: category.category_id,
            name: category.name.clone(),
            product_count: category.product_count,
        });
    }

    pub fn category_ids(&self) -> Vec<Uuid> {
        self.members.iter().map(|m| m.category_id).collect()
    }
}

/// A surfaced cluster with the products of all its member categories
#[derive(Debug, Clone, PartialEq)]
pub struct PopularCategory {
    pub name: String,
    pub products: Vec<ProductRecord>,
}

/// Lowercase, split on whitespace, drop empty tokens
pub fn normalize_words(name: &str) -> Vec<String> {
    name.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Partition categories into clusters, in order of cluster creation.
///
/// State lives for the duration of the call only.
pub fn cluster_categories(categories: &[CategoryCount]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut seen_words: HashSet<String> = HashSet::new();

    for category in categories {
        let words = normalize_words(&category.name);

        let existing = words
            .iter()
            .filter(|word| seen_words.contains(*word))
            .find_map(|word| groups.iter().position(|g| g.key.contains(word.as_str())));

        if let Some(index) = existing {
            groups[index].push(category);
            continue;
        }

        let key = words.join(" ");
        match groups.iter().position(|g| g.key == key) {
            // Only reachable for names without words, which all share the empty key
            Some(index) => groups[index].push(category),
            None => {
                let mut group = CategoryGroup::new(key);
                group.push(category);
                groups.push(group);
            }
        }
        seen_words.extend(words);
    }

    groups
}

/// Order clusters by total product count (descending, ties keep creation
/// order) and keep the first `limit`
pub fn top_groups(mut groups: Vec<CategoryGroup>, limit: usize) -> Vec<CategoryGroup> {
    groups.sort_by(|a, b| b.total_products.cmp(&a.total_products));
    groups.truncate(limit);
    groups
}

/// Options for the popular categories listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopularCategoryOptions {
    pub limit: usize,
    pub max_concurrent_reads: usize,
}

impl Default for PopularCategoryOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_CLUSTER_LIMIT,
            max_concurrent_reads: 8,
        }
    }
}

/// Cluster every category and return the most stocked clusters with their products
pub async fn popular_categories<R>(
    repo: &R,
    options: PopularCategoryOptions,
) -> Result<Vec<PopularCategory>>
where
    R: CatalogRepository + ?Sized,
{
    let categories = repo.find_categories().await?;
    if categories.is_empty() {
        return Err(DiscoveryError::not_found("No categories found"));
    }

    let parallelism = options.max_concurrent_reads.max(1);

    // `buffered` keeps input order regardless of completion order
    let counts: Vec<CategoryCount> = stream::iter(categories)
        .map(|category| async move {
            let product_count = repo.count_products(category.id).await?;
            Ok::<_, anyhow::Error>(CategoryCount {
                category_id: category.id,
                name: category.name,
                product_count,
            })
        })
        .buffered(parallelism)
        .try_collect()
        .await?;

    let groups = cluster_categories(&counts);
    debug!(
        categories = counts.len(),
        clusters = groups.len(),
        "Clustered categories"
    );

    let top = top_groups(groups, options.limit);

    let popular: Vec<PopularCategory> = stream::iter(top)
        .map(|group| async move {
            let products = repo
                .find_products_by_category_ids(&group.category_ids())
                .await?;
            Ok::<_, anyhow::Error>(PopularCategory {
                name: group.key,
                products,
            })
        })
        .buffered(parallelism)
        .try_collect()
        .await?;

    info!(
        operation = "popular_categories",
        clusters = popular.len(),
        "Popular categories computed"
    );

    Ok(popular)
}
