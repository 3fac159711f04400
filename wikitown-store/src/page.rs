//! Page store interface and the rules every implementation enforces

use crate::article::{Article, ArticleSummary, ArticleUpdate, CategoryInfo};
use crate::error::{Result, StoreError};
use wikitown_babel::slugify;

/// Keyed article storage.
pub trait PageStore {
    fn get(&self, slug: &str) -> Result<Option<Article>>;

    /// Create or replace the article at `slug`.
    ///
    /// Rejected with [`StoreError::Unauthorized`] unless `editor_key` matches the
    /// store's shared secret.
    fn upsert(&self, slug: &str, update: ArticleUpdate, editor_key: &str) -> Result<Article>;

    /// Articles ordered by title, optionally filtered by a search query and a category.
    fn list(&self, query: Option<&str>, category: Option<&str>) -> Result<Vec<ArticleSummary>>;

    fn categories(&self) -> Result<Vec<CategoryInfo>>;
}

/// Check a presented editor key against the configured one.
///
/// A store without a configured key accepts no writes.
pub fn check_editor_key(expected: Option<&str>, presented: &str) -> Result<()> {
    match expected {
        Some(expected) if !presented.is_empty() && presented == expected => Ok(()),
        _ => Err(StoreError::Unauthorized),
    }
}

/// A slug is canonical when slugifying it changes nothing.
pub fn is_canonical_slug(slug: &str) -> bool {
    !slug.is_empty() && slugify(slug) == slug
}

pub fn validate_update(slug: &str, update: &ArticleUpdate) -> Result<()> {
    if slug.is_empty() {
        return Err(StoreError::Validation("slug must not be empty".to_string()));
    }
    if !is_canonical_slug(slug) {
        return Err(StoreError::Validation(format!(
            "slug '{slug}' is not canonical, expected '{}'",
            slugify(slug)
        )));
    }
    if update.title.trim().is_empty() {
        return Err(StoreError::Validation("title is required".to_string()));
    }
    Ok(())
}

/// Apply the listing filters and ordering to a set of articles.
pub fn select(
    articles: &[Article],
    query: Option<&str>,
    category: Option<&str>,
) -> Vec<ArticleSummary> {
    let mut selected: Vec<&Article> = articles
        .iter()
        .filter(|article| category.map_or(true, |category| article.category == category))
        .filter(|article| query.map_or(true, |query| article.matches_query(query)))
        .collect();
    selected.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.slug.cmp(&b.slug)));
    selected.into_iter().map(Article::summary).collect()
}

/// Distinct non-empty categories, sorted, each with the first lead image found among
/// its articles in title order.
pub fn collect_categories(articles: &[Article]) -> Vec<CategoryInfo> {
    let mut ordered: Vec<&Article> = articles.iter().collect();
    ordered.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.slug.cmp(&b.slug)));

    let mut categories: Vec<CategoryInfo> = Vec::new();
    for article in ordered {
        if article.category.is_empty() {
            continue;
        }
        match categories
            .iter_mut()
            .find(|info| info.category == article.category)
        {
            Some(info) => {
                if info.image.is_none() {
                    info.image = article.lead_image();
                }
            }
            None => categories.push(CategoryInfo {
                category: article.category.clone(),
                image: article.lead_image(),
            }),
        }
    }
    categories.sort_by(|a, b| a.category.cmp(&b.category));
    categories
}
