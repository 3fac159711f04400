//! Article records
//!
//! An article is created on the first save of its slug and replaced wholesale on every
//! later save. Only the creation time survives an update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wikitown_babel::ir::nodes::Block;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub slug: String,
    pub title: String,
    /// Markup, exactly as produced by the editor serializer.
    pub content: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing entry: everything but the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub updated_at: DateTime<Utc>,
}

/// Fields a save carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleUpdate {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub category: String,
}

/// A category and the image representing it on the front page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub category: String,
    pub image: Option<String>,
}

impl Article {
    /// Build the record stored for `slug` after applying `update`.
    pub fn saved(
        slug: &str,
        update: ArticleUpdate,
        existing: Option<&Article>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            slug: slug.to_string(),
            title: update.title,
            content: update.content,
            summary: update.summary,
            category: update.category,
            created_at: existing.map_or(now, |article| article.created_at),
            updated_at: now,
        }
    }

    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            summary: self.summary.clone(),
            category: self.category.clone(),
            updated_at: self.updated_at,
        }
    }

    /// Filename of the first standalone image in the content, if any.
    pub fn lead_image(&self) -> Option<String> {
        wikitown_babel::formats::wiki::render_lines(&self.content).find_map(|block| match block {
            Block::Image(figure) => Some(figure.file),
            _ => None,
        })
    }

    /// Case-insensitive substring match over title, summary and content.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        [&self.title, &self.summary, &self.content]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
