//! File-backed store
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/pages/<slug>.json   one article record per file
//! <root>/media/<filename>    raw media files
//! ```

use crate::article::{Article, ArticleSummary, ArticleUpdate, CategoryInfo};
use crate::error::{Result, StoreError};
use crate::media::{mime_for, validate_filename, MediaBlob, MediaStore};
use crate::page::{self, PageStore};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

const PAGES_DIR: &str = "pages";
const MEDIA_DIR: &str = "media";
const RECORD_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
    editor_key: Option<String>,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>, editor_key: Option<String>) -> Self {
        Self {
            root: root.into(),
            editor_key: editor_key.filter(|key| !key.is_empty()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.root.join(PAGES_DIR)
    }

    pub fn media_dir(&self) -> PathBuf {
        self.root.join(MEDIA_DIR)
    }

    /// Record path for a slug. Slugs that could escape the pages directory are refused.
    fn page_path(&self, slug: &str) -> Result<PathBuf> {
        if slug.contains("..") || slug.contains('/') || slug.contains('\\') {
            return Err(StoreError::Validation(format!("invalid slug '{slug}'")));
        }
        Ok(self.pages_dir().join(format!("{slug}.{RECORD_EXTENSION}")))
    }

    fn read_article(path: &Path) -> Result<Article> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_article(&self, article: &Article) -> Result<()> {
        let path = self.page_path(&article.slug)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(article).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json)?;
        Ok(())
    }

    fn all_articles(&self) -> Result<Vec<Article>> {
        let dir = self.pages_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut articles = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == RECORD_EXTENSION) {
                articles.push(Self::read_article(&path)?);
            }
        }
        Ok(articles)
    }
}

impl PageStore for DirStore {
    fn get(&self, slug: &str) -> Result<Option<Article>> {
        if !page::is_canonical_slug(slug) {
            return Ok(None);
        }
        let path = self.page_path(slug)?;
        if !path.is_file() {
            return Ok(None);
        }
        Self::read_article(&path).map(Some)
    }

    fn upsert(&self, slug: &str, update: ArticleUpdate, editor_key: &str) -> Result<Article> {
        if let Err(err) = page::check_editor_key(self.editor_key.as_deref(), editor_key) {
            tracing::warn!(slug, "rejected write with bad editor key");
            return Err(err);
        }
        if let Err(err) = page::validate_update(slug, &update).and_then(|_| self.page_path(slug)) {
            tracing::warn!(slug, error = %err, "rejected invalid write");
            return Err(err);
        }

        let existing = self.get(slug)?;
        let article = Article::saved(slug, update, existing.as_ref(), Utc::now());
        self.write_article(&article)?;

        tracing::debug!(
            slug,
            created = existing.is_none(),
            bytes = article.content.len(),
            "saved article"
        );
        Ok(article)
    }

    fn list(&self, query: Option<&str>, category: Option<&str>) -> Result<Vec<ArticleSummary>> {
        Ok(page::select(&self.all_articles()?, query, category))
    }

    fn categories(&self) -> Result<Vec<CategoryInfo>> {
        Ok(page::collect_categories(&self.all_articles()?))
    }
}

impl MediaStore for DirStore {
    fn fetch(&self, filename: &str) -> Result<MediaBlob> {
        validate_filename(filename)?;
        let path = self.media_dir().join(filename);
        if !path.is_file() {
            return Err(StoreError::NotFound(format!("media '{filename}'")));
        }
        Ok(MediaBlob {
            filename: filename.to_string(),
            mime: mime_for(filename),
            bytes: fs::read(&path)?,
        })
    }
}
