//! Article and media storage for wikitown
//!
//! Two keyed stores sit behind the converter: pages (slug → article record) and media
//! (filename → bytes + MIME type). Both are traits so the CLI, tests and any server
//! front end share one set of rules; [`DirStore`] implements them on a plain directory.
//!
//! Writes need the shared editor key. There is no history: a save replaces the record
//! and only keeps its creation time.

pub mod article;
pub mod dir;
pub mod error;
pub mod media;
pub mod page;

pub use article::{Article, ArticleSummary, ArticleUpdate, CategoryInfo};
pub use dir::DirStore;
pub use error::{Result, StoreError};
pub use media::{mime_for, MediaBlob, MediaStore};
pub use page::PageStore;
pub use wikitown_babel::slugify;
