//! HTML format implementation
//!
//! This module implements bidirectional conversion between wikitown markup and the
//! HTML the article view and the rich-text editor work with.
//!
//! # Library Choice
//!
//! We use the `html5ever` + `markup5ever_rcdom` ecosystem for both directions:
//! - `html5ever`: Browser-grade HTML5 parser and serializer from the Servo project
//! - `markup5ever_rcdom`: Reference-counted DOM tree implementation
//!
//! Letting the same library escape on the way out and unescape on the way in is what
//! makes `<`, `&` and quotes in article text survive an editing round trip.
//!
//! # Element Mapping Table
//!
//! | IR node      | HTML                                                                          |
//! |--------------|-------------------------------------------------------------------------------|
//! | Block image  | `<figure class="wiki-figure"><img class="wiki-image"><figcaption>`            |
//! | Block audio  | `<div class="wiki-audio" data-file data-title>` + title span + `<audio>`      |
//! | Bold         | `<strong>` (import also accepts `<b>`)                                        |
//! | Link         | `<a href="/wiki/slug" class="wiki-link">`                                     |
//! | Inline image | `<img class="wiki-image-inline">`                                             |
//! | Line break   | `<br>`                                                                        |
//!
//! Import goes through the editable tree: HTML → [`EditNode`] → markup → IR. See
//! [`crate::tree::serializer`] for the reconstruction rules and what they lose.
//!
//! # Options
//!
//! `serialize_with_options` understands:
//! - `media-base`: URL prefix for media sources (default `/media/`)
//! - `wiki-base`: URL prefix for page links (default `/wiki/`)
//! - `standalone`: `true` to emit a complete page with embedded CSS
//! - `title`: page title for standalone output

pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::formats::wiki;
use crate::grammar::UrlBases;
use crate::ir::nodes::Document;
use crate::tree::{EditNode, TreeSerializer};
use std::collections::HashMap;

pub use parser::parse_to_tree;
pub use serializer::{serialize_to_html, serialize_to_html_with_options, HtmlOptions};

/// Format implementation for HTML
#[derive(Debug, Clone, Default)]
pub struct HtmlFormat {
    bases: UrlBases,
}

impl HtmlFormat {
    pub fn new(bases: UrlBases) -> Self {
        Self { bases }
    }

    /// Parse editor HTML into the editable tree.
    pub fn parse_tree(&self, source: &str) -> Result<EditNode, FormatError> {
        parse_to_tree(source)
    }

    /// Convert editor HTML straight to markup, the string that gets saved.
    pub fn to_markup(&self, source: &str) -> Result<String, FormatError> {
        let tree = self.parse_tree(source)?;
        Ok(TreeSerializer::new(self.bases.clone()).serialize(&tree))
    }

    fn options_from(&self, params: &HashMap<String, String>) -> Result<HtmlOptions, FormatError> {
        let mut options = HtmlOptions::new(self.bases.clone());
        for (key, value) in params {
            match key.as_str() {
                "media-base" => options.bases.media = value.clone(),
                "wiki-base" => options.bases.wiki = value.clone(),
                "standalone" => options.standalone = parse_flag(key, value)?,
                "title" => options.title = Some(value.clone()),
                _ => {
                    return Err(FormatError::NotSupported(format!(
                        "Unknown html option '{key}'"
                    )))
                }
            }
        }
        Ok(options)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, FormatError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(FormatError::NotSupported(format!(
            "Option '{key}' expects true or false, got '{value}'"
        ))),
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML fragment as shown by the article view and the editor"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        let markup = self.to_markup(source)?;
        Ok(wiki::render(&markup))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serialize_to_html_with_options(doc, &HtmlOptions::new(self.bases.clone()))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let options = self.options_from(options)?;
        serialize_to_html_with_options(doc, &options)
    }
}
