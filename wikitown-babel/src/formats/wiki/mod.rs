//! Wikitown markup format
//!
//! The stored form of every article. Parsing renders markup into the IR (see
//! [`parser`]); serializing writes the canonical markup back out (see [`serializer`]).
//!
//! # Lossy Conversions
//!
//! Markup → IR → markup is exact for everything the grammar can express, except:
//! - whitespace around macro filenames and arguments is trimmed
//! - an explicit inline alt equal to the filename (`{{img:a.png|a.png}}`) is dropped
//! - an empty caption, alt or title (`{{img:a.png|}}`) is dropped

pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

pub use parser::{render, render_line, render_lines, RenderedLines};
pub use serializer::serialize_document;

/// Format implementation for wikitown markup
#[derive(Debug, Default, Clone, Copy)]
pub struct WikiFormat;

impl Format for WikiFormat {
    fn name(&self) -> &str {
        "wiki"
    }

    fn description(&self) -> &str {
        "Wikitown article markup"
    }

    fn file_extensions(&self) -> &[&str] {
        &["wiki", "txt"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(render(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serialize_document(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wiki_format_round_trip() {
        let format = WikiFormat;
        let doc = format.parse("**x** [[Y]]").unwrap();
        assert_eq!(format.serialize(&doc).unwrap(), "**x** [[Y]]");
    }

    #[test]
    fn test_wiki_format_rejects_options() {
        let format = WikiFormat;
        let mut options = std::collections::HashMap::new();
        options.insert("theme".to_string(), "dark".to_string());
        assert!(format
            .serialize_with_options(&Document::default(), &options)
            .is_err());
    }
}
