//! The [`Format`] trait
//!
//! A format converts between some text rendition and the IR [`Document`]. Article
//! markup, HTML and the tree view are formats; the registry dispatches on their names.

use crate::error::FormatError;
use crate::ir::nodes::Document;
use std::collections::HashMap;

/// One text rendition of a document.
///
/// Everything except [`Format::name`] has a default: no extensions, and neither
/// direction supported. A serialize-only format overrides
/// `supports_serialization` and `serialize`, as the tree view does:
///
/// ```ignore
/// struct BlockCount;
///
/// impl Format for BlockCount {
///     fn name(&self) -> &str {
///         "block-count"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
///         Ok(doc.blocks.len().to_string())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// Registry key, also what `--from`/`--to` accept
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Extensions without the leading dot, used to detect the source format
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    fn supports_parsing(&self) -> bool {
        false
    }

    fn supports_serialization(&self) -> bool {
        false
    }

    fn parse(&self, _source: &str) -> Result<Document, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize with `--extra-*` options. The default accepts no options at all.
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        match options.keys().next() {
            None => self.serialize(doc),
            Some(key) => Err(FormatError::NotSupported(format!(
                "Format '{}' has no option '{key}'",
                self.name()
            ))),
        }
    }
}
