//! Format lookup by name and by file extension
//!
//! The CLI resolves `--from`/`--to` through a [`FormatRegistry`]. Formats are keyed by
//! [`Format::name`]; registering a second format under the same name replaces the
//! first, which is how a configured [`crate::formats::HtmlFormat`] takes over from the
//! default one.

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Formats known to a conversion run, ordered by name.
pub struct FormatRegistry {
    formats: BTreeMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        FormatRegistry {
            formats: BTreeMap::new(),
        }
    }

    /// The `wiki`, `html` and `treeviz` formats, html with default URL bases.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(crate::formats::WikiFormat);
        registry.register(crate::formats::HtmlFormat::default());
        registry.register(crate::formats::TreevizFormat);
        registry
    }

    pub fn register<F: Format + 'static>(&mut self, format: F) {
        let name = format.name().to_string();
        if self.formats.insert(name.clone(), Box::new(format)).is_some() {
            tracing::debug!(format = %name, "replaced registered format");
        }
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|format| format.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Registered names in alphabetical order.
    pub fn list_formats(&self) -> Vec<String> {
        self.formats.keys().cloned().collect()
    }

    /// Name of the format claiming the file's extension, if any.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = Path::new(filename).extension()?.to_str()?;
        self.formats
            .values()
            .find(|format| format.file_extensions().contains(&extension))
            .map(|format| format.name().to_string())
    }

    pub fn parse(&self, source: &str, format: &str) -> Result<Document, FormatError> {
        let target = self.get(format)?;
        if !target.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        target.parse(source)
    }

    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        self.serialize_with_options(doc, format, &HashMap::new())
    }

    /// Serialize with format options such as `standalone` or `media-base` for html.
    pub fn serialize_with_options(
        &self,
        doc: &Document,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let target = self.get(format)?;
        if !target.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        target.serialize_with_options(doc, options)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
