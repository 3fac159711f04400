//! Conversion between wikitown markup and its rendered forms
//!
//!     Articles are stored as a tiny line-oriented markup (bold, page links, images and audio
//!     clips). This crate turns that markup into something a reader or an editor can use, and
//!     turns what the editor hands back into markup again.
//!
//!     This is a pure lib: it powers the wikitown-cli and the store but is shell agnostic, so no
//!     code here prints, reads env vars or touches the filesystem.
//!
//! Architecture
//!
//!     Two trees sit in the middle of every conversion:
//!
//!     - the IR (./ir/mod.rs): what the markup means. Produced by the wiki parser, consumed by
//!       every serializer.
//!     - the editable tree (./tree/mod.rs): what an editing surface holds. Produced from editor
//!       HTML, consumed by the tree serializer that writes markup.
//!
//!     markup ──render──▶ IR ──serialize──▶ HTML ──parse──▶ editable tree ──serialize──▶ markup
//!
//!     The grammar (./grammar.rs) holds the delimiters, patterns and the slug rule both
//!     directions share, so they cannot drift apart.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── grammar.rs              # Markup syntax shared by both directions
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── <format>
//!     │   │   ├── parser.rs       # Parser implementation
//!     │   │   ├── serializer.rs   # Serializer implementation
//!     │   │   └── mod.rs
//!     ├── ir                      # Intermediate Representation
//!     └── tree                    # Editable tree and its markup serializer
//!
//! Testing
//!     tests
//!     └── <area>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include
//!     these in the mod.
//!
//! Round Trip
//!
//!     For markup the renderer accepts, markup → HTML → markup gives back the same markup modulo
//!     the documented normalizations (trimmed macro arguments, dropped redundant alt text, trimmed
//!     ends). Serializing the result again is a no-op.
//!
pub mod error;
pub mod format;
pub mod formats;
pub mod grammar;
pub mod ir;
pub mod registry;
pub mod tree;

pub use error::FormatError;
pub use format::Format;
pub use formats::wiki::render;
pub use grammar::{slugify, UrlBases};
pub use registry::FormatRegistry;

/// Render markup straight to the HTML fragment the article view shows.
pub fn markup_to_html(markup: &str, bases: &UrlBases) -> Result<String, FormatError> {
    let options = formats::HtmlOptions::new(bases.clone());
    formats::html::serialize_to_html_with_options(&render(markup), &options)
}

/// Turn editor HTML back into markup ready to be saved.
pub fn html_to_markup(html: &str, bases: &UrlBases) -> Result<String, FormatError> {
    formats::HtmlFormat::new(bases.clone()).to_markup(html)
}
