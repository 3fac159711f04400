//! CLI-specific transforms
//!
//! This module defines the views `wikitown inspect` can print for an article.
//!
//! ## Transform Pipeline
//!
//! Markup goes through two trees on its way to and from the editor:
//!
//! 1. **Rendering** - markup → IR document
//!    - `ir-json`: the IR as JSON
//!    - `treeviz`: the IR as a tree visualization with Unicode icons
//!
//! 2. **Editing** - IR → editable tree → markup
//!    - `edit-tree`: the editable tree as JSON, exactly what the serializer walks
//!    - `round-trip`: the markup a save would store
//!
//! HTML input skips rendering: it is read straight into the editable tree, and the IR
//! views show the markup it serializes to, rendered again.

use std::collections::HashMap;
use wikitown_babel::formats::html::HtmlFormat;
use wikitown_babel::formats::treeviz::to_treeviz_str;
use wikitown_babel::ir::nodes::Document;
use wikitown_babel::tree::{self, EditNode, TreeSerializer};
use wikitown_babel::{render, UrlBases};

/// All available CLI transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["ir-json", "treeviz", "edit-tree", "round-trip"];

/// Source kinds the inspect command reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Markup,
    Html,
}

impl Source {
    /// Pick the source kind from a format name as detected by the registry.
    pub fn from_format(format: &str) -> Result<Self, String> {
        match format {
            "wiki" => Ok(Source::Markup),
            "html" => Ok(Source::Html),
            other => Err(format!("Cannot inspect '{other}' input")),
        }
    }
}

/// Execute a named transform on a source file with optional extra parameters
///
/// `bases` are the URL prefixes used to build and read the editable tree; the CLI has
/// already folded `--extra-media-base` and `--extra-wiki-base` into them. No transform
/// takes further parameters, so any left in `extra_params` is an error.
///
/// # Examples
///
/// ```ignore
/// let output = execute_transform("**x**", Source::Markup, "treeviz", &UrlBases::default(), &HashMap::new())?;
/// ```
pub fn execute_transform(
    source: &str,
    kind: Source,
    transform_name: &str,
    bases: &UrlBases,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    if let Some(key) = extra_params.keys().next() {
        return Err(format!("Unknown parameter for inspect: {key}"));
    }

    match transform_name {
        "ir-json" => {
            let doc = to_document(source, kind, bases)?;
            serde_json::to_string_pretty(&doc)
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        "treeviz" => Ok(to_treeviz_str(&to_document(source, kind, bases)?)),
        "edit-tree" => {
            let tree = to_edit_tree(source, kind, bases)?;
            serde_json::to_string_pretty(&tree)
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        "round-trip" => {
            let tree = to_edit_tree(source, kind, bases)?;
            Ok(TreeSerializer::new(bases.clone()).serialize(&tree))
        }
        _ => Err(format!("Unknown transform: {transform_name}")),
    }
}

fn to_document(source: &str, kind: Source, bases: &UrlBases) -> Result<Document, String> {
    match kind {
        Source::Markup => Ok(render(source)),
        Source::Html => {
            let markup = HtmlFormat::new(bases.clone())
                .to_markup(source)
                .map_err(|e| format!("Transform failed: {e}"))?;
            Ok(render(&markup))
        }
    }
}

fn to_edit_tree(source: &str, kind: Source, bases: &UrlBases) -> Result<EditNode, String> {
    match kind {
        Source::Markup => Ok(tree::from_document(&render(source), bases)),
        Source::Html => HtmlFormat::new(bases.clone())
            .parse_tree(source)
            .map_err(|e| format!("Transform failed: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str, kind: Source, transform: &str) -> Result<String, String> {
        execute_transform(source, kind, transform, &UrlBases::default(), &HashMap::new())
    }

    #[test]
    fn test_ir_json() {
        let output = run("**x**", Source::Markup, "ir-json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["blocks"][0]["inline"][0]["bold"][0]["text"], "x");
    }

    #[test]
    fn test_treeviz_from_html() {
        let output = run("<p>{{img:a.png}}</p>", Source::Html, "treeviz").unwrap();
        assert_eq!(output, "⧉ Document (1 block)\n└─ ▣ a.png\n");
    }

    #[test]
    fn test_edit_tree_json() {
        let output = run("[[Old Mill]]", Source::Markup, "edit-tree").unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["block"][0]["wiki_link"]["href"], "/wiki/old-mill");
    }

    #[test]
    fn test_round_trip_from_html() {
        let output = run("<div>a <i>b</i></div>", Source::Html, "round-trip").unwrap();
        assert_eq!(output, "a b");
    }

    #[test]
    fn test_configured_media_base() {
        let output = execute_transform(
            "{{img:a.png}}",
            Source::Markup,
            "edit-tree",
            &UrlBases::new("/files/", "/pages/"),
            &HashMap::new(),
        )
        .unwrap();
        assert!(output.contains("/files/a.png"));
    }

    #[test]
    fn test_unknown_transform_and_param() {
        assert!(run("x", Source::Markup, "ast-tag").is_err());

        let mut params = HashMap::new();
        params.insert("theme".to_string(), "dark".to_string());
        let result = execute_transform("x", Source::Markup, "treeviz", &UrlBases::default(), &params);
        assert!(result.is_err());
    }

    #[test]
    fn test_source_from_format() {
        assert_eq!(Source::from_format("wiki"), Ok(Source::Markup));
        assert_eq!(Source::from_format("html"), Ok(Source::Html));
        assert!(Source::from_format("treeviz").is_err());
    }
}
