//! HTML serialization (IR → HTML)
//!
//! Builds an RcDom tree from the IR and lets html5ever serialize it, so text and
//! attribute values are escaped by the same code that will later parse them back.
//! Pipeline: IR → RcDom → HTML string (→ optional standalone page)

use crate::error::FormatError;
use crate::grammar::{self, UrlBases};
use crate::ir::nodes::{Audio, Block, Document, Figure, Span};
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

/// Options for HTML serialization
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// URL prefixes for media sources and page links
    pub bases: UrlBases,
    /// Wrap the fragment in a complete HTML page with embedded CSS
    pub standalone: bool,
    /// Page title used when `standalone` is set
    pub title: Option<String>,
}

impl HtmlOptions {
    pub fn new(bases: UrlBases) -> Self {
        Self {
            bases,
            standalone: false,
            title: None,
        }
    }

    pub fn standalone(mut self, title: impl Into<String>) -> Self {
        self.standalone = true;
        self.title = Some(title.into());
        self
    }
}

/// Serialize a document to an HTML fragment with default URL bases
pub fn serialize_to_html(doc: &Document) -> Result<String, FormatError> {
    serialize_to_html_with_options(doc, &HtmlOptions::default())
}

/// Serialize a document to HTML with full options
pub fn serialize_to_html_with_options(
    doc: &Document,
    options: &HtmlOptions,
) -> Result<String, FormatError> {
    let container = build_html_dom(doc, &options.bases);
    let fragment = serialize_children(&container)?;

    tracing::debug!(
        blocks = doc.blocks.len(),
        bytes = fragment.len(),
        standalone = options.standalone,
        "serialized document to html"
    );

    if options.standalone {
        let title = options.title.as_deref().unwrap_or("Wikitown");
        Ok(wrap_in_document(&fragment, title))
    } else {
        Ok(fragment)
    }
}

/// Build the DOM for a document under a detached container element.
///
/// One entry per block, `<br>` between blocks, none after the last.
fn build_html_dom(doc: &Document, bases: &UrlBases) -> Handle {
    let container = create_element("div", vec![]);

    for (index, block) in doc.blocks.iter().enumerate() {
        if index > 0 {
            append(&container, create_element("br", vec![]));
        }
        match block {
            Block::Image(figure) => append(&container, create_figure(figure, bases)),
            Block::Audio(audio) => append(&container, create_audio(audio, bases)),
            Block::Inline(spans) => {
                for span in spans {
                    add_span_to_node(&container, span, bases);
                }
            }
        }
    }

    container
}

fn create_figure(figure: &Figure, bases: &UrlBases) -> Handle {
    let node = create_element("figure", vec![("class", grammar::CLASS_FIGURE)]);
    let src = bases.media_url(&figure.file);
    append(
        &node,
        create_element(
            "img",
            vec![
                ("src", &src),
                ("alt", figure.alt()),
                ("class", grammar::CLASS_IMAGE),
            ],
        ),
    );

    if let Some(caption) = &figure.caption {
        let figcaption = create_element("figcaption", vec![]);
        append(&figcaption, create_text(caption));
        append(&node, figcaption);
    }

    node
}

fn create_audio(audio: &Audio, bases: &UrlBases) -> Handle {
    let title = audio.title.as_deref().unwrap_or("");
    let node = create_element(
        "div",
        vec![
            ("class", grammar::CLASS_AUDIO),
            (grammar::ATTR_DATA_FILE, &audio.file),
            (grammar::ATTR_DATA_TITLE, title),
        ],
    );

    if !title.is_empty() {
        let label = create_element("span", vec![("class", grammar::CLASS_AUDIO_TITLE)]);
        append(&label, create_text(title));
        append(&node, label);
    }

    let player = create_element("audio", vec![("controls", ""), ("preload", "none")]);
    let src = bases.media_url(&audio.file);
    append(&player, create_element("source", vec![("src", &src)]));
    append(&node, player);

    node
}

/// Add an inline span to an HTML node
fn add_span_to_node(parent: &Handle, span: &Span, bases: &UrlBases) {
    match span {
        Span::Text(text) => append(parent, create_text(text)),

        Span::Bold(children) => {
            let strong = create_element("strong", vec![]);
            for child in children {
                add_span_to_node(&strong, child, bases);
            }
            append(parent, strong);
        }

        Span::Link(link) => {
            let href = bases.page_url(&link.target);
            let anchor = create_element("a", vec![("href", &href), ("class", grammar::CLASS_LINK)]);
            append(&anchor, create_text(&link.text));
            append(parent, anchor);
        }

        Span::Image(image) => {
            let src = bases.media_url(&image.file);
            append(
                parent,
                create_element(
                    "img",
                    vec![
                        ("src", &src),
                        ("alt", &image.alt),
                        ("class", grammar::CLASS_IMAGE_INLINE),
                    ],
                ),
            );
        }
    }
}

fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the children of the container (not the container itself)
fn serialize_children(container: &Handle) -> Result<String, FormatError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in container.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            FormatError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
    }

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

/// Wrap the fragment in a complete HTML page with embedded CSS
fn wrap_in_document(body_html: &str, title: &str) -> String {
    let css = include_str!("../../../css/wiki.css");
    let escaped_title = html_escape(title);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="wikitown-babel">
  <title>{escaped_title}</title>
  <style>
{css}
  </style>
</head>
<body>
<h1 class="page-title">{escaped_title}</h1>
<div class="page-body">
{body_html}
</div>
</body>
</html>"#
    )
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
