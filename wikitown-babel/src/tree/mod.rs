//! Editable tree
//!
//! A snapshot of what a rich-text editing surface holds at save time. The editor's
//! live DOM is mutable and outside our control, so it is captured once (see
//! [`crate::formats::html::parser`]) into this immutable value and only then walked by
//! the [`serializer`].
//!
//! The node set is closed: every element the editor can produce is classified into one
//! of these variants up front, which keeps the serializer an exhaustive match.

pub mod serializer;

use crate::grammar::UrlBases;
use crate::ir::nodes::{Block, Document, Span};
use serde::Serialize;

pub use serializer::{serialize_tree, TreeSerializer};

/// A node of the editable tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditNode {
    Text(String),
    /// A `figure` that contains an image.
    Figure(FigureNode),
    /// Any element tagged as an audio container.
    Audio(AudioNode),
    /// A bare image outside of a figure.
    Image(ImageNode),
    /// `strong` / `b`
    Bold(Vec<EditNode>),
    /// `em` / `i`; the markup has no italic marker.
    Italic(Vec<EditNode>),
    /// An anchor tagged as a wiki link.
    WikiLink(LinkNode),
    LineBreak,
    /// `div` / `p`: starts a new line.
    Block(Vec<EditNode>),
    /// Anything else; only its children matter.
    Other {
        tag: String,
        children: Vec<EditNode>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FigureNode {
    pub image: ImageNode,
    /// Text content of the figure caption, empty when there is none.
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioNode {
    pub file: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageNode {
    /// Source URL as the editor holds it, media base included.
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkNode {
    /// Visible text of the anchor.
    pub text: String,
    pub href: String,
}

impl EditNode {
    pub fn text(text: impl Into<String>) -> Self {
        EditNode::Text(text.into())
    }

    /// Concatenated text of this node and all its descendants.
    pub fn text_content(&self) -> String {
        let mut output = String::new();
        self.collect_text(&mut output);
        output
    }

    fn collect_text(&self, output: &mut String) {
        match self {
            EditNode::Text(text) => output.push_str(text),
            EditNode::Figure(figure) => output.push_str(&figure.caption),
            EditNode::Audio(audio) => output.push_str(&audio.title),
            EditNode::WikiLink(link) => output.push_str(&link.text),
            EditNode::Image(_) | EditNode::LineBreak => {}
            EditNode::Bold(children)
            | EditNode::Italic(children)
            | EditNode::Block(children)
            | EditNode::Other { children, .. } => {
                for child in children {
                    child.collect_text(output);
                }
            }
        }
    }
}

/// Build the editable tree the editor would be seeded with for `doc`.
///
/// Mirrors the HTML rendition node for node: a root block holding one entry per
/// source line, with line breaks between them.
pub fn from_document(doc: &Document, bases: &UrlBases) -> EditNode {
    let mut children = Vec::new();
    for (index, block) in doc.blocks.iter().enumerate() {
        if index > 0 {
            children.push(EditNode::LineBreak);
        }
        match block {
            Block::Image(figure) => children.push(EditNode::Figure(FigureNode {
                image: ImageNode {
                    src: bases.media_url(&figure.file),
                    alt: figure.alt().to_string(),
                },
                caption: figure.caption.clone().unwrap_or_default(),
            })),
            Block::Audio(audio) => children.push(EditNode::Audio(AudioNode {
                file: audio.file.clone(),
                title: audio.title.clone().unwrap_or_default(),
            })),
            Block::Inline(spans) => {
                children.extend(spans.iter().map(|span| span_to_node(span, bases)));
            }
        }
    }
    EditNode::Block(children)
}

fn span_to_node(span: &Span, bases: &UrlBases) -> EditNode {
    match span {
        Span::Text(text) => EditNode::text(text.as_str()),
        Span::Bold(children) => {
            EditNode::Bold(children.iter().map(|c| span_to_node(c, bases)).collect())
        }
        Span::Link(link) => EditNode::WikiLink(LinkNode {
            text: link.text.clone(),
            href: bases.page_url(&link.target),
        }),
        Span::Image(image) => EditNode::Image(ImageNode {
            src: bases.media_url(&image.file),
            alt: image.alt.clone(),
        }),
    }
}
