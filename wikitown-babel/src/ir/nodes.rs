//! Core data structures for the Intermediate Representation (IR).

use serde::{Deserialize, Serialize};

/// A rendered markup document.
///
/// Blocks are separated by explicit line breaks when rendered; the last block has no
/// trailing break.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(Block::is_empty)
    }
}

/// One source line's worth of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    /// A line holding nothing but an image reference.
    Image(Figure),
    /// A line holding nothing but an audio reference.
    Audio(Audio),
    /// Text interleaved with bold spans, links and inline images.
    Inline(Vec<Span>),
}

impl Block {
    pub fn is_empty(&self) -> bool {
        matches!(self, Block::Inline(spans) if spans.is_empty())
    }
}

/// Inline content within a block.
///
/// The grammar only ever puts `Text` inside `Bold`; the type allows more so that
/// trees coming back from the editor can still be represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Bold(Vec<Span>),
    Link(Link),
    Image(Image),
}

impl Span {
    pub fn text(text: impl Into<String>) -> Self {
        Span::Text(text.into())
    }

    /// Visible text of the span, as a reader of the rendered page would see it.
    pub fn plain_text(&self) -> String {
        match self {
            Span::Text(text) => text.clone(),
            Span::Bold(children) => children.iter().map(Span::plain_text).collect(),
            Span::Link(link) => link.text.clone(),
            Span::Image(_) => String::new(),
        }
    }
}

/// A standalone image, rendered as a figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Figure {
    pub file: String,
    pub caption: Option<String>,
}

impl Figure {
    /// Alt text: the caption when present, else the filename.
    pub fn alt(&self) -> &str {
        self.caption.as_deref().unwrap_or(&self.file)
    }
}

/// A standalone audio player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audio {
    pub file: String,
    pub title: Option<String>,
}

/// A link to another article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Page name exactly as written between the brackets.
    pub text: String,
    /// Slug the link navigates to.
    pub target: String,
}

/// An image placed within running text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub file: String,
    pub alt: String,
}
