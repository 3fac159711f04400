//! Tree serialization (editable tree → markup)
//!
//! Walks an [`EditNode`] depth first and writes the canonical markup:
//!
//! | Node        | Markup                                                   |
//! |-------------|----------------------------------------------------------|
//! | Figure      | `{{img:file\|caption}}`, `{{img:file}}` without caption  |
//! | Audio       | `{{audio:file\|title}}`, `{{audio:file}}` without title  |
//! | Image       | `{{img:file}}` when alt is empty or the filename         |
//! | Bold        | `**children**`                                           |
//! | Italic      | children, unwrapped                                      |
//! | WikiLink    | `[[text]]`                                               |
//! | LineBreak   | newline                                                  |
//! | Block       | newline, then children                                   |
//! | Other       | children                                                 |
//! | Text        | the text, verbatim                                       |
//!
//! The result is trimmed once at the end.
//!
//! # Lossy Conversions
//!
//! - italics disappear, their text is kept
//! - a link's href is ignored; only its visible text survives, so a link retargeted
//!   in the editor without changing its text points back at the slug of that text

use super::EditNode;
use crate::grammar::{self, UrlBases};

/// Serialize an editable tree with the default media base.
pub fn serialize_tree(root: &EditNode) -> String {
    TreeSerializer::default().serialize(root)
}

/// Tree → markup serializer, parameterized by the URL bases the tree was rendered with.
#[derive(Debug, Clone, Default)]
pub struct TreeSerializer {
    bases: UrlBases,
}

impl TreeSerializer {
    pub fn new(bases: UrlBases) -> Self {
        Self { bases }
    }

    pub fn serialize(&self, root: &EditNode) -> String {
        let mut output = String::new();
        self.write_node(root, &mut output);
        output.trim().to_string()
    }

    fn write_node(&self, node: &EditNode, output: &mut String) {
        match node {
            EditNode::Text(text) => output.push_str(text),
            EditNode::Figure(figure) => {
                let file = self.bases.strip_media(&figure.image.src);
                output.push_str(&grammar::image_markup(file, &figure.caption));
            }
            EditNode::Audio(audio) => {
                output.push_str(&grammar::audio_markup(&audio.file, &audio.title));
            }
            EditNode::Image(image) => {
                let file = self.bases.strip_media(&image.src);
                let alt = if image.alt == file { "" } else { image.alt.as_str() };
                output.push_str(&grammar::image_markup(file, alt));
            }
            EditNode::Bold(children) => {
                let mut inner = String::new();
                self.write_children(children, &mut inner);
                output.push_str(&grammar::bold_markup(&inner));
            }
            EditNode::WikiLink(link) => output.push_str(&grammar::link_markup(&link.text)),
            EditNode::LineBreak => output.push(grammar::LINE_BREAK),
            EditNode::Block(children) => {
                output.push(grammar::LINE_BREAK);
                self.write_children(children, output);
            }
            EditNode::Italic(children) | EditNode::Other { children, .. } => {
                self.write_children(children, output);
            }
        }
    }

    fn write_children(&self, children: &[EditNode], output: &mut String) {
        for child in children {
            self.write_node(child, output);
        }
    }
}
