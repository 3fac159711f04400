//! Markup serialization (IR → markup)
//!
//! The inverse of the renderer for everything the grammar can express. Blocks are
//! joined with newlines; inline images whose alt text equals the filename drop the
//! argument, as do captionless figures and untitled audio.

use crate::grammar;
use crate::ir::nodes::{Block, Document, Span};

/// Serialize an IR document back into markup.
pub fn serialize_document(doc: &Document) -> String {
    let lines: Vec<String> = doc.blocks.iter().map(serialize_block).collect();
    lines.join("\n")
}

pub fn serialize_block(block: &Block) -> String {
    match block {
        Block::Image(figure) => {
            grammar::image_markup(&figure.file, figure.caption.as_deref().unwrap_or(""))
        }
        Block::Audio(audio) => {
            grammar::audio_markup(&audio.file, audio.title.as_deref().unwrap_or(""))
        }
        Block::Inline(spans) => serialize_spans(spans),
    }
}

pub fn serialize_spans(spans: &[Span]) -> String {
    let mut output = String::new();
    for span in spans {
        serialize_span(span, &mut output);
    }
    output
}

fn serialize_span(span: &Span, output: &mut String) {
    match span {
        Span::Text(text) => output.push_str(text),
        Span::Bold(children) => output.push_str(&grammar::bold_markup(&serialize_spans(children))),
        Span::Link(link) => output.push_str(&grammar::link_markup(&link.text)),
        Span::Image(image) => {
            let alt = if image.alt == image.file { "" } else { image.alt.as_str() };
            output.push_str(&grammar::image_markup(&image.file, alt));
        }
    }
}
