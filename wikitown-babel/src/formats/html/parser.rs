//! HTML parsing (HTML → editable tree)
//!
//! Takes the editor's HTML snapshot, parses it with html5ever into an RcDom and
//! classifies every node into an [`EditNode`]. The body's children become the
//! children of a root block, so the serialized result starts on a fresh line that the
//! final trim removes.
//!
//! Element classification is ordered; the first rule that applies wins:
//!
//! 1. `figure` containing an `img` → Figure (first `img`, first `figcaption`)
//! 2. any element with class `wiki-audio` → Audio (`data-file`, `data-title`)
//! 3. `img` → Image
//! 4. `strong`, `b` → Bold
//! 5. `em`, `i` → Italic
//! 6. `a` with class `wiki-link` → WikiLink
//! 7. `br` → LineBreak
//! 8. `div`, `p` → Block
//! 9. anything else → Other
//!
//! Comments, doctypes and processing instructions are dropped.

use crate::error::FormatError;
use crate::grammar;
use crate::tree::{AudioNode, EditNode, FigureNode, ImageNode, LinkNode};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, Attribute, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML fragment into an editable tree.
pub fn parse_to_tree(source: &str) -> Result<EditNode, FormatError> {
    let dom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut source.as_bytes())
        .map_err(|e| FormatError::ParseError(format!("HTML parsing failed: {e}")))?;

    let body = find_element(&dom.document, "body")
        .ok_or_else(|| FormatError::ParseError("HTML document has no body".to_string()))?;

    let root = EditNode::Block(convert_children(&body));
    tracing::debug!(bytes = source.len(), "parsed html into edit tree");
    Ok(root)
}

fn convert_children(handle: &Handle) -> Vec<EditNode> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(convert_node)
        .collect()
}

fn convert_node(handle: &Handle) -> Option<EditNode> {
    match &handle.data {
        NodeData::Text { contents } => Some(EditNode::Text(contents.borrow().to_string())),
        NodeData::Element { name, attrs, .. } => {
            Some(convert_element(handle, &name.local, &attrs.borrow()))
        }
        _ => None,
    }
}

fn convert_element(handle: &Handle, tag: &str, attrs: &[Attribute]) -> EditNode {
    if tag == "figure" {
        if let Some(img) = find_element(handle, "img") {
            let caption = find_element(handle, "figcaption")
                .map(|node| text_content(&node))
                .unwrap_or_default();
            return EditNode::Figure(FigureNode {
                image: image_node(&img),
                caption,
            });
        }
    }

    if has_class(attrs, grammar::CLASS_AUDIO) {
        return EditNode::Audio(AudioNode {
            file: attribute(attrs, grammar::ATTR_DATA_FILE).unwrap_or_default(),
            title: attribute(attrs, grammar::ATTR_DATA_TITLE).unwrap_or_default(),
        });
    }

    match tag {
        "img" => EditNode::Image(image_node(handle)),
        "strong" | "b" => EditNode::Bold(convert_children(handle)),
        "em" | "i" => EditNode::Italic(convert_children(handle)),
        "a" if has_class(attrs, grammar::CLASS_LINK) => EditNode::WikiLink(LinkNode {
            text: text_content(handle),
            href: attribute(attrs, "href").unwrap_or_default(),
        }),
        "br" => EditNode::LineBreak,
        "div" | "p" => EditNode::Block(convert_children(handle)),
        _ => EditNode::Other {
            tag: tag.to_string(),
            children: convert_children(handle),
        },
    }
}

fn image_node(handle: &Handle) -> ImageNode {
    let (src, alt) = match &handle.data {
        NodeData::Element { attrs, .. } => {
            let attrs = attrs.borrow();
            (attribute(&attrs, "src"), attribute(&attrs, "alt"))
        }
        _ => (None, None),
    };
    ImageNode {
        src: src.unwrap_or_default(),
        alt: alt.unwrap_or_default(),
    }
}

fn attribute(attrs: &[Attribute], name: &str) -> Option<String> {
    attrs
        .iter()
        .find(|attr| &*attr.name.local == name)
        .map(|attr| attr.value.to_string())
}

fn has_class(attrs: &[Attribute], class: &str) -> bool {
    attribute(attrs, "class")
        .map(|value| value.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// First descendant element with the given tag name, in document order.
fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    for child in handle.children.borrow().iter() {
        if let NodeData::Element { name, .. } = &child.data {
            if &*name.local == tag {
                return Some(child.clone());
            }
        }
        if let Some(found) = find_element(child, tag) {
            return Some(found);
        }
    }
    None
}

/// Concatenated text of all descendant text nodes.
fn text_content(handle: &Handle) -> String {
    let mut output = String::new();
    collect_text(handle, &mut output);
    output
}

fn collect_text(handle: &Handle, output: &mut String) {
    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => output.push_str(&contents.borrow()),
            NodeData::Element { .. } => collect_text(child, output),
            _ => {}
        }
    }
}
