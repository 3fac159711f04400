//! Treeviz formatter for IR documents
//!
//! A visual representation of the rendered document, one line per node:
//!
//! <prefix><connector> <icon> <label>
//!
//! Blocks hang off the document, spans hang off their line. Labels longer than
//! 30 characters are truncated with an ellipsis. Text labels are quoted so that
//! leading and trailing spaces stay visible.
//!
//! ```text
//! ⧉ Document (2 blocks)
//! ├─ ¶ 3 spans
//! │ ├─ ◦ "see "
//! │ ├─ ▫ a.png
//! │ └─ ◦ " here"
//! └─ ♪ x.mp3 "Song"
//! ```

use super::icons::get_icon;
use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::{Block, Document, Span};

const MAX_LABEL_CHARS: usize = 30;

pub fn to_treeviz_str(doc: &Document) -> String {
    let mut output = format!(
        "{} Document ({} {})\n",
        get_icon("Document"),
        doc.blocks.len(),
        plural(doc.blocks.len(), "block", "blocks")
    );

    let count = doc.blocks.len();
    for (index, block) in doc.blocks.iter().enumerate() {
        format_block(block, index == count - 1, &mut output);
    }
    output
}

fn format_block(block: &Block, is_last: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    let child_prefix = if is_last { "  " } else { "│ " };

    match block {
        Block::Image(figure) => {
            let label = with_argument(&figure.file, figure.caption.as_deref());
            push_line(output, "", connector, "Figure", &label);
        }
        Block::Audio(audio) => {
            let label = with_argument(&audio.file, audio.title.as_deref());
            push_line(output, "", connector, "Audio", &label);
        }
        Block::Inline(spans) => {
            let label = if spans.is_empty() {
                "empty line".to_string()
            } else {
                format!("{} {}", spans.len(), plural(spans.len(), "span", "spans"))
            };
            push_line(output, "", connector, "Line", &label);
            format_spans(spans, child_prefix, output);
        }
    }
}

fn format_spans(spans: &[Span], prefix: &str, output: &mut String) {
    let count = spans.len();
    for (index, span) in spans.iter().enumerate() {
        let is_last = index == count - 1;
        let connector = if is_last { "└─" } else { "├─" };

        match span {
            Span::Text(text) => push_line(output, prefix, connector, "Text", &format!("{text:?}")),
            Span::Bold(children) => {
                push_line(output, prefix, connector, "Bold", "bold");
                let nested = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
                format_spans(children, &nested, output);
            }
            Span::Link(link) => {
                let label = format!("{} → {}", link.text, link.target);
                push_line(output, prefix, connector, "Link", &label);
            }
            Span::Image(image) => {
                let alt = Some(image.alt.as_str()).filter(|alt| *alt != image.file);
                push_line(output, prefix, connector, "Image", &with_argument(&image.file, alt));
            }
        }
    }
}

fn push_line(output: &mut String, prefix: &str, connector: &str, node_type: &str, label: &str) {
    output.push_str(&format!(
        "{prefix}{connector} {} {}\n",
        get_icon(node_type),
        truncate(label)
    ));
}

fn with_argument(file: &str, argument: Option<&str>) -> String {
    match argument {
        Some(argument) => format!("{file} {argument:?}"),
        None => file.to_string(),
    }
}

fn truncate(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let mut truncated: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
    truncated.push('…');
    truncated
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

/// Format implementation for treeviz format
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::wiki::render;
    use insta::assert_snapshot;

    #[test]
    fn test_treeviz_mixed_document() {
        let doc = render("see {{img:a.png}} here\n{{audio:x.mp3|Song}}");
        assert_snapshot!(to_treeviz_str(&doc), @r#"
        ⧉ Document (2 blocks)
        ├─ ¶ 3 spans
        │ ├─ ◦ "see "
        │ ├─ ▫ a.png
        │ └─ ◦ " here"
        └─ ♪ x.mp3 "Song"
        "#);
    }

    #[test]
    fn test_treeviz_bold_and_link() {
        let doc = render("**hi** [[Old Mill]]\n{{img:m.png|Map}}");
        assert_snapshot!(to_treeviz_str(&doc), @r#"
        ⧉ Document (2 blocks)
        ├─ ¶ 3 spans
        │ ├─ 𝐁 bold
        │ │ └─ ◦ "hi"
        │ ├─ ◦ " "
        │ └─ ⊕ Old Mill → old-mill
        └─ ▣ m.png "Map"
        "#);
    }

    #[test]
    fn test_treeviz_empty_line_and_truncation() {
        let doc = render("\nThis line is rather long and will be cut short");
        let output = to_treeviz_str(&doc);
        assert!(output.contains("├─ ¶ empty line"));
        assert!(output.contains("…"));
    }

    #[test]
    fn test_treeviz_single_block_label() {
        let output = to_treeviz_str(&render("x"));
        assert!(output.starts_with("⧉ Document (1 block)\n"));
    }
}
