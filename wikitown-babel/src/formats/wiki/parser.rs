//! Markup rendering (markup → IR)
//!
//! Every line is classified on its own, in a fixed priority order:
//!
//! 1. standalone image line: `{{img:file}}` / `{{img:file|caption}}`
//! 2. standalone audio line: `{{audio:file}}` / `{{audio:file|title}}`
//! 3. inline-mixed line, split in three passes: bold, then inline images, then links
//!
//! Bold segments are not scanned again, so links and images inside `**...**` stay
//! literal text. Malformed macros (unclosed, empty filename) never match and are left
//! as text. Rendering cannot fail.

use crate::grammar::{self, LINE_BREAK};
use crate::ir::nodes::{Audio, Block, Document, Figure, Image, Link, Span};
use regex::Captures;
use std::str::Split;

/// Render a whole markup document.
pub fn render(source: &str) -> Document {
    let document = Document::new(render_lines(source).collect());
    tracing::debug!(blocks = document.blocks.len(), "rendered markup document");
    document
}

/// Lazily render a markup document, one block per line.
///
/// The iterator borrows the source and keeps no other state, so cloning it restarts
/// rendering from the same position.
pub fn render_lines(source: &str) -> RenderedLines<'_> {
    RenderedLines {
        lines: source.split(LINE_BREAK),
    }
}

/// Iterator returned by [`render_lines`].
#[derive(Debug, Clone)]
pub struct RenderedLines<'a> {
    lines: Split<'a, char>,
}

impl Iterator for RenderedLines<'_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        self.lines.next().map(render_line)
    }
}

/// Classify and render a single line of markup.
pub fn render_line(line: &str) -> Block {
    if let Some((file, caption)) = match_standalone(&grammar::STANDALONE_IMAGE, line) {
        return Block::Image(Figure { file, caption });
    }

    if let Some((file, title)) = match_standalone(&grammar::STANDALONE_AUDIO, line) {
        return Block::Audio(Audio { file, title });
    }

    Block::Inline(render_inline(line))
}

/// Match a whole-line media macro, returning the trimmed file and optional argument.
fn match_standalone(
    pattern: &regex::Regex,
    line: &str,
) -> Option<(String, Option<String>)> {
    let caps = pattern.captures(line)?;
    let (file, argument) = macro_arguments(&caps);
    if file.is_empty() {
        return None;
    }
    let argument = Some(argument).filter(|arg| !arg.is_empty());
    Some((file, argument))
}

fn macro_arguments(caps: &Captures<'_>) -> (String, String) {
    let file = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
    let argument = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
    (file, argument)
}

/// Render the inline spans of a line that is not a standalone media macro.
pub fn render_inline(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in grammar::BOLD.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        split_images(&line[last..whole.start()], &mut spans);
        spans.push(Span::Bold(text_spans(inner.as_str())));
        last = whole.end();
    }

    split_images(&line[last..], &mut spans);
    spans
}

/// Second pass: pull inline images out of a plain-text segment.
///
/// A match with an empty filename is not an image; its text is carried over to the
/// link pass together with its neighbours.
fn split_images(segment: &str, spans: &mut Vec<Span>) {
    let mut pending = String::new();
    let mut last = 0;

    for caps in grammar::INLINE_IMAGE.captures_iter(segment) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let (file, alt) = macro_arguments(&caps);
        pending.push_str(&segment[last..whole.start()]);
        last = whole.end();

        if file.is_empty() {
            pending.push_str(whole.as_str());
            continue;
        }

        split_links(&pending, spans);
        pending.clear();

        let alt = if alt.is_empty() { file.clone() } else { alt };
        spans.push(Span::Image(Image { file, alt }));
    }

    pending.push_str(&segment[last..]);
    split_links(&pending, spans);
}

/// Third pass: pull wiki links out of the remaining text.
fn split_links(segment: &str, spans: &mut Vec<Span>) {
    let mut last = 0;

    for caps in grammar::WIKI_LINK.captures_iter(segment) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_text(&segment[last..whole.start()], spans);
        spans.push(Span::Link(Link {
            text: name.as_str().to_string(),
            target: grammar::slugify(name.as_str()),
        }));
        last = whole.end();
    }

    push_text(&segment[last..], spans);
}

fn push_text(text: &str, spans: &mut Vec<Span>) {
    if !text.is_empty() {
        spans.push(Span::text(text));
    }
}

fn text_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    push_text(text, &mut spans);
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(text: &str, target: &str) -> Span {
        Span::Link(Link {
            text: text.to_string(),
            target: target.to_string(),
        })
    }

    fn image(file: &str, alt: &str) -> Span {
        Span::Image(Image {
            file: file.to_string(),
            alt: alt.to_string(),
        })
    }

    #[test]
    fn test_bold_single_span() {
        let doc = render("**x**");
        assert_eq!(
            doc.blocks,
            vec![Block::Inline(vec![Span::Bold(vec![Span::text("x")])])]
        );
    }

    #[test]
    fn test_empty_bold_keeps_its_delimiters() {
        assert_eq!(render_inline("****"), vec![Span::Bold(vec![])]);
    }

    #[test]
    fn test_link_slug_and_display_text() {
        assert_eq!(
            render_inline("[[Ancient Ruins]]"),
            vec![link("Ancient Ruins", "ancient-ruins")]
        );
    }

    #[test]
    fn test_standalone_image_with_caption() {
        assert_eq!(
            render_line("{{img:a.png|A cap}}"),
            Block::Image(Figure {
                file: "a.png".to_string(),
                caption: Some("A cap".to_string()),
            })
        );
    }

    #[test]
    fn test_standalone_image_trims_arguments() {
        assert_eq!(
            render_line("{{img: a.png | A cap }}"),
            Block::Image(Figure {
                file: "a.png".to_string(),
                caption: Some("A cap".to_string()),
            })
        );
        assert_eq!(
            render_line("{{img:a.png| }}"),
            Block::Image(Figure {
                file: "a.png".to_string(),
                caption: None,
            })
        );
    }

    #[test]
    fn test_inline_image_between_text() {
        assert_eq!(
            render_inline("see {{img:a.png}} here"),
            vec![Span::text("see "), image("a.png", "a.png"), Span::text(" here")]
        );
    }

    #[test]
    fn test_inline_image_with_alt() {
        assert_eq!(
            render_inline("{{img:a.png|Alt text}} after"),
            vec![image("a.png", "Alt text"), Span::text(" after")]
        );
    }

    #[test]
    fn test_standalone_audio_with_and_without_title() {
        assert_eq!(
            render_line("{{audio:x.mp3}}"),
            Block::Audio(Audio {
                file: "x.mp3".to_string(),
                title: None,
            })
        );
        assert_eq!(
            render_line("{{audio:x.mp3|Theme}}"),
            Block::Audio(Audio {
                file: "x.mp3".to_string(),
                title: Some("Theme".to_string()),
            })
        );
    }

    #[test]
    fn test_inline_audio_is_literal() {
        assert_eq!(
            render_inline("play {{audio:x.mp3}} now"),
            vec![Span::text("play {{audio:x.mp3}} now")]
        );
    }

    #[test]
    fn test_malformed_image_is_literal_text() {
        assert_eq!(render_line("{{img:}}"), Block::Inline(vec![Span::text("{{img:}}")]));
        assert_eq!(
            render_line("{{img:a.png"),
            Block::Inline(vec![Span::text("{{img:a.png")])
        );
        assert_eq!(
            render_line("{{audio: }}"),
            Block::Inline(vec![Span::text("{{audio: }}")])
        );
    }

    #[test]
    fn test_empty_inline_image_merges_with_link_pass() {
        assert_eq!(
            render_inline("a {{img:}} [[B]]"),
            vec![Span::text("a {{img:}} "), link("B", "b")]
        );
    }

    #[test]
    fn test_bold_content_is_not_rescanned() {
        assert_eq!(
            render_inline("**[[Armor]] {{img:a.png}}**"),
            vec![Span::Bold(vec![Span::text("[[Armor]] {{img:a.png}}")])]
        );
    }

    #[test]
    fn test_image_pass_runs_before_link_pass() {
        assert_eq!(
            render_inline("[[A]]{{img:b.png|[[C]]}}"),
            vec![link("A", "a"), image("b.png", "[[C]]")]
        );
    }

    #[test]
    fn test_unbalanced_bold_stays_literal() {
        assert_eq!(
            render_inline("**a** and **b"),
            vec![Span::Bold(vec![Span::text("a")]), Span::text(" and **b")]
        );
    }

    #[test]
    fn test_line_with_bold_is_still_standalone_image() {
        assert_eq!(
            render_line("{{img:a.png|**big**}}"),
            Block::Image(Figure {
                file: "a.png".to_string(),
                caption: Some("**big**".to_string()),
            })
        );
    }

    #[test]
    fn test_one_block_per_line() {
        let doc = render("one\n\n{{img:a.png}}");
        assert_eq!(doc.blocks.len(), 3);
        assert_eq!(doc.blocks[1], Block::Inline(vec![]));
        assert!(matches!(doc.blocks[2], Block::Image(_)));
    }

    #[test]
    fn test_render_lines_is_restartable() {
        let lines = render_lines("a\n**b**\nc");
        let first: Vec<Block> = lines.clone().collect();
        let second: Vec<Block> = lines.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_mixed_line() {
        assert_eq!(
            render_inline("The **old** [[Stone Bridge]] {{img:bridge.jpg|Bridge}} today"),
            vec![
                Span::text("The "),
                Span::Bold(vec![Span::text("old")]),
                Span::text(" "),
                link("Stone Bridge", "stone-bridge"),
                Span::text(" "),
                image("bridge.jpg", "Bridge"),
                Span::text(" today"),
            ]
        );
    }
}
