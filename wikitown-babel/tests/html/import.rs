//! Import tests for HTML format (editor HTML → markup)
//!
//! The editor hands back whatever its surface holds at save time: our own rendition,
//! possibly edited, or content pasted from elsewhere.

use wikitown_babel::format::Format;
use wikitown_babel::formats::html::HtmlFormat;
use wikitown_babel::ir::nodes::{Block, Span};
use wikitown_babel::{html_to_markup, UrlBases};

fn to_markup(html: &str) -> String {
    html_to_markup(html, &UrlBases::default()).unwrap()
}

#[test]
fn test_pasted_word_processor_content() {
    let html = "<p>Intro with <b>bold</b> and <em>soft</em> text.</p>\
                <p><a href=\"https://x.test\">external</a> link</p>";
    assert_eq!(
        to_markup(html),
        "Intro with **bold** and soft text.\nexternal link"
    );
}

#[test]
fn test_editor_line_divs() {
    let html = "First line<div>Second line</div><div><br></div><div>Third</div>";
    assert_eq!(to_markup(html), "First line\nSecond line\n\n\nThird");
}

#[test]
fn test_retargeted_link_keeps_its_text() {
    let html = "<a class=\"wiki-link\" href=\"/wiki/elsewhere\">Old Mill</a>";
    assert_eq!(to_markup(html), "[[Old Mill]]");
}

#[test]
fn test_absolute_media_url_is_stripped() {
    let html = "<img src=\"https://wikitown.example/media/map.png\" alt=\"Map\">";
    assert_eq!(to_markup(html), "{{img:map.png|Map}}");
}

#[test]
fn test_image_without_alt() {
    assert_eq!(to_markup("<img src=\"/media/map.png\">"), "{{img:map.png}}");
}

#[test]
fn test_custom_bases() {
    let bases = UrlBases::new("/files/", "/pages/");
    let markup = html_to_markup("<img src=\"/files/a.png\" alt=\"a.png\">", &bases).unwrap();
    assert_eq!(markup, "{{img:a.png}}");
}

#[test]
fn test_media_containers_do_not_open_a_line() {
    let audio = "<div>Bells</div><div class=\"wiki-audio\" data-file=\"bells.ogg\" data-title=\"\"></div>";
    assert_eq!(to_markup(audio), "Bells{{audio:bells.ogg}}");

    let figure = "<div>Map</div><figure class=\"wiki-figure\"><img src=\"/media/map.png\" alt=\"map.png\"></figure>";
    assert_eq!(to_markup(figure), "Map{{img:map.png}}");

    let rendered = "Bells<br><div class=\"wiki-audio\" data-file=\"bells.ogg\" data-title=\"\"></div>";
    assert_eq!(to_markup(rendered), "Bells\n{{audio:bells.ogg}}");
}

#[test]
fn test_audio_container_ignores_its_contents() {
    let html = "<div class=\"wiki-audio\" data-file=\"bells.ogg\" data-title=\"Bells\">\
                <span class=\"wiki-audio-title\">Renamed in editor</span>\
                <audio controls><source src=\"/media/other.ogg\"></audio></div>";
    assert_eq!(to_markup(html), "{{audio:bells.ogg|Bells}}");
}

#[test]
fn test_entities_survive_as_text() {
    assert_eq!(to_markup("a &lt; b &amp;&amp; c"), "a < b && c");
}

#[test]
fn test_whitespace_only_is_empty() {
    assert_eq!(to_markup("  <div> </div>\n"), "");
}

#[test]
fn test_parse_goes_through_markup() {
    let doc = HtmlFormat::default()
        .parse("<strong>big</strong> <a class=\"wiki-link\" href=\"#\">Town Hall</a>")
        .unwrap();
    assert_eq!(doc.blocks.len(), 1);
    let Block::Inline(spans) = &doc.blocks[0] else {
        panic!("expected an inline block");
    };
    assert_eq!(spans[0], Span::Bold(vec![Span::text("big")]));
    assert_eq!(spans[2].plain_text(), "Town Hall");
}
