//! Export tests for HTML format (markup → HTML)
//!
//! These tests verify that article markup renders to the HTML the article view
//! shows, checking the exact fragment where it matters.

use insta::assert_snapshot;
use wikitown_babel::format::Format;
use wikitown_babel::formats::html::{HtmlFormat, HtmlOptions};
use wikitown_babel::{markup_to_html, render, UrlBases};

/// Helper to convert markup to an HTML fragment with the default bases
fn wiki_to_html(markup: &str) -> String {
    markup_to_html(markup, &UrlBases::default()).unwrap()
}

// ============================================================================
// WHOLE ARTICLES
// ============================================================================

#[test]
fn test_mixed_article() {
    let markup = "Welcome to **Wikitown**.\n\
                  {{img:square.png|The town square}}\n\
                  See [[Old Mill]] and {{img:mill.png}} nearby.\n\
                  {{audio:bells.ogg|Church bells}}";

    assert_snapshot!(
        wiki_to_html(markup),
        @r#"Welcome to <strong>Wikitown</strong>.<br><figure class="wiki-figure"><img src="/media/square.png" alt="The town square" class="wiki-image"><figcaption>The town square</figcaption></figure><br>See <a href="/wiki/old-mill" class="wiki-link">Old Mill</a> and <img src="/media/mill.png" alt="mill.png" class="wiki-image-inline"> nearby.<br><div class="wiki-audio" data-file="bells.ogg" data-title="Church bells"><span class="wiki-audio-title">Church bells</span><audio controls="" preload="none"><source src="/media/bells.ogg"></audio></div>"#
    );
}

#[test]
fn test_empty_article() {
    assert_eq!(wiki_to_html(""), "");
}

#[test]
fn test_blank_lines_become_consecutive_breaks() {
    assert_eq!(wiki_to_html("a\n\nb"), "a<br><br>b");
    assert_eq!(wiki_to_html("a\n"), "a<br>");
}

// ============================================================================
// LITERAL TEXT
// ============================================================================

#[test]
fn test_unclosed_bold_is_literal() {
    assert_eq!(wiki_to_html("**open"), "**open");
}

#[test]
fn test_link_inside_bold_is_literal() {
    assert_eq!(
        wiki_to_html("**see [[Home]]**"),
        "<strong>see [[Home]]</strong>"
    );
}

#[test]
fn test_inline_audio_is_literal() {
    assert_eq!(
        wiki_to_html("listen {{audio:x.mp3}}"),
        "listen {{audio:x.mp3}}"
    );
}

#[test]
fn test_markup_like_html_is_escaped() {
    assert_eq!(
        wiki_to_html("<script>alert(1)</script>"),
        "&lt;script&gt;alert(1)&lt;/script&gt;"
    );
}

// ============================================================================
// OPTIONS
// ============================================================================

#[test]
fn test_format_uses_configured_bases() {
    let format = HtmlFormat::new(UrlBases::new("https://cdn.example/m/", "/pages/"));
    let html = format.serialize(&render("{{img:a.png}}\n[[Town Hall]]")).unwrap();
    assert!(html.contains("src=\"https://cdn.example/m/a.png\""));
    assert!(html.contains("href=\"/pages/town-hall\""));
}

#[test]
fn test_standalone_page_embeds_fragment() {
    let options = HtmlOptions::default().standalone("Old Mill");
    let html = wikitown_babel::formats::html::serialize_to_html_with_options(
        &render("**x**"),
        &options,
    )
    .unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Old Mill</title>"));
    assert!(html.contains("<div class=\"page-body\">\n<strong>x</strong>\n</div>"));
}
