//! The wikitown markup grammar
//!
//! Shared by both conversion directions. The syntax is fixed and intentionally tiny:
//!
//! | Construct    | Syntax                                  | Notes                               |
//! |--------------|-----------------------------------------|-------------------------------------|
//! | Bold         | `**text**`                              | non-greedy, no nesting              |
//! | Link         | `[[Page Name]]`                         | target slug: lowercase, `\s+` → `-` |
//! | Block image  | `{{img:file\|caption}}` on its own line | caption optional                    |
//! | Inline image | `{{img:file\|alt}}` within text         | alt optional, defaults to filename  |
//! | Block audio  | `{{audio:file\|title}}` on its own line | title optional                      |
//! | Line break   | `\n`                                    | explicit break in the rendered tree |
//!
//! The regular expressions below are the whole lexical layer. Anything they do not
//! match is literal text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Line separator in stored markup.
pub const LINE_BREAK: char = '\n';

pub const BOLD_DELIMITER: &str = "**";
pub const LINK_OPEN: &str = "[[";
pub const LINK_CLOSE: &str = "]]";
pub const IMAGE_OPEN: &str = "{{img:";
pub const AUDIO_OPEN: &str = "{{audio:";
pub const MACRO_CLOSE: &str = "}}";
pub const ARGUMENT_SEPARATOR: char = '|';

/// Default URL prefix media files are served under.
pub const DEFAULT_MEDIA_BASE: &str = "/media/";
/// Default URL prefix article pages are served under.
pub const DEFAULT_WIKI_BASE: &str = "/wiki/";

// CSS classes carried by the HTML rendition. The editor round trip depends on them.
pub const CLASS_FIGURE: &str = "wiki-figure";
pub const CLASS_IMAGE: &str = "wiki-image";
pub const CLASS_IMAGE_INLINE: &str = "wiki-image-inline";
pub const CLASS_AUDIO: &str = "wiki-audio";
pub const CLASS_AUDIO_TITLE: &str = "wiki-audio-title";
pub const CLASS_LINK: &str = "wiki-link";

pub const ATTR_DATA_FILE: &str = "data-file";
pub const ATTR_DATA_TITLE: &str = "data-title";

pub(crate) static STANDALONE_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{\{img:(.*?)(?:\|(.*?))?\}\}$").unwrap());

pub(crate) static STANDALONE_AUDIO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{\{audio:(.*?)(?:\|(.*?))?\}\}$").unwrap());

pub(crate) static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

pub(crate) static INLINE_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{img:(.*?)(?:\|(.*?))?\}\}").unwrap());

pub(crate) static WIKI_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[(.*?)\]\]").unwrap());

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Derive the navigation slug for a page name.
///
/// Lowercases the name and collapses every whitespace run into a single hyphen.
/// Nothing else is touched, so leading or trailing whitespace becomes a hyphen too.
///
/// ```
/// use wikitown_babel::grammar::slugify;
///
/// assert_eq!(slugify("Ancient Ruins"), "ancient-ruins");
/// assert_eq!(slugify("The   Old\tMill"), "the-old-mill");
/// ```
pub fn slugify(name: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

/// URL prefixes used when rendering media sources and page links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBases {
    pub media: String,
    pub wiki: String,
}

impl Default for UrlBases {
    fn default() -> Self {
        Self {
            media: DEFAULT_MEDIA_BASE.to_string(),
            wiki: DEFAULT_WIKI_BASE.to_string(),
        }
    }
}

impl UrlBases {
    pub fn new(media: impl Into<String>, wiki: impl Into<String>) -> Self {
        Self {
            media: media.into(),
            wiki: wiki.into(),
        }
    }

    pub fn media_url(&self, file: &str) -> String {
        format!("{}{}", self.media, file)
    }

    pub fn page_url(&self, slug: &str) -> String {
        format!("{}{}", self.wiki, slug)
    }

    /// Recover a media filename from a (possibly absolute) source URL.
    ///
    /// Everything up to and including the last occurrence of the media base is
    /// dropped. Sources that never mention the base are returned unchanged.
    pub fn strip_media<'a>(&self, src: &'a str) -> &'a str {
        if self.media.is_empty() {
            return src;
        }
        match src.rfind(self.media.as_str()) {
            Some(pos) => &src[pos + self.media.len()..],
            None => src,
        }
    }
}

/// Markup for an image reference, omitting the argument when it is empty.
pub fn image_markup(file: &str, argument: &str) -> String {
    macro_markup(IMAGE_OPEN, file, argument)
}

/// Markup for an audio reference, omitting the title when it is empty.
pub fn audio_markup(file: &str, title: &str) -> String {
    macro_markup(AUDIO_OPEN, file, title)
}

fn macro_markup(open: &str, file: &str, argument: &str) -> String {
    if argument.is_empty() {
        format!("{open}{file}{MACRO_CLOSE}")
    } else {
        format!("{open}{file}{ARGUMENT_SEPARATOR}{argument}{MACRO_CLOSE}")
    }
}

pub fn bold_markup(inner: &str) -> String {
    format!("{BOLD_DELIMITER}{inner}{BOLD_DELIMITER}")
}

pub fn link_markup(text: &str) -> String {
    format!("{LINK_OPEN}{text}{LINK_CLOSE}")
}
