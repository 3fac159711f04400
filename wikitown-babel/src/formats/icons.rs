//! Shared icon mapping for tree visualization formats

/// Get the Unicode icon for a given IR node type
///
/// Returns a single Unicode character that visually represents the node type.
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Line" => "¶",
        "Figure" => "▣",
        "Audio" => "♪",
        "Text" => "◦",
        "Bold" => "𝐁",
        "Link" => "⊕",
        "Image" => "▫",
        _ => "○",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_mappings() {
        assert_eq!(get_icon("Document"), "⧉");
        assert_eq!(get_icon("Line"), "¶");
        assert_eq!(get_icon("Figure"), "▣");
        assert_eq!(get_icon("Audio"), "♪");
        assert_eq!(get_icon("Text"), "◦");
        assert_eq!(get_icon("Bold"), "𝐁");
        assert_eq!(get_icon("Link"), "⊕");
        assert_eq!(get_icon("Image"), "▫");
    }

    #[test]
    fn test_unknown_node_type() {
        assert_eq!(get_icon("UnknownType"), "○");
    }
}
