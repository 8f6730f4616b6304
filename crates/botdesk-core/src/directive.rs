//! In-band reply directives.
//!
//! Assistants can ask the dashboard to show the report panel by embedding
//! [`GENERATE_GRAPH_TOKEN`] anywhere in a reply. The token is stripped before
//! the reply is shown.

/// Control token that requests the report panel.
pub const GENERATE_GRAPH_TOKEN: &str = "[generate_graph]";

/// Result of inspecting a raw reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    /// Text to display, with every directive removed.
    pub display_text: String,
    /// Whether the reply asked for the report panel.
    pub panel_requested: bool,
}

/// Parses a raw reply.
///
/// Without the token the input is returned unchanged. With it, every
/// occurrence is removed and the remainder is trimmed. Removal repeats until
/// no occurrence is left, so text such as `[generate[generate_graph]_graph]`
/// cannot reassemble the token.
pub fn parse_reply(raw: &str) -> ParsedReply {
    if !raw.contains(GENERATE_GRAPH_TOKEN) {
        return ParsedReply {
            display_text: raw.to_string(),
            panel_requested: false,
        };
    }

    let mut text = raw.replace(GENERATE_GRAPH_TOKEN, "");
    while text.contains(GENERATE_GRAPH_TOKEN) {
        text = text.replace(GENERATE_GRAPH_TOKEN, "");
    }

    ParsedReply {
        display_text: text.trim().to_string(),
        panel_requested: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_reply_is_untouched() {
        let parsed = parse_reply("  plain text  ");
        assert!(!parsed.panel_requested);
        assert_eq!(parsed.display_text, "  plain text  ");
    }

    #[test]
    fn test_token_is_stripped_and_trimmed() {
        let parsed = parse_reply("Here it is. [generate_graph]");
        assert!(parsed.panel_requested);
        assert_eq!(parsed.display_text, "Here it is.");
    }

    #[test]
    fn test_every_occurrence_removed() {
        let parsed = parse_reply("[generate_graph]Sales[generate_graph] up [generate_graph]");
        assert!(parsed.panel_requested);
        assert_eq!(parsed.display_text, "Sales up");
    }

    #[test]
    fn test_nested_token_cannot_reassemble() {
        let parsed = parse_reply("a [generate[generate_graph]_graph] b");
        assert!(parsed.panel_requested);
        assert!(!parsed.display_text.contains(GENERATE_GRAPH_TOKEN));
    }

    #[test]
    fn test_malformed_token_is_not_found() {
        for raw in ["[generate graph]", "[GENERATE_GRAPH]", "generate_graph", "[generate_graph"] {
            assert!(!parse_reply(raw).panel_requested, "{raw}");
        }
    }

    #[test]
    fn test_stripping_is_idempotent() {
        let samples = [
            "Of course, here is the sales graph you requested. [generate_graph]",
            "[generate_graph]",
            "  leading [generate_graph] and trailing  ",
            "no directive at all",
            "",
        ];
        for raw in samples {
            let once = parse_reply(raw).display_text;
            let twice = parse_reply(&once).display_text;
            assert_eq!(once, twice, "{raw}");
            assert!(!once.contains(GENERATE_GRAPH_TOKEN));
        }
    }

    #[test]
    fn test_token_only_reply_is_empty() {
        let parsed = parse_reply("  [generate_graph]\n");
        assert!(parsed.panel_requested);
        assert_eq!(parsed.display_text, "");
    }
}
