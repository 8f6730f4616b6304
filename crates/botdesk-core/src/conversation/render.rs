//! Presentation blocks for message text.
//!
//! Assistant replies are written in a light report style: paragraphs are
//! separated by blank lines, a paragraph starting with `- ` is a bullet list
//! (every line of it loses its first two characters, the marker position)
//! and a paragraph starting with `> ` is a quote. User text is shown verbatim.

use super::message::Message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBlock {
    Paragraph(String),
    BulletList(Vec<String>),
    Quote(String),
}

/// Splits a message into the blocks a renderer should draw.
pub fn render_blocks(message: &Message) -> Vec<MessageBlock> {
    if message.sender.is_user() {
        return vec![MessageBlock::Paragraph(message.text.clone())];
    }

    message
        .text
        .split("\n\n")
        .map(|paragraph| {
            if paragraph.starts_with("- ") {
                let items = paragraph
                    .lines()
                    .map(|line| line.chars().skip(2).collect())
                    .collect();
                MessageBlock::BulletList(items)
            } else if let Some(quoted) = paragraph.strip_prefix("> ") {
                MessageBlock::Quote(quoted.to_string())
            } else {
                MessageBlock::Paragraph(paragraph.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_text_is_single_paragraph() {
        let message = Message::from_user(1, "- not a list\n\nstill mine");
        assert_eq!(
            render_blocks(&message),
            vec![MessageBlock::Paragraph("- not a list\n\nstill mine".to_string())]
        );
    }

    #[test]
    fn test_assistant_report_layout() {
        let text = "This report includes:\n\n- Sales data.\n- A pie chart.\n\n> Filters can be adjusted.";
        let message = Message::from_assistant(2, "sam", text);
        assert_eq!(
            render_blocks(&message),
            vec![
                MessageBlock::Paragraph("This report includes:".to_string()),
                MessageBlock::BulletList(vec!["Sales data.".to_string(), "A pie chart.".to_string()]),
                MessageBlock::Quote("Filters can be adjusted.".to_string()),
            ]
        );
    }

    #[test]
    fn test_bullet_lines_drop_marker_position() {
        let message = Message::from_assistant(3, "sam", "- Q1 totals
* Q2 totals
-x
- Über");
        assert_eq!(
            render_blocks(&message),
            vec![MessageBlock::BulletList(vec![
                "Q1 totals".to_string(),
                "Q2 totals".to_string(),
                String::new(),
                "Über".to_string(),
            ])]
        );
    }
}
