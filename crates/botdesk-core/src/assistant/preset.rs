//! Default assistant presets.
//!
//! Provides the assistants available when the configuration does not
//! define its own `[[assistant]]` entries.

use super::model::{Assistant, AssistantSeed};

/// The assistant whose selection opens the report panel.
pub const DEFAULT_REPORTING_ASSISTANT_ID: &str = "sam";

const SAM_GREETING: &str = "Hi there! I've just generated the 'Top 10 Customers' report for the last 6 months.

This report includes:
- A detailed breakdown of sales data.
- A pie chart illustrating customer distribution.

You can use the filters to adjust the parameters and rename the template before saving. Let me know if you need any other reports!";

fn seed(id: &str, name: &str, role: &str, avatar_color: &str, greeting: &str) -> AssistantSeed {
    AssistantSeed {
        assistant: Assistant {
            id: id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            avatar_color: avatar_color.to_string(),
            initials: name.chars().take(1).collect(),
        },
        greeting: greeting.to_string(),
    }
}

/// Returns the default assistants in drawer order:
/// - **Sam**: Sales manager, the reporting assistant
/// - **Mark**: Marketing manager
/// - **Coby**: Content Creator
/// - **Ivy**: Inventory Manager
pub fn get_default_presets() -> Vec<AssistantSeed> {
    vec![
        seed("sam", "Sam", "Sales manager", "green", SAM_GREETING),
        seed(
            "mark",
            "Mark",
            "Marketing manager",
            "red",
            "Hello! How can I assist with your marketing questions today?",
        ),
        seed(
            "coby",
            "Coby",
            "Content Creator",
            "orange",
            "Hey there! Ready to brainstorm some content ideas?",
        ),
        seed(
            "ivy",
            "Ivy",
            "Inventory Manager",
            "purple",
            "Hi, I can help with any inventory management queries.",
        ),
    ]
}
