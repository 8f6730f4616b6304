//! Assistant domain model.
//!
//! Represents the role-specific chat assistants a user can converse with.
//! Assistants are defined once at startup and never change afterwards.

use serde::{Deserialize, Serialize};

/// A role-specific assistant shown in the navigation drawer.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Assistant {
    /// Stable identifier (e.g. `"sam"`)
    pub id: String,
    /// Display name of the assistant
    pub name: String,
    /// Role label; selects the persona behavior applied by the responder
    pub role: String,
    /// Avatar color hint for renderers
    #[serde(default)]
    pub avatar_color: String,
    /// Avatar initials for renderers
    #[serde(default)]
    pub initials: String,
}

/// An assistant together with the greeting that seeds its conversation.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AssistantSeed {
    #[serde(flatten)]
    pub assistant: Assistant,
    pub greeting: String,
}
