//! Configuration model.
//!
//! Mirrors `config.toml`. Every field has a default so a missing or partial
//! file still yields a usable configuration. Loading lives in
//! `botdesk-infrastructure`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::assistant::{
    AssistantRegistry, AssistantSeed, DEFAULT_REPORTING_ASSISTANT_ID, get_default_presets,
};
use crate::error::{DeskError, Result};

/// Delay between leaving the drawer hover zone and the drawer closing.
pub const DEFAULT_DRAWER_CLOSE_DELAY_MS: u64 = 200;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Responsive layout of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LayoutMode {
    /// Two panes: conversation and report side by side; drawer opens on hover.
    #[default]
    Desktop,
    /// Full-screen conversation; report opens as an overlay; no hover zone.
    Mobile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskSettings {
    pub drawer_close_delay_ms: u64,
    pub reporting_assistant_id: String,
    /// Assistant selected at startup. Defaults to the first assistant.
    pub initial_assistant_id: Option<String>,
    pub layout: LayoutMode,
}

impl Default for DeskSettings {
    fn default() -> Self {
        Self {
            drawer_close_delay_ms: DEFAULT_DRAWER_CLOSE_DELAY_MS,
            reporting_assistant_id: DEFAULT_REPORTING_ASSISTANT_ID.to_string(),
            initial_assistant_id: None,
            layout: LayoutMode::Desktop,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub model: String,
    pub request_timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// The person using the dashboard, shown at the bottom of the drawer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub role: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Jake Williams".to_string(),
            role: "Your Profile".to_string(),
        }
    }
}

/// Root of `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootConfig {
    pub log_level: String,
    pub desk: DeskSettings,
    pub gemini: GeminiSettings,
    pub profile: UserProfile,
    /// Replaces the default assistants when non-empty.
    #[serde(rename = "assistant", skip_serializing_if = "Vec::is_empty")]
    pub assistants: Vec<AssistantSeed>,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            desk: DeskSettings::default(),
            gemini: GeminiSettings::default(),
            profile: UserProfile::default(),
            assistants: Vec::new(),
        }
    }
}

impl RootConfig {
    pub fn drawer_close_delay(&self) -> Duration {
        Duration::from_millis(self.desk.drawer_close_delay_ms)
    }

    pub fn assistant_seeds(&self) -> Vec<AssistantSeed> {
        if self.assistants.is_empty() {
            get_default_presets()
        } else {
            self.assistants.clone()
        }
    }

    /// Builds and validates the assistant registry described by this config.
    pub fn build_registry(&self) -> Result<AssistantRegistry> {
        AssistantRegistry::new(self.assistant_seeds(), self.desk.reporting_assistant_id.clone())
    }

    /// Resolves the assistant selected at startup.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::Config` when `initial_assistant_id` names an
    /// assistant that is not registered.
    pub fn initial_assistant_id(&self, registry: &AssistantRegistry) -> Result<String> {
        match &self.desk.initial_assistant_id {
            Some(id) if registry.contains(id) => Ok(id.clone()),
            Some(id) => Err(DeskError::config(format!(
                "initial assistant '{}' is not a registered assistant",
                id
            ))),
            None => registry
                .list_assistants()
                .first()
                .map(|a| a.id.clone())
                .ok_or_else(|| DeskError::config("no assistants registered")),
        }
    }
}
