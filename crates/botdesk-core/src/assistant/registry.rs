//! Static assistant registry.

use std::collections::{HashMap, HashSet};

use super::model::{Assistant, AssistantSeed};
use super::preset::{DEFAULT_REPORTING_ASSISTANT_ID, get_default_presets};
use crate::error::{DeskError, Result};

/// Immutable lookup table of the assistants available in a session.
///
/// The registry is built once at startup from seed data and validated:
/// ids must be unique and non-empty, and the reporting assistant must be
/// one of the registered ids.
#[derive(Debug, Clone)]
pub struct AssistantRegistry {
    assistants: Vec<Assistant>,
    greetings: HashMap<String, String>,
    reporting_id: String,
}

impl AssistantRegistry {
    /// Builds a registry from seeds, in the order given.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::Config` if the seed list is empty, contains a blank
    /// or duplicate id, or does not contain `reporting_id`.
    pub fn new(seeds: Vec<AssistantSeed>, reporting_id: impl Into<String>) -> Result<Self> {
        let reporting_id = reporting_id.into();
        if seeds.is_empty() {
            return Err(DeskError::config("at least one assistant must be defined"));
        }

        let mut seen = HashSet::new();
        let mut assistants = Vec::with_capacity(seeds.len());
        let mut greetings = HashMap::with_capacity(seeds.len());
        for AssistantSeed { assistant, greeting } in seeds {
            if assistant.id.trim().is_empty() {
                return Err(DeskError::config("assistant id must not be empty"));
            }
            if !seen.insert(assistant.id.clone()) {
                return Err(DeskError::config(format!(
                    "duplicate assistant id '{}'",
                    assistant.id
                )));
            }
            greetings.insert(assistant.id.clone(), greeting);
            assistants.push(assistant);
        }

        if !seen.contains(&reporting_id) {
            return Err(DeskError::config(format!(
                "reporting assistant '{}' is not a registered assistant",
                reporting_id
            )));
        }

        Ok(Self {
            assistants,
            greetings,
            reporting_id,
        })
    }

    /// Returns the assistants in drawer order.
    pub fn list_assistants(&self) -> &[Assistant] {
        &self.assistants
    }

    /// Looks up an assistant by id.
    pub fn get_assistant(&self, id: &str) -> Result<&Assistant> {
        self.assistants
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| DeskError::not_found("assistant", id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.assistants.iter().any(|a| a.id == id)
    }

    /// The id of the assistant whose selection opens the report panel.
    pub fn reporting_assistant_id(&self) -> &str {
        &self.reporting_id
    }

    pub fn is_reporting(&self, id: &str) -> bool {
        self.reporting_id == id
    }

    /// The greeting that seeds the assistant's conversation, if any.
    pub fn greeting(&self, id: &str) -> Option<&str> {
        self.greetings.get(id).map(String::as_str)
    }
}

impl Default for AssistantRegistry {
    fn default() -> Self {
        let mut assistants = Vec::new();
        let mut greetings = HashMap::new();
        for AssistantSeed { assistant, greeting } in get_default_presets() {
            greetings.insert(assistant.id.clone(), greeting);
            assistants.push(assistant);
        }
        Self {
            assistants,
            greetings,
            reporting_id: DEFAULT_REPORTING_ASSISTANT_ID.to_string(),
        }
    }
}
