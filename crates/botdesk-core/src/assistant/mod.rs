//! Assistant domain module.
//!
//! This module contains the assistant domain model, the default seed data,
//! and the static registry that the session selects from.
//!
//! # Module Structure
//!
//! - `model`: Core assistant domain models (`Assistant`, `AssistantSeed`)
//! - `preset`: Default assistants and their greetings
//! - `registry`: Immutable lookup table (`AssistantRegistry`)

mod model;
mod preset;
mod registry;

// Re-export public API
pub use model::{Assistant, AssistantSeed};
pub use preset::{DEFAULT_REPORTING_ASSISTANT_ID, get_default_presets};
pub use registry::AssistantRegistry;
