//! Domain layer for BotDesk.
//!
//! Holds the assistant registry, conversation store, reply directive parser,
//! report panel state machine, report template, and the responder port. The
//! session coordination that ties these together lives in
//! `botdesk-application`.

pub mod assistant;
pub mod config;
pub mod conversation;
pub mod directive;
pub mod error;
pub mod panel;
pub mod report;
pub mod responder;
pub mod secret;

// Re-export common error type
pub use error::DeskError;
