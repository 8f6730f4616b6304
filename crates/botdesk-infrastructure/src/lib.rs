//! Infrastructure layer for BotDesk.
//!
//! Resolves configuration paths and loads `config.toml` and `secret.json`.

pub mod config_service;
pub mod paths;
pub mod secret_service;

pub use crate::config_service::ConfigService;
pub use crate::paths::{BotDeskPaths, PathError};
pub use crate::secret_service::SecretServiceImpl;
