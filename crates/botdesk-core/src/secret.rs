//! Secret management service trait.
//!
//! Defines the interface for loading API keys and other sensitive
//! configuration data.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Root of `secret.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiSecret>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiSecret {
    pub api_key: String,
}

/// Service for loading secret configuration.
///
/// # Security Note
///
/// Implementations must never log secrets or include them in error
/// messages.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration. A missing file yields the default
    /// (empty) configuration.
    async fn load_secrets(&self) -> Result<SecretConfig>;
}
