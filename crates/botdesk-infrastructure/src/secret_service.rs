//! Secret service implementation.
//!
//! Reads API keys from `secret.json`. The `GEMINI_API_KEY` (or legacy
//! `API_KEY`) environment variable takes precedence over the file.

use std::path::{Path, PathBuf};

use botdesk_core::DeskError;
use botdesk_core::error::Result;
use botdesk_core::secret::{GeminiSecret, SecretConfig, SecretService};

use crate::paths::BotDeskPaths;

/// Environment variables checked for the Gemini key, in order.
pub const GEMINI_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone)]
pub struct SecretServiceImpl {
    path: PathBuf,
    use_env: bool,
}

impl SecretServiceImpl {
    /// Creates a service reading the resolved `secret.json`, with the
    /// environment override enabled.
    pub fn new(paths: &BotDeskPaths) -> Result<Self> {
        let path = paths
            .secret_file()
            .map_err(|e| DeskError::config(e.to_string()))?;
        Ok(Self {
            path,
            use_env: true,
        })
    }

    /// Creates a service that only reads the given file.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            use_env: false,
        }
    }

    fn env_key() -> Option<String> {
        GEMINI_KEY_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty())
    }

    async fn read_file(&self) -> Result<SecretConfig> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                // serde_json errors can quote input; keep the key out of the message.
                DeskError::config(format!(
                    "Failed to parse {} at line {}",
                    self.path.display(),
                    e.line()
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SecretConfig::default()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        let mut secrets = self.read_file().await?;
        if self.use_env {
            if let Some(api_key) = Self::env_key() {
                tracing::debug!("using Gemini API key from environment");
                secrets.gemini = Some(GeminiSecret { api_key });
            }
        }
        Ok(secrets)
    }
}
