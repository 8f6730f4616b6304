//! Unified path management for BotDesk configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/botdesk/           # Config directory ($BOTDESK_CONFIG_DIR overrides)
//! ├── config.toml              # Application configuration
//! └── secret.json              # API keys
//! ```

use std::path::{Path, PathBuf};

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "BOTDESK_CONFIG_DIR";

const APP_DIR_NAME: &str = "botdesk";
const CONFIG_FILE_NAME: &str = "config.toml";
const SECRET_FILE_NAME: &str = "secret.json";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves where BotDesk keeps its files.
///
/// A base directory can be injected for tests; otherwise the environment
/// override is used, then the platform config directory.
#[derive(Debug, Clone, Default)]
pub struct BotDeskPaths {
    base: Option<PathBuf>,
}

impl BotDeskPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/botdesk/`
    /// - `Err(PathError::ConfigDirNotFound)`: no platform config directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(CONFIG_FILE_NAME))
    }

    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(SECRET_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injected_base_wins() {
        let paths = BotDeskPaths::new(Some(Path::new("/tmp/botdesk-test")));
        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/botdesk-test/config.toml")
        );
        assert_eq!(
            paths.secret_file().unwrap(),
            PathBuf::from("/tmp/botdesk-test/secret.json")
        );
    }
}
