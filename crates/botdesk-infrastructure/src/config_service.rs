//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml` and caches it.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use botdesk_core::DeskError;
use botdesk_core::config::RootConfig;
use botdesk_core::error::Result;

use crate::paths::BotDeskPaths;

/// Configuration service that loads and caches the root configuration.
///
/// A missing file yields `RootConfig::default()`. A file that exists but
/// fails to parse or validate is an error; it is never silently replaced.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a service reading from the resolved `config.toml`.
    pub fn new(paths: &BotDeskPaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| DeskError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<RootConfig> {
        {
            let cached = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = self.load_config()?;
        let mut cached = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cached = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut cached = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cached = None;
    }

    fn load_config(&self) -> Result<RootConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "config file not found, using defaults");
            return Ok(RootConfig::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let config: RootConfig = toml::from_str(&content)?;

        // Surface invalid assistant definitions at load time.
        let registry = config.build_registry()?;
        config.initial_assistant_id(&registry)?;

        tracing::info!(path = %self.path.display(), "loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botdesk_core::config::LayoutMode;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        assert_eq!(service.get_config().unwrap(), RootConfig::default());
    }

    #[test]
    fn test_cache_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[desk]\nlayout = \"mobile\"\n").unwrap();

        let service = ConfigService::with_path(&path);
        assert_eq!(service.get_config().unwrap().desk.layout, LayoutMode::Mobile);

        std::fs::write(&path, "[desk]\nlayout = \"desktop\"\n").unwrap();
        assert_eq!(service.get_config().unwrap().desk.layout, LayoutMode::Mobile);

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().desk.layout, LayoutMode::Desktop);
    }
}
