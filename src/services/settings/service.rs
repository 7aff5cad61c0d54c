use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::AppConfig;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Loads and saves [`AppConfig`] as TOML.
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service bound to `config.toml` in the platform config directory.
    pub fn from_default_location() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "SiteGantt", "SiteGantt")
            .ok_or_else(|| anyhow!("Could not determine the config directory"))?;
        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the config, or the defaults when the file does not exist yet.
    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            log::info!("No config at {}; using defaults", self.path.display());
            return Ok(AppConfig::default());
        }

        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let config: AppConfig = toml::from_str(&text)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        config
            .validate()
            .map_err(|e| anyhow!("Invalid config: {}", e))?;

        log::debug!("Loaded config from {}", self.path.display());
        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        config
            .validate()
            .map_err(|e| anyhow!("Invalid config: {}", e))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let text = toml::to_string_pretty(config).context("Failed to serialize config")?;
        std::fs::write(&self.path, text)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        log::info!("Saved config to {}", self.path.display());
        Ok(())
    }
}
