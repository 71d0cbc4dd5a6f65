use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";

pub const DEFAULT_GREETING: &str =
    "Hi! I'm your MOSDAC assistant. Ask me anything about satellite data, \
     portal features, or data access.";

pub const DEFAULT_FALLBACK: &str =
    "Sorry, I'm having trouble connecting to my knowledge base. \
     Please try again in a moment.";

/// User configuration. Every field is optional; missing fields fall back to
/// the built-in defaults when the app starts.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub endpoint_url: Option<String>,
    pub minimizable: Option<bool>,
    pub greeting: Option<String>,
    pub fallback_message: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            endpoint_url: None,
            minimizable: None,
            greeting: None,
            fallback_message: None,
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Load config from an explicit path. A missing file is not an error,
    /// it just means defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("helpbot").join("config.json"))
    }
}
