use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Optional defaults stored on disk. Every field can be overridden from the command line.
///
/// Example TOML:
/// ```toml
/// key_file = "/home/me/.wu-key"
/// location = "CA/San_Francisco"
/// features = ["conditions"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub key_file: Option<PathBuf>,
    pub location: Option<String>,
    pub template: Option<String>,
    pub features: Option<Vec<String>>,
    /// Override for the API root, e.g. to point at a proxy.
    pub base_url: Option<String>,
}

impl Config {
    /// Load config from the platform config directory, or return an empty default if it
    /// doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config from an explicit path. A missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "wunderground-tool", "wu")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
