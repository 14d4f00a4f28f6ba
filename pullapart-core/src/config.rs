use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::keys::KeyCode;
use crate::{PullApartError, Result};

/// User settings, stored as `PullApart.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullApartConfig {
    /// Press this key to pull apart all the groups in the inventory.
    pub pull_apart_groups: KeyCode,
    /// Repair parts broken by release 1.0.0 on the next key press in the
    /// garage. Cleared again once a repair has changed something.
    pub fix_broken_parts: bool,
    /// Release that last ran the repair.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_repair_version: Option<String>,
}

impl Default for PullApartConfig {
    fn default() -> Self {
        Self {
            pull_apart_groups: KeyCode::default(),
            fix_broken_parts: false,
            last_repair_version: None,
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir().or_else(dirs::data_dir)?;
    base.push("PullApart");
    base.push("PullApart.json");
    Some(base)
}

/// Settings bound to the file they were loaded from.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    config: PullApartConfig,
}

impl ConfigFile {
    /// Reads the settings, writing the defaults first when the file does not
    /// exist yet.
    pub fn load_or_create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            let file = Self {
                path,
                config: PullApartConfig::default(),
            };
            file.save()?;
            info!(path = %file.path.display(), "created default settings");
            return Ok(file);
        }

        let data = fs::read_to_string(&path)?;
        let config = serde_json::from_str(&data)?;
        Ok(Self { path, config })
    }

    pub fn load_default() -> Result<Self> {
        let path = default_config_path().ok_or_else(|| {
            PullApartError::Config("could not determine a settings directory".to_string())
        })?;
        Self::load_or_create(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &PullApartConfig {
        &self.config
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    pub fn set_pull_apart_groups(&mut self, key: KeyCode) -> Result<()> {
        self.config.pull_apart_groups = key;
        self.save()
    }

    pub fn set_fix_broken_parts(&mut self, enabled: bool) -> Result<()> {
        self.config.fix_broken_parts = enabled;
        self.save()
    }

    /// Turns the one-time repair off and remembers which release ran it.
    pub fn reset_fix_broken_parts(&mut self, version: &str) -> Result<()> {
        self.config.fix_broken_parts = false;
        self.config.last_repair_version = Some(version.to_string());
        self.save()
    }
}
