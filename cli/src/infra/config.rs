//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::EshostConfig;
use crate::domain::config::DEFAULT_CONFIG_FILE;

/// Environment variable that overrides the config location.
pub const CONFIG_ENV: &str = "ESHOST_CONFIG";

/// Production implementation of `ConfigStore` that uses a JSON file on disk.
///
/// Path precedence: explicit `--config`, then `ESHOST_CONFIG`, then
/// `~/.eshost-config.json`.
#[derive(Debug, Clone, Default)]
pub struct JsonConfigStore {
    explicit: Option<PathBuf>,
}

impl JsonConfigStore {
    #[must_use]
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }
}

impl ConfigStore for JsonConfigStore {
    fn load(&self) -> Result<EshostConfig> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(EshostConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        EshostConfig::parse(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn save(&self, config: &EshostConfig) -> Result<()> {
        let path = self.path()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let content = config.to_json().context("cannot serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("cannot write {}", path.display()))?;
        tracing::debug!(path = %path.display(), hosts = config.hosts.len(), "config saved");
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.explicit {
            return Ok(path.clone());
        }
        if let Ok(val) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(DEFAULT_CONFIG_FILE))
    }
}
