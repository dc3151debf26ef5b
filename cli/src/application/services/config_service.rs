//! Application service — configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::EshostConfig;

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<EshostConfig> {
    store.load()
}

/// Save configuration.
pub fn save_config(store: &impl ConfigStore, config: &EshostConfig) -> Result<()> {
    store.save(config)
}
