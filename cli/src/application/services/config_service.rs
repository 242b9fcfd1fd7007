//! Application service — configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::LamConfig;

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn load_config(store: &impl ConfigStore) -> Result<LamConfig> {
    store.load()
}

/// Validate and apply `key = value`, then persist.
///
/// # Errors
///
/// Returns an error if validation fails or the store cannot be written.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<LamConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    Ok(config)
}
