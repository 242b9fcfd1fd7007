//! `trmm-lam config` — show and set configuration values.

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;
use crate::domain::config::LamConfig;
use crate::output::json;

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key (api.url, api.key, agent.download_url, session.timeout_secs)
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read, validated, or saved.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Set { key, value } => set_config(app, &key, &value),
    }
}

fn show_config(app: &AppContext) -> Result<()> {
    let config = config_service::load_config(&app.config_store)?;
    let path = app.config_store.path()?;
    let key = masked_key(&config);

    if app.is_json() {
        return json::print(&serde_json::json!({
            "path": path.display().to_string(),
            "api": { "url": config.api.url.as_deref(), "key": key },
            "agent": { "download_url": config.agent_reference() },
            "session": { "timeout_secs": config.session.timeout_secs },
        }));
    }

    let out = &app.output;
    out.header(&format!("Configuration ({})", path.display()));
    out.kv("api.url             ", config.api.url.as_deref().unwrap_or("(not set)"));
    out.kv("api.key             ", key.as_deref().unwrap_or("(not set)"));
    out.kv("agent.download_url  ", config.agent_reference());
    out.kv("session.timeout_secs", &config.session.timeout_secs.to_string());
    Ok(())
}

fn set_config(app: &AppContext, key: &str, value: &str) -> Result<()> {
    config_service::set_value(&app.config_store, key, value)?;

    let shown = if key == "api.key" { "********" } else { value };
    if app.is_json() {
        json::print(&serde_json::json!({ "key": key, "value": shown }))
    } else {
        app.output.success(&format!("Set {key} = {shown}"));
        Ok(())
    }
}

/// The stored API key with all but its last four characters hidden.
fn masked_key(config: &LamConfig) -> Option<String> {
    let key = config.api.key.as_deref()?;
    let visible = key.char_indices().rev().nth(3).map_or("", |(i, _)| &key[i..]);
    Some(format!("****{visible}"))
}
