//! Application context — unified state passed to every command handler.

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use crate::application::ports::ConfigStore;
use crate::domain::config::LamConfig;
use crate::domain::Credentials;
use crate::infra::config::YamlConfigStore;
use crate::output::OutputContext;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
    /// Skip interactive prompts (also set by `CI` / `TRMM_LAM_YES` env vars).
    pub yes: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Persistent configuration storage.
    pub config_store: YamlConfigStore,
    /// Configuration loaded at startup.
    pub config: LamConfig,
    /// When `true`, never prompt.
    pub non_interactive: bool,
    /// Fired on Ctrl-C; long-running network steps honor it.
    pub cancel: CancellationToken,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("TRMM_LAM_YES").is_ok();
        let non_interactive = flags.yes || ci_env || flags.json;

        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let config_store = YamlConfigStore::default();
        let config = config_store.load().context("loading configuration")?;

        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet || flags.json),
            mode,
            config_store,
            config,
            non_interactive,
            cancel: CancellationToken::new(),
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Merge explicit values (flags / environment) over the config file.
    ///
    /// Missing values become empty strings; the management client rejects
    /// them with `NotConfigured` before any request is made.
    #[must_use]
    pub fn credentials(&self, url: Option<&str>, api_key: Option<&str>) -> Credentials {
        let url = url.or(self.config.api.url.as_deref()).unwrap_or_default();
        let api_key = api_key.or(self.config.api.key.as_deref()).unwrap_or_default();
        Credentials::new(url, api_key)
    }

    /// Agent reference: explicit value, then config, then the built-in default.
    #[must_use]
    pub fn agent_reference(&self, explicit: Option<&str>) -> String {
        explicit
            .unwrap_or_else(|| self.config.agent_reference())
            .to_string()
    }

    /// Ask the user to pick one of `items`, returning its index.
    ///
    /// # Errors
    ///
    /// Returns an error when prompting is disabled, `items` is empty, or the
    /// terminal prompt fails (e.g. no TTY available).
    pub fn select(&self, prompt: &str, items: &[&str]) -> Result<usize> {
        anyhow::ensure!(
            !self.non_interactive,
            "{prompt}: interactive selection is disabled; pass the id explicitly"
        );
        anyhow::ensure!(!items.is_empty(), "{prompt}: nothing to choose from");
        let index = dialoguer::Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?;
        Ok(index)
    }

    /// Cancel in-flight work when the user presses Ctrl-C.
    pub fn cancel_on_ctrl_c(&self) {
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }
}
