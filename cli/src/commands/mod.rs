//! Command implementations

pub mod config;
pub mod install;
pub mod latest;
pub mod version;
pub mod view;

use std::path::PathBuf;

use clap::Args;

use crate::domain::AgentArch;

/// Management API connection flags.
#[derive(Args, Debug, Default)]
pub struct ApiArgs {
    /// URL for the Tactical RMM API server
    #[arg(short = 'u', long, env = "TRMM_URL")]
    pub url: Option<String>,

    /// API key for the Tactical RMM server
    #[arg(short = 'a', long, env = "TRMM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Agent binary location flags.
#[derive(Args, Debug, Default)]
pub struct AgentArgs {
    /// Repository to take the latest agent release from, or an explicit
    /// agent download URL
    #[arg(short = 'D', long, env = "TRMM_AGENT_DOWNLOAD_URL")]
    pub agent_download_url: Option<String>,

    /// Agent CPU architecture
    #[arg(long, value_enum, default_value_t = AgentArch::Amd64)]
    pub arch: AgentArch,
}

/// Arguments for the install command.
#[derive(Args, Debug)]
pub struct InstallArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    #[command(flatten)]
    pub agent: AgentArgs,

    /// Client ID (prompted for when omitted)
    #[arg(short, long)]
    pub client: Option<u32>,

    /// Site ID (prompted for when omitted)
    #[arg(short, long)]
    pub site: Option<u32>,

    /// Agent type
    #[arg(short = 't', long = "type", value_enum, default_value_t = trmm_common::AgentType::Server)]
    pub agent_type: trmm_common::AgentType,

    /// Where to write the installer script
    #[arg(short, long, default_value = crate::infra::installer::DEFAULT_SCRIPT_PATH)]
    pub output: PathBuf,

    /// Run the installer script right away (requires root)
    #[arg(short, long)]
    pub force: bool,
}
