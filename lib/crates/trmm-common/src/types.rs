use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role an installed agent registers under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    #[default]
    Server,
    Workstation,
}

impl AgentType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Workstation => "workstation",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an agent type string is neither `server` nor `workstation`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid agent type '{0}': must be server or workstation")]
pub struct UnknownAgentType(pub String);

impl FromStr for AgentType {
    type Err = UnknownAgentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "server" => Ok(Self::Server),
            "workstation" => Ok(Self::Workstation),
            other => Err(UnknownAgentType(other.to_string())),
        }
    }
}

/// CPU architecture of a Linux agent build.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum AgentArch {
    #[default]
    Amd64,
    Arm64,
    Arm,
    #[serde(rename = "386")]
    #[cfg_attr(feature = "clap", value(name = "386"))]
    I386,
}

impl AgentArch {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
            Self::Arm => "arm",
            Self::I386 => "386",
        }
    }
}

impl fmt::Display for AgentArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Companion-service connection parameters from `GET /core/settings/`.
///
/// The endpoint returns many more fields; only the ones the installer needs
/// are decoded and all of them are required.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub mesh_site: String,
    pub mesh_username: String,
    /// Hex-encoded login key shared with the companion service.
    pub mesh_token: String,
    pub mesh_device_group: String,
}

/// A site under a client, as listed by `GET /clients/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Site {
    pub id: u32,
    pub name: String,
}

/// A client record from `GET /clients/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Client {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sites: Vec<Site>,
}

/// Body of `GET /repos/<owner>/<repo>/releases/latest`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LatestRelease {
    pub tag_name: String,
}

/// Body of `POST /agents/installer/`.
///
/// The server only hands out enrollment tokens for generated install
/// commands, so the request describes a manual Windows install and the
/// token is lifted from the returned command line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstallerRequest {
    pub install_method: String,
    pub client: u32,
    pub site: u32,
    pub expires: u32,
    #[serde(rename = "agenttype")]
    pub agent_type: AgentType,
    pub power: u8,
    pub rdp: u8,
    pub ping: u8,
    #[serde(rename = "goarch")]
    pub go_arch: String,
    pub api: String,
    pub file_name: String,
    pub plat: String,
}

impl InstallerRequest {
    /// Manual-install request for the given client/site pair.
    #[must_use]
    pub fn manual(client: u32, site: u32, api: &str) -> Self {
        Self {
            install_method: "manual".to_string(),
            client,
            site,
            expires: 1,
            agent_type: AgentType::Server,
            power: 0,
            rdp: 0,
            ping: 0,
            go_arch: "amd64".to_string(),
            api: api.to_string(),
            file_name: "rmm.exe".to_string(),
            plat: "windows".to_string(),
        }
    }
}

/// Response of `POST /agents/installer/` for the manual method.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstallerResponse {
    pub cmd: String,
}
