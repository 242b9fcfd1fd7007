//! Installer script assembly.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::sync::LazyLock;

use regex::Regex;
use trmm_common::AgentType;

use crate::domain::error::ProvisionError;

/// Bundled Linux installer template.
pub const LINUX_INSTALL_SCRIPT: &str = include_str!("../../assets/linux_install.sh");

pub const AGENT_DL: &str = "agentDLChange";
pub const MESH_DL: &str = "meshDLChange";
pub const API_URL: &str = "apiURLChange";
pub const TOKEN: &str = "tokenChange";
pub const CLIENT_ID: &str = "clientIDChange";
pub const SITE_ID: &str = "siteIDChange";
pub const AGENT_TYPE: &str = "agentTypeChange";

/// Every placeholder the template must carry.
pub const PLACEHOLDERS: [&str; 7] = [
    AGENT_DL, MESH_DL, API_URL, TOKEN, CLIENT_ID, SITE_ID, AGENT_TYPE,
];

static PLACEHOLDER_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(&PLACEHOLDERS.join("|")));

/// Resolved values for one installer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerParams {
    pub client_id: u32,
    pub site_id: u32,
    pub agent_type: AgentType,
    pub agent_download_url: String,
    pub mesh_download_url: String,
    pub api_url: String,
    pub enrollment_token: String,
}

impl InstallerParams {
    fn value_for(&self, placeholder: &str) -> Option<String> {
        let value = match placeholder {
            AGENT_DL => self.agent_download_url.clone(),
            MESH_DL => self.mesh_download_url.clone(),
            API_URL => self.api_url.clone(),
            TOKEN => self.enrollment_token.clone(),
            CLIENT_ID => self.client_id.to_string(),
            SITE_ID => self.site_id.to_string(),
            AGENT_TYPE => self.agent_type.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

/// Substitute every placeholder in `template`.
///
/// Substitution is a single left-to-right pass, so a value is never scanned
/// for further placeholders. No escaping is applied: values go into the
/// script verbatim.
///
/// # Errors
///
/// `MissingPlaceholder` if the template lacks one of [`PLACEHOLDERS`];
/// `UnresolvedPlaceholder` if a value is empty or itself contains a
/// placeholder token, so the script would not be fully parameterized.
pub fn assemble(template: &str, params: &InstallerParams) -> Result<String, ProvisionError> {
    let mut values = Vec::with_capacity(PLACEHOLDERS.len());
    for placeholder in PLACEHOLDERS {
        if !template.contains(placeholder) {
            return Err(ProvisionError::MissingPlaceholder(placeholder));
        }
        let value = params
            .value_for(placeholder)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ProvisionError::UnresolvedPlaceholder(placeholder))?;
        if PLACEHOLDERS.iter().any(|p| value.contains(p)) {
            return Err(ProvisionError::UnresolvedPlaceholder(placeholder));
        }
        values.push((placeholder, value));
    }

    let pattern = PLACEHOLDER_RE
        .as_ref()
        .map_err(|e| ProvisionError::Protocol(format!("placeholder pattern: {e}")))?;
    let script = pattern.replace_all(template, |caps: &regex::Captures<'_>| {
        values
            .iter()
            .find(|(p, _)| *p == &caps[0])
            .map(|(_, v)| v.clone())
            .unwrap_or_default()
    });
    Ok(script.into_owned())
}
