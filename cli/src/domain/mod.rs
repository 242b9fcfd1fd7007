//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod auth_token;
pub mod clients;
pub mod config;
pub mod enrollment;
pub mod error;
pub mod mesh;
pub mod release;
pub mod script;

pub use config::{Credentials, LamConfig, validate_config_key, validate_config_value};
pub use error::{ConfigError, ProvisionError};
pub use release::{AgentArch, AgentRelease, AgentSource, RepoRef};
pub use script::InstallerParams;
