//! Unit tests for trmm-lam
//!
//! These tests use port doubles and loopback servers and run without
//! reaching the public network.

mod architecture;
mod config_store;
mod helpers;
mod http_infra;
mod mesh_session;
