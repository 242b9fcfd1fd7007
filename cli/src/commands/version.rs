//! `trmm-lam version`

use anyhow::Result;

use crate::output::json;

/// Run the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(as_json: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");

    if as_json {
        json::print(&serde_json::json!({ "name": "trmm-lam", "version": version }))
    } else {
        println!("trmm-lam {version}");
        Ok(())
    }
}
