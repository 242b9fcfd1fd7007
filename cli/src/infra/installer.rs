//! Local side of installation: writing the generated script and running it.

use std::path::Path;
use std::process::ExitStatus;

use anyhow::{Context, Result};

/// Where `install` writes the script unless told otherwise.
pub const DEFAULT_SCRIPT_PATH: &str = "/tmp/trmm-installer.sh";

/// Write `script` to `path`, readable and executable by the owner only.
///
/// # Errors
///
/// Returns an error if the file cannot be created or its mode set.
pub fn write_script(path: &Path, script: &str) -> Result<()> {
    std::fs::write(path, script).with_context(|| format!("cannot write {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
            .with_context(|| format!("cannot set permissions on {}", path.display()))?;
    }
    Ok(())
}

/// Run the script with `bash`, inheriting the terminal.
///
/// # Errors
///
/// Returns an error if `bash` cannot be spawned.
pub async fn run_script(path: &Path) -> Result<ExitStatus> {
    tokio::process::Command::new("bash")
        .arg(path)
        .kill_on_drop(true)
        .status()
        .await
        .context("failed to spawn bash")
}

/// Whether the effective user is root.
#[must_use]
pub fn is_root() -> bool {
    nix::unistd::Uid::effective().is_root()
}
