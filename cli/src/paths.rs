//! Data directory resolution.

use std::path::{Path, PathBuf};

use anyhow::Context;

const APP_DIR: &str = "passforge";

/// Resolve the data directory: the explicit `--data-dir` /
/// `PASSFORGE_HOME` value, else `$XDG_DATA_HOME/passforge`, else
/// `$HOME/.local/share/passforge`.
///
/// # Errors
///
/// Fails when no override is given and `HOME` is unset.
pub fn data_dir(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    resolve(
        std::env::var("XDG_DATA_HOME").ok().as_deref(),
        std::env::var("HOME").ok().as_deref(),
    )
}

fn resolve(xdg_data_home: Option<&str>, home: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(xdg) = xdg_data_home.filter(|v| !v.trim().is_empty()) {
        return Ok(PathBuf::from(xdg).join(APP_DIR));
    }
    let home = home
        .filter(|v| !v.trim().is_empty())
        .context("HOME is not set; pass --data-dir or set PASSFORGE_HOME")?;
    Ok(PathBuf::from(home).join(".local").join("share").join(APP_DIR))
}
