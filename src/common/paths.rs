//! Centralized path management for bingwall

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Subdirectory of the pictures directory that holds downloaded images
pub const STORE_SUBDIR: &str = "Bing";

/// Get the bingwall config directory (not created)
pub fn bingwall_config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Unable to determine user config directory")?
        .join("bingwall"))
}

/// Resolve the user's home directory, preferring `$HOME`
pub fn home_dir() -> Result<PathBuf> {
    home_from(std::env::var_os("HOME"))
}

fn home_from(var: Option<OsString>) -> Result<PathBuf> {
    match var {
        Some(v) if !v.is_empty() => Ok(PathBuf::from(v)),
        _ => dirs::home_dir().context("Unable to determine home directory (HOME is not set)"),
    }
}

/// `<home>/Pictures`
pub fn pictures_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join("Pictures"))
}

/// Directory where images are stored.
///
/// An explicit override wins (with `~` expanded), otherwise `<home>/Pictures/Bing`.
pub fn store_dir(override_dir: Option<&str>) -> Result<PathBuf> {
    match override_dir {
        Some(dir) => Ok(expand(dir)),
        None => Ok(pictures_dir()?.join(STORE_SUBDIR)),
    }
}

fn expand(dir: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(dir).into_owned())
}

/// Make a path absolute relative to the current directory
pub fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()
        .context("getting current directory")?
        .join(path))
}
