use std::process::Command;

use reqwest::Url;

use super::{WallpaperError, require_tool, run_checked};

const SCHEMA: &str = "org.gnome.desktop.background";

/// Percent-encoded `file://` URI, as gsettings expects
fn file_uri(path: &str) -> Result<String, WallpaperError> {
    Url::from_file_path(path)
        .map(String::from)
        .map_err(|()| WallpaperError::InvalidFileUri(path.to_string()))
}

fn gsettings_set(key: &str, value: &str) -> Command {
    let mut cmd = Command::new("gsettings");
    cmd.args(["set", SCHEMA, key, value]);
    cmd
}

/// Apply wallpaper on GNOME via gsettings
pub fn apply_wallpaper(path: &str) -> Result<(), WallpaperError> {
    require_tool("gsettings")?;
    let uri = file_uri(path)?;

    run_checked(&mut gsettings_set("picture-uri", &uri))?;

    // Best-effort: the dark variant only exists on GNOME 42+
    let _ = run_checked(&mut gsettings_set("picture-uri-dark", &uri));
    let _ = run_checked(&mut gsettings_set("picture-options", "zoom"));

    Ok(())
}
