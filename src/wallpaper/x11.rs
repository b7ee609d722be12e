use std::process::Command;

use super::{WallpaperError, require_tool, run_checked};

/// Apply wallpaper on a plain X11 session with feh
pub fn apply_wallpaper(path: &str) -> Result<(), WallpaperError> {
    require_tool("feh")?;
    run_checked(Command::new("feh").args(["--bg-fill", path]))?;
    Ok(())
}
