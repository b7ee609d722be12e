use std::process::Command;

use super::{WallpaperError, run_checked};

fn bg_command(path: &str) -> String {
    format!("output \"*\" bg \"{}\" fill", path.replace('"', "\\\""))
}

/// Apply wallpaper on Sway: `swaymsg output "*" bg <path> fill`
pub fn apply_wallpaper(path: &str) -> Result<(), WallpaperError> {
    run_checked(Command::new("swaymsg").arg(bg_command(path)))?;
    Ok(())
}
