use std::process::Command;
use std::time::Duration;

use super::{WallpaperError, require_tool, run_checked};

/// Apply wallpaper on Hyprland using swww
pub fn apply_wallpaper(path: &str) -> Result<(), WallpaperError> {
    require_tool("swww")?;

    // A failing query means the daemon is not running yet
    if run_checked(Command::new("swww").arg("query")).is_err() {
        Command::new("swww-daemon")
            .spawn()
            .map_err(|source| WallpaperError::Spawn {
                program: "swww-daemon".to_string(),
                source,
            })?;

        // Give the daemon a moment to start
        std::thread::sleep(Duration::from_millis(100));
    }

    run_checked(Command::new("swww").args(["img", path]))?;
    Ok(())
}
