use std::process::Command;

use super::{WallpaperError, run_checked};

/// AppleScript statement handed to `osascript`
fn finder_script(path: &str) -> String {
    let escaped = path.replace('\\', "\\\\").replace('"', "\\\"");
    format!("tell application \"Finder\" to set desktop picture to POSIX file \"{escaped}\"")
}

/// Apply wallpaper through Finder's scripting interface
pub fn apply_wallpaper(path: &str) -> Result<(), WallpaperError> {
    run_checked(Command::new("osascript").arg("-e").arg(finder_script(path)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_targets_finder_desktop_picture() {
        assert_eq!(
            finder_script("/Users/me/Pictures/Bing/湖光秋色.jpeg"),
            "tell application \"Finder\" to set desktop picture to POSIX file \
             \"/Users/me/Pictures/Bing/湖光秋色.jpeg\""
        );
    }

    #[test]
    fn quotes_in_path_are_escaped() {
        let script = finder_script("/tmp/say \"hi\".jpeg");
        assert!(script.ends_with("POSIX file \"/tmp/say \\\"hi\\\".jpeg\""));
    }
}
