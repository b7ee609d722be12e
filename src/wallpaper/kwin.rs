use std::process::Command;

use super::{WallpaperError, run_checked};

const QDBUS_CANDIDATES: [&str; 3] = ["qdbus6", "qdbus", "qdbus-qt5"];

fn plasma_script(path: &str) -> String {
    format!(
        r#"
        desktops().forEach(d => {{
            d.wallpaperPlugin = "org.kde.image";
            d.currentConfigGroup = Array("Wallpaper", "org.kde.image", "General");
            d.writeConfig("Image", "file://{}");
            d.reloadConfig();
        }});
        "#,
        path.replace('\\', "\\\\").replace('"', "\\\"")
    )
}

fn run_qdbus_script(cmd: &str, script: &str) -> Result<(), WallpaperError> {
    run_checked(Command::new(cmd).args([
        "org.kde.plasmashell",
        "/PlasmaShell",
        "org.kde.PlasmaShell.evaluateScript",
        script,
    ]))?;
    Ok(())
}

/// Apply wallpaper on KDE Plasma
pub fn apply_wallpaper(path: &str) -> Result<(), WallpaperError> {
    // Try plasma-apply-wallpaperimage first
    let direct = run_checked(Command::new("plasma-apply-wallpaperimage").arg(path));
    if direct.is_ok() {
        return Ok(());
    }

    // Fall back to the PlasmaShell scripting API (Plasma 6, Plasma 5, some distros)
    let script = plasma_script(path);
    let mut last_err = direct.err();
    for qdbus in QDBUS_CANDIDATES {
        match run_qdbus_script(qdbus, &script) {
            Ok(()) => return Ok(()),
            Err(e) => last_err = Some(e),
        }
    }

    Err(last_err.unwrap_or(WallpaperError::MissingTool("qdbus")))
}
