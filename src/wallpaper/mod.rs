//! Desktop wallpaper backends.
//!
//! Each backend shells out to the tool its desktop exposes for changing the
//! background. The path handed in must be absolute.

use std::io;
use std::path::Path;
use std::process::{Command, Output};

use thiserror::Error;

use crate::common::desktop::DesktopKind;

pub mod gnome;
pub mod hyprland;
pub mod kwin;
pub mod macos;
pub mod sway;
pub mod x11;

#[derive(Error, Debug)]
pub enum WallpaperError {
    #[error("Setting the wallpaper is not supported on desktop '{0}'")]
    UnsupportedDesktop(String),

    #[error("{0} is not installed")]
    MissingTool(&'static str),

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Wallpaper path is not valid UTF-8: {0}")]
    NonUtf8Path(String),

    #[error("Cannot turn '{0}' into a file URI")]
    InvalidFileUri(String),
}

/// Seam between the pipeline and the desktop
pub trait WallpaperSetter {
    fn name(&self) -> String;
    fn set(&self, image_abs: &Path) -> Result<(), WallpaperError>;
}

/// Picks the backend for the detected desktop
pub struct DesktopSetter {
    desktop: DesktopKind,
}

impl DesktopSetter {
    pub fn detect() -> Self {
        Self::for_desktop(DesktopKind::detect())
    }

    pub fn for_desktop(desktop: DesktopKind) -> Self {
        Self { desktop }
    }
}

impl WallpaperSetter for DesktopSetter {
    fn name(&self) -> String {
        self.desktop.name()
    }

    fn set(&self, image_abs: &Path) -> Result<(), WallpaperError> {
        let path = path_str(image_abs)?;
        match &self.desktop {
            DesktopKind::MacOs => macos::apply_wallpaper(path),
            DesktopKind::Gnome => gnome::apply_wallpaper(path),
            DesktopKind::Kde => kwin::apply_wallpaper(path),
            DesktopKind::Sway => sway::apply_wallpaper(path),
            DesktopKind::Hyprland => hyprland::apply_wallpaper(path),
            DesktopKind::X11 => x11::apply_wallpaper(path),
            DesktopKind::Unknown(name) => Err(WallpaperError::UnsupportedDesktop(name.clone())),
        }
    }
}

fn path_str(path: &Path) -> Result<&str, WallpaperError> {
    path.to_str()
        .ok_or_else(|| WallpaperError::NonUtf8Path(path.to_string_lossy().into_owned()))
}

/// Run a command to completion and require a zero exit status
pub(crate) fn run_checked(cmd: &mut Command) -> Result<Output, WallpaperError> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    let output = cmd.output().map_err(|source| WallpaperError::Spawn {
        program: program.clone(),
        source,
    })?;

    if !output.status.success() {
        return Err(WallpaperError::CommandFailed {
            program,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output)
}

/// Fail early with a readable message when a required tool is absent
pub(crate) fn require_tool(tool: &'static str) -> Result<(), WallpaperError> {
    which::which(tool)
        .map(|_| ())
        .map_err(|_| WallpaperError::MissingTool(tool))
}
