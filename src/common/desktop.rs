use std::env;
use std::process::Command;

/// Desktop environments with a wallpaper backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopKind {
    /// macOS Finder desktop
    MacOs,
    /// GNOME (and derivatives reading org.gnome.desktop.background)
    Gnome,
    /// KDE Plasma
    Kde,
    /// Sway compositor
    Sway,
    /// Hyprland compositor
    Hyprland,
    /// Plain X11 window manager
    X11,
    /// Other/unknown desktop
    Unknown(String),
}

/// Session-related environment values used for detection
#[derive(Debug, Default, Clone)]
pub struct SessionEnv {
    pub current_desktop: Option<String>,
    pub session_desktop: Option<String>,
    pub desktop_session: Option<String>,
    pub wayland_display: bool,
    pub x11_display: bool,
}

impl SessionEnv {
    pub fn from_process() -> Self {
        Self {
            current_desktop: env::var("XDG_CURRENT_DESKTOP").ok(),
            session_desktop: env::var("XDG_SESSION_DESKTOP").ok(),
            desktop_session: env::var("DESKTOP_SESSION").ok(),
            wayland_display: env::var_os("WAYLAND_DISPLAY").is_some(),
            x11_display: env::var_os("DISPLAY").is_some(),
        }
    }
}

impl DesktopKind {
    /// Detect the current desktop
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            return DesktopKind::MacOs;
        }

        let session = SessionEnv::from_process();
        if let Some(kind) = Self::from_session(&session) {
            return kind;
        }

        if session.wayland_display {
            // Try to detect specific Wayland compositors
            if is_process_running("sway") {
                return DesktopKind::Sway;
            }
            if is_process_running("Hyprland") {
                return DesktopKind::Hyprland;
            }
            return DesktopKind::Unknown("wayland".to_string());
        }

        if session.x11_display {
            return DesktopKind::X11;
        }

        DesktopKind::Unknown("unknown".to_string())
    }

    /// Detection from environment values only, without probing processes.
    ///
    /// Returns `None` when the values are inconclusive.
    pub fn from_session(session: &SessionEnv) -> Option<Self> {
        let names = [
            &session.current_desktop,
            &session.session_desktop,
            &session.desktop_session,
        ];
        for name in names.into_iter().flatten() {
            // XDG_CURRENT_DESKTOP is a colon separated list, e.g. "ubuntu:GNOME"
            for part in name.split(':') {
                if let Some(kind) = Self::from_name(part) {
                    return Some(kind);
                }
            }
        }

        if !session.wayland_display && session.x11_display {
            return Some(DesktopKind::X11);
        }
        None
    }

    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "gnome" | "gnome-xorg" | "gnome-classic" | "unity" | "budgie" | "pop" => {
                Some(DesktopKind::Gnome)
            }
            "kde" | "plasma" | "plasmawayland" | "plasmax11" => Some(DesktopKind::Kde),
            "sway" => Some(DesktopKind::Sway),
            "hyprland" => Some(DesktopKind::Hyprland),
            _ => None,
        }
    }

    /// Get a human-readable name for the desktop
    pub fn name(&self) -> String {
        match self {
            DesktopKind::MacOs => "macOS".to_string(),
            DesktopKind::Gnome => "GNOME".to_string(),
            DesktopKind::Kde => "KDE Plasma".to_string(),
            DesktopKind::Sway => "Sway".to_string(),
            DesktopKind::Hyprland => "Hyprland".to_string(),
            DesktopKind::X11 => "X11".to_string(),
            DesktopKind::Unknown(name) => name.clone(),
        }
    }
}

/// Check if a process with the given name is running
fn is_process_running(process_name: &str) -> bool {
    Command::new("pgrep")
        .arg("-x")
        .arg(process_name)
        .output()
        .map(|output| !output.stdout.is_empty())
        .unwrap_or(false)
}
