//! The fetch → download → store → apply run.

use std::path::{Path, PathBuf};

use anyhow::Result;
use reqwest::Url;
use serde_json::json;

use crate::bing::{ArchiveQuery, BingClient, ImageInfo};
use crate::common::paths;
use crate::config::BingConfig;
use crate::store::{self, StoreOutcome};
use crate::ui::prelude::*;
use crate::wallpaper::WallpaperSetter;

/// Where images come from
pub trait ImageSource {
    fn image_info(&self, index: u32, market: &str) -> ImageInfo;
    fn image_url(&self, info: &ImageInfo) -> Result<Url>;
    fn download(&self, url: &Url) -> Vec<u8>;
}

impl ImageSource for BingClient {
    fn image_info(&self, index: u32, market: &str) -> ImageInfo {
        self.fetch_image_info(&ArchiveQuery::now(index, market))
    }

    fn image_url(&self, info: &ImageInfo) -> Result<Url> {
        info.image_url(self.base())
    }

    fn download(&self, url: &Url) -> Vec<u8> {
        self.fetch_image(url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub exit_code: i32,
    /// Stored image, when the run got that far
    pub path: Option<PathBuf>,
}

impl RunOutcome {
    fn failed() -> Self {
        Self {
            exit_code: 1,
            path: None,
        }
    }
}

/// Run the whole workflow once.
///
/// Only a missing image or a failed save make the run fail; wallpaper
/// errors are reported and ignored.
pub fn run(
    config: &BingConfig,
    source: &dyn ImageSource,
    setter: Option<&dyn WallpaperSetter>,
) -> RunOutcome {
    let info = source.image_info(config.index, &config.market);
    if !info.has_uri() {
        emit(
            Level::Error,
            "bing.info.missing_uri",
            "No image URI found!",
            None,
        );
        return RunOutcome::failed();
    }
    emit(
        Level::Info,
        "bing.info.found",
        &format!("Today's image: {}", display_title(&info.title)),
        Some(json!({ "uri": info.uri, "title": info.title })),
    );

    let path = match target_path(config, &info.title) {
        Ok(path) => path,
        Err(e) => {
            emit(
                Level::Error,
                "store.path_failed",
                &format!("Could not determine where to save the image: {e:#}"),
                None,
            );
            return RunOutcome::failed();
        }
    };

    if path.exists() {
        emit(
            Level::Info,
            "store.exists",
            &format!("File already exists: {}", path.display()),
            Some(json!({ "path": path.display().to_string() })),
        );
    } else if let Err(code) = fetch_and_store(source, &info, &path) {
        return RunOutcome {
            exit_code: code,
            path: None,
        };
    }

    if config.set_wallpaper {
        match setter {
            Some(setter) => apply(setter, &path),
            None => emit(
                Level::Debug,
                "wallpaper.skipped",
                "No wallpaper backend available",
                None,
            ),
        }
    }

    RunOutcome {
        exit_code: 0,
        path: Some(path),
    }
}

fn display_title(title: &str) -> &str {
    if title.is_empty() { "(untitled)" } else { title }
}

fn target_path(config: &BingConfig, title: &str) -> Result<PathBuf> {
    let dir = paths::absolute(&paths::store_dir(config.store_dir.as_deref())?)?;
    emit(
        Level::Debug,
        "store.dir",
        &format!("Store directory: {}", dir.display()),
        None,
    );
    Ok(store::image_path(&dir, title))
}

fn fetch_and_store(source: &dyn ImageSource, info: &ImageInfo, path: &Path) -> Result<(), i32> {
    let url = source.image_url(info).map_err(|e| {
        emit(
            Level::Error,
            "bing.image.bad_url",
            &format!("Invalid image url: {e:#}"),
            None,
        );
        1
    })?;

    let bytes = source.download(&url);
    if bytes.is_empty() {
        emit(
            Level::Error,
            "bing.image.empty",
            "Downloaded image is empty, nothing to save",
            None,
        );
        return Err(1);
    }

    match store::save_image(&bytes, path) {
        Ok(StoreOutcome::Saved) => {
            emit(
                Level::Success,
                "store.saved",
                &format!("Saved {}", path.display()),
                Some(json!({ "path": path.display().to_string(), "bytes": bytes.len() })),
            );
            Ok(())
        }
        Ok(StoreOutcome::AlreadyExists) => {
            emit(
                Level::Info,
                "store.exists",
                &format!("File already exists: {}", path.display()),
                Some(json!({ "path": path.display().to_string() })),
            );
            Ok(())
        }
        Err(e) => {
            emit(
                Level::Error,
                "store.failed",
                &format!("Failed to save image: {e}"),
                None,
            );
            Err(1)
        }
    }
}

fn apply(setter: &dyn WallpaperSetter, path: &Path) {
    emit(
        Level::Debug,
        "wallpaper.backend",
        &format!("Wallpaper backend: {}", setter.name()),
        None,
    );
    match setter.set(path) {
        Ok(()) => emit(
            Level::Success,
            "wallpaper.set",
            "Wallpaper changed",
            Some(json!({ "path": path.display().to_string() })),
        ),
        Err(e) => emit(
            Level::Warn,
            "wallpaper.failed",
            &format!("Failed to change wallpaper: {e}"),
            None,
        ),
    }
}
