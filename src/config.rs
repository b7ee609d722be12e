use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::common::paths;

pub const DEFAULT_BASE_URL: &str = "https://cn.bing.com/";
pub const DEFAULT_MARKET: &str = "zh-CN";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_market() -> String {
    DEFAULT_MARKET.to_string()
}

fn default_set_wallpaper() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BingConfig {
    /// Origin of the image service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Market (locale) passed as `mkt`
    #[serde(default = "default_market")]
    pub market: String,
    /// Day index, 0 is today
    #[serde(default)]
    pub index: u32,
    /// Where images are stored; `<home>/Pictures/Bing` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<String>,
    /// Apply the image as wallpaper after storing it
    #[serde(default = "default_set_wallpaper")]
    pub set_wallpaper: bool,
}

impl Default for BingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            market: default_market(),
            index: 0,
            store_dir: None,
            set_wallpaper: default_set_wallpaper(),
        }
    }
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub market: Option<String>,
    pub index: Option<u32>,
    pub store_dir: Option<String>,
    pub no_set: bool,
}

impl BingConfig {
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(paths::bingwall_config_dir()?.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(cfg_path: &Path) -> Result<Self> {
        if !cfg_path.exists() {
            return Ok(Self::default());
        }

        let s = fs::read_to_string(cfg_path)
            .with_context(|| format!("reading config {}", cfg_path.display()))?;
        toml::from_str(&s).with_context(|| format!("parsing config {}", cfg_path.display()))
    }

    pub fn save_to(&self, cfg_path: &Path) -> Result<()> {
        if let Some(parent) = cfg_path.parent() {
            fs::create_dir_all(parent).context("creating config directory")?;
        }

        fs::write(cfg_path, self.to_toml()?).context("writing config file")?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serializing config to toml")
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url;
        }
        if let Some(market) = overrides.market {
            self.market = market;
        }
        if let Some(index) = overrides.index {
            self.index = index;
        }
        if overrides.store_dir.is_some() {
            self.store_dir = overrides.store_dir;
        }
        if overrides.no_set {
            self.set_wallpaper = false;
        }
        self
    }
}
