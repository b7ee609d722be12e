use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated HOME and config directory for one test
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        std::fs::create_dir_all(temp_dir.path().join("home"))?;
        std::fs::create_dir_all(temp_dir.path().join("config"))?;
        Ok(Self { temp_dir })
    }

    /// Home directory handed to the binary
    pub fn home(&self) -> PathBuf {
        self.temp_dir.path().join("home")
    }

    /// XDG config directory handed to the binary
    pub fn config_home(&self) -> PathBuf {
        self.temp_dir.path().join("config")
    }

    /// Default store directory under the fake home
    pub fn store_dir(&self) -> PathBuf {
        self.home().join("Pictures").join("Bing")
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}
