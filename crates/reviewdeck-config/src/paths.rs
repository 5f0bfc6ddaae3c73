use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base path override for containerized deployments.
pub fn container_base_path() -> Option<PathBuf> {
    std::env::var("REVIEWDECK_BASE_PATH").map(PathBuf::from).ok()
}

pub struct PathManager {
    config_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        if let Some(base) = container_base_path() {
            return Ok(Self { config_dir: base });
        }
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("reviewdeck");
        Ok(Self { config_dir: base_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }
}
