use crate::logging::DEFAULT_LOG_LEVEL;
use crate::persistence::get_data_dir;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Runtime settings resolved from flags and the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one JSON file per storage key
    pub data_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    /// An explicit `data_dir` wins; otherwise a local .taskflow, then ~/.taskflow
    pub fn resolve(data_dir: Option<PathBuf>, log_level: Option<String>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => get_data_dir()?,
        };

        Ok(Self {
            data_dir,
            log_level: log_level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
