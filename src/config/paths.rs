//! Filesystem locations used by asmago.

use std::path::{Path, PathBuf};

use crate::error::{AsmagoError, Result};

/// Application directory name under the platform data/config roots.
pub const APP_DIR: &str = "asmago";

/// Where asmago reads configuration and keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// Mutable data: shortcuts and usage counters.
    pub data_dir: PathBuf,

    /// Read-only configuration: the database target catalogue.
    pub config_dir: PathBuf,

    /// The AWS CLI config file listing profiles.
    pub aws_config: PathBuf,
}

impl AppPaths {
    /// Resolve paths from overrides, falling back to platform defaults.
    ///
    /// - data: `~/.local/share/asmago`
    /// - config: `<platform config dir>/asmago`
    /// - AWS config: `$AWS_CONFIG_FILE`, else `~/.aws/config`
    pub fn resolve(data_dir: Option<PathBuf>, config_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => home_dir()?.join(".local").join("share").join(APP_DIR),
        };

        let config_dir = match config_dir {
            Some(dir) => dir,
            None => dirs::config_dir()
                .ok_or_else(|| anyhow::anyhow!("could not find user config directory"))?
                .join(APP_DIR),
        };

        let aws_config = match std::env::var_os("AWS_CONFIG_FILE") {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => home_dir()?.join(".aws").join("config"),
        };

        Ok(Self {
            data_dir,
            config_dir,
            aws_config,
        })
    }

    /// Paths rooted under a single directory (for tests).
    pub fn under(root: &Path) -> Self {
        Self {
            data_dir: root.join("data"),
            config_dir: root.join("config"),
            aws_config: root.join("aws").join("config"),
        }
    }

    /// Path of a file in the data directory.
    pub fn data_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    /// Path of a file in the config directory.
    pub fn config_file(&self, name: &str) -> PathBuf {
        self.config_dir.join(name)
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        AsmagoError::Other(anyhow::anyhow!("could not find user home directory"))
    })
}
