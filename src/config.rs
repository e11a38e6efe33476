//! Run settings, loaded from an optional TOML file and overridden by flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, ToolError};
use crate::io::default_metadata_entries;
use crate::io::remote::RemoteTarget;
use crate::reconcile::MatchOptions;

/// Settings as written in a config file or supplied on the command line.
/// Every field is optional; later layers win in [`FileConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub local_dir: Option<PathBuf>,
    pub remote_host: Option<String>,
    pub remote_dir: Option<String>,
    pub ssh_port: Option<u16>,
    pub threshold: Option<f64>,
    pub metadata_entries: Option<Vec<String>>,
}

impl FileConfig {
    /// Reads and parses a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::parse(&source)
    }

    pub fn parse(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Overlays `overrides` on top of `self`.
    pub fn merge(self, overrides: FileConfig) -> Self {
        Self {
            local_dir: overrides.local_dir.or(self.local_dir),
            remote_host: overrides.remote_host.or(self.remote_host),
            remote_dir: overrides.remote_dir.or(self.remote_dir),
            ssh_port: overrides.ssh_port.or(self.ssh_port),
            threshold: overrides.threshold.or(self.threshold),
            metadata_entries: overrides.metadata_entries.or(self.metadata_entries),
        }
    }

    /// Validates the merged layers and fills in defaults.
    pub fn into_settings(self) -> Result<Settings> {
        let local_dir = self
            .local_dir
            .ok_or_else(|| ToolError::InvalidConfig("no local directory given".into()))?;
        let host = self
            .remote_host
            .filter(|host| !host.trim().is_empty())
            .ok_or_else(|| ToolError::InvalidConfig("no remote host given".into()))?;
        let dir = self
            .remote_dir
            .filter(|dir| !dir.is_empty())
            .ok_or_else(|| ToolError::InvalidConfig("no remote directory given".into()))?;

        let mut options = MatchOptions::default();
        if let Some(threshold) = self.threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ToolError::InvalidConfig(format!(
                    "threshold {threshold} is outside [0, 1]"
                )));
            }
            options.threshold = threshold;
        }

        let metadata_entries = self.metadata_entries.unwrap_or_else(default_metadata_entries);
        if metadata_entries.is_empty() {
            return Err(ToolError::InvalidConfig(
                "metadata_entries must name at least one entry".into(),
            ));
        }

        Ok(Settings {
            local_dir,
            remote: RemoteTarget {
                host,
                port: self.ssh_port,
                dir,
            },
            options,
            metadata_entries,
        })
    }
}

/// Fully resolved settings for one comparison run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub local_dir: PathBuf,
    pub remote: RemoteTarget,
    pub options: MatchOptions,
    pub metadata_entries: Vec<String>,
}
