//! Configuration management.

use anyhow::Result;
use directories::ProjectDirs;
use npki_drive::{MissingUserDirPolicy, Platform, ScanConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Platform whose store layout to use instead of the host's.
    pub platform: Option<Platform>,

    /// Keep scanning when an issuer has no USER directory.
    #[serde(default)]
    pub skip_missing_user_dirs: bool,

    /// Search the home directory only.
    #[serde(default)]
    pub no_external: bool,
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("rs", "npki", "npki")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from a file; a missing file gives the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;

        Ok(config)
    }

    /// Scan options this file asks for.
    pub fn scan_config(&self) -> ScanConfig {
        let mut scan = ScanConfig::new().include_external(!self.no_external);
        if let Some(platform) = self.platform {
            scan = scan.platform(platform);
        }
        if self.skip_missing_user_dirs {
            scan = scan.missing_user_dir(MissingUserDirPolicy::Skip);
        }
        scan
    }
}
