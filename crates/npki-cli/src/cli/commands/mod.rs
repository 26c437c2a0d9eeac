//! Command implementations.

pub mod certs;
pub mod config;
pub mod paths;
pub mod token;

use npki_drive::{DriveScanner, ScanConfig};

use crate::config::Config;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format
    pub output_format: OutputFormat,

    /// Effective scan options (config file plus flags)
    pub scan: ScanConfig,

    /// Configuration as loaded from disk
    pub config: Config,
}

impl Context {
    /// Scanner for this host with the effective options.
    pub fn scanner(&self) -> anyhow::Result<DriveScanner> {
        Ok(DriveScanner::detect()?.with_config(self.scan))
    }
}
