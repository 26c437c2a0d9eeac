//! Discovery entry point tying the host, device service and filesystem together.

use npki_core::{CertificateRecord, DriveInventory, Platform, Result, SavePathGroup};
use std::path::PathBuf;
use tracing::{debug, instrument};

use crate::config::ScanConfig;
use crate::devices::{DeviceLister, SystemDevices};
use crate::fs::{FileSystem, TokioFs};
use crate::host::Host;
use crate::save_paths::{aggregate, external_groups, list_external_groups};
use crate::walker::walk_save_paths;

/// Finds NPKI certificate stores on the primary drive and on USB devices.
///
/// Every call starts from scratch; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct DriveScanner<D = SystemDevices, F = TokioFs> {
    host: Host,
    config: ScanConfig,
    devices: D,
    fs: F,
}

impl DriveScanner {
    /// Scanner for the running host with the system device service and
    /// `tokio::fs`.
    pub fn detect() -> Result<Self> {
        Ok(Self::new(Host::detect()?, SystemDevices, TokioFs))
    }
}

impl<D, F> DriveScanner<D, F>
where
    D: DeviceLister,
    F: FileSystem,
{
    /// Create a scanner with the default configuration
    pub fn new(host: Host, devices: D, fs: F) -> Self {
        Self {
            host,
            config: ScanConfig::default(),
            devices,
            fs,
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    /// Host this scanner resolves paths for
    pub const fn host(&self) -> &Host {
        &self.host
    }

    /// Active configuration
    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Primary store path. `platform` wins over the configured override,
    /// which wins over the host platform.
    pub fn primary_drive_save_path(&self, platform: Option<Platform>) -> PathBuf {
        self.host
            .primary_drive_save_path(platform.or(self.config.platform))
    }

    /// PKCS#11 token configuration file path, same platform precedence as
    /// [`Self::primary_drive_save_path`].
    pub fn security_token_environment_file_path(&self, platform: Option<Platform>) -> PathBuf {
        self.host
            .security_token_environment_file_path(platform.or(self.config.platform))
    }

    /// Save path groups for USB devices only.
    pub async fn external_drive_save_paths(&self) -> Result<Vec<SavePathGroup>> {
        list_external_groups(&self.devices).await
    }

    /// Primary group followed by the USB groups.
    ///
    /// Device enumeration is skipped when `include_external` is off.
    pub async fn drive_save_paths(&self) -> Result<Vec<SavePathGroup>> {
        let external = if self.config.include_external {
            self.external_drive_save_paths().await?
        } else {
            Vec::new()
        };
        Ok(aggregate(self.primary_drive_save_path(None), external))
    }

    /// Every certificate record in every save path.
    pub async fn drive_certificates(&self) -> Result<Vec<CertificateRecord>> {
        Ok(self.inventory().await?.certificates)
    }

    /// Certificates together with the devices they refer to.
    #[instrument(
        skip(self),
        fields(platform = %self.config.platform.unwrap_or(self.host.platform))
    )]
    pub async fn inventory(&self) -> Result<DriveInventory> {
        let devices = if self.config.include_external {
            self.devices.list_devices().await?
        } else {
            Vec::new()
        };

        let groups = aggregate(self.primary_drive_save_path(None), external_groups(&devices));
        debug!(groups = groups.len(), "resolved save paths");

        let certificates =
            walk_save_paths(&self.fs, &groups, self.config.missing_user_dir).await?;

        Ok(DriveInventory {
            devices,
            certificates,
        })
    }
}
