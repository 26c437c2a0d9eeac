//! Storage device enumeration.

#[cfg(target_os = "linux")]
mod linux;

use async_trait::async_trait;
use npki_core::{Result, StorageDevice};

#[cfg(target_os = "linux")]
pub use linux::{PROC_MOUNTS, SYS_BLOCK};

/// Source of the host's storage devices and their mount points
#[async_trait]
pub trait DeviceLister: Send + Sync {
    /// List every block device, in a stable order
    async fn list_devices(&self) -> Result<Vec<StorageDevice>>;
}

/// Devices of the running host.
///
/// On Linux this reads `/sys/block` and `/proc/mounts`. Other platforms
/// report no devices, so only the primary store is searched there.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDevices;

#[async_trait]
impl DeviceLister for SystemDevices {
    #[cfg(target_os = "linux")]
    async fn list_devices(&self) -> Result<Vec<StorageDevice>> {
        use std::path::Path;

        linux::list_devices(Path::new(SYS_BLOCK), Path::new(PROC_MOUNTS)).await
    }

    #[cfg(not(target_os = "linux"))]
    async fn list_devices(&self) -> Result<Vec<StorageDevice>> {
        tracing::debug!("device enumeration not supported on this platform");
        Ok(Vec::new())
    }
}

/// A fixed device list, for callers that enumerate devices themselves
#[derive(Debug, Clone, Default)]
pub struct StaticDevices(pub Vec<StorageDevice>);

#[async_trait]
impl DeviceLister for StaticDevices {
    async fn list_devices(&self) -> Result<Vec<StorageDevice>> {
        Ok(self.0.clone())
    }
}
