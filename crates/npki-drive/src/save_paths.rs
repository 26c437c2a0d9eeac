//! Candidate store roots: the primary store plus one group per USB device.

use npki_core::{Result, SavePathGroup, StorageDevice};
use std::path::PathBuf;
use tracing::debug;

use crate::devices::DeviceLister;

/// One group per USB device, one `<mount>/NPKI` path per mount point.
///
/// Non-USB devices contribute nothing, not even an empty group. Device and
/// mount point order are preserved.
#[must_use]
pub fn external_groups(devices: &[StorageDevice]) -> Vec<SavePathGroup> {
    devices
        .iter()
        .filter(|device| {
            let external = device.is_external();
            if !external {
                debug!(device = %device.id, "skipping non-USB device");
            }
            external
        })
        .map(SavePathGroup::for_device)
        .collect()
}

/// Ask the device service for devices and derive the external groups.
///
/// A device service failure is returned as is.
pub async fn list_external_groups<D>(devices: &D) -> Result<Vec<SavePathGroup>>
where
    D: DeviceLister + ?Sized,
{
    let devices = devices.list_devices().await?;
    Ok(external_groups(&devices))
}

/// `[primary] ++ external`
#[must_use]
pub fn aggregate(primary: PathBuf, external: Vec<SavePathGroup>) -> Vec<SavePathGroup> {
    let mut groups = Vec::with_capacity(external.len() + 1);
    groups.push(SavePathGroup::primary(primary));
    groups.extend(external);
    groups
}
