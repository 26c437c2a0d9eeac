//! Storage devices and the save-path groups derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Directory name of the certificate store under a home directory or a
/// removable drive's mount point.
pub const NPKI_DIR: &str = "NPKI";

/// Identifier of a storage device as reported by the device service,
/// usually its device node (`/dev/sdb`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Create an identifier from the service's device name
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A mounted filesystem on a storage device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountPoint {
    /// Where the filesystem is mounted
    pub path: PathBuf,

    /// Volume label, if the service knows it
    #[serde(default)]
    pub label: Option<String>,
}

impl MountPoint {
    /// Mount point without a label
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            label: None,
        }
    }

    /// Candidate certificate store on this mount point
    #[must_use]
    pub fn save_path(&self) -> PathBuf {
        self.path.join(NPKI_DIR)
    }
}

/// A block storage device reported by the device service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageDevice {
    /// Device identifier
    pub id: DeviceId,

    /// Human-readable model or description
    #[serde(default)]
    pub description: String,

    /// Capacity in bytes (0 if unknown)
    #[serde(default)]
    pub size_bytes: u64,

    /// Attached over USB
    pub is_usb: bool,

    /// Kernel reports removable media
    #[serde(default)]
    pub is_removable: bool,

    /// Mounted filesystems, in the order the service reported them
    #[serde(default)]
    pub mount_points: Vec<MountPoint>,
}

impl StorageDevice {
    /// Device with no mount points and no flags set
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: DeviceId::new(id),
            description: String::new(),
            size_bytes: 0,
            is_usb: false,
            is_removable: false,
            mount_points: Vec::new(),
        }
    }

    /// Set the USB flag
    #[must_use]
    pub fn usb(mut self, is_usb: bool) -> Self {
        self.is_usb = is_usb;
        self
    }

    /// Append a mount point
    #[must_use]
    pub fn mounted_at(mut self, path: impl Into<PathBuf>) -> Self {
        self.mount_points.push(MountPoint::new(path));
        self
    }

    /// Whether this device is searched for a certificate store.
    ///
    /// Only USB-attached devices count, matching what PKI clients write to.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        self.is_usb
    }
}

/// Candidate store roots that share an originating device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavePathGroup {
    /// Originating device, `None` for the primary (internal) store
    pub device: Option<DeviceId>,

    /// Candidate roots, one per mount point for external devices
    pub paths: Vec<PathBuf>,
}

impl SavePathGroup {
    /// Group for the primary store on internal storage
    pub fn primary(path: impl Into<PathBuf>) -> Self {
        Self {
            device: None,
            paths: vec![path.into()],
        }
    }

    /// Group for an external device: one `<mount>/NPKI` path per mount point
    #[must_use]
    pub fn for_device(device: &StorageDevice) -> Self {
        Self {
            device: Some(device.id.clone()),
            paths: device
                .mount_points
                .iter()
                .map(MountPoint::save_path)
                .collect(),
        }
    }

    /// Returns true for the group without an originating device
    #[must_use]
    pub const fn is_primary(&self) -> bool {
        self.device.is_none()
    }
}
