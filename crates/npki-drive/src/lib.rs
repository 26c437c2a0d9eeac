//! # npki-drive
//!
//! Locate NPKI certificate stores on the local machine.
//!
//! PKI clients keep certificates in a fixed layout under an `NPKI`
//! directory, either in the user's home directory or at the root of a USB
//! stick:
//!
//! ```text
//! <save path>/<issuer>/USER/<subject DN>/signCert.der
//!                                       /signPri.key
//!                                       /kmCert.der
//!                                       /kmPri.key
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! primary_drive_save_path()      external_drive_save_paths()
//!   home + per-OS suffix           USB devices -> <mount>/NPKI
//!            \                      /
//!             drive_save_paths()  [primary] ++ [external]
//!                     |
//!             drive_certificates()  stat, list issuers, list USER
//! ```
//!
//! Key material paths are computed by convention and never opened.
//!
//! # Example
//!
//! ```rust,ignore
//! let scanner = npki_drive::DriveScanner::detect()?;
//! for cert in scanner.drive_certificates().await? {
//!     println!("{} / {}", cert.issuer_id, cert.distinguished_name);
//! }
//! ```

pub mod config;
pub mod devices;
pub mod fs;
pub mod host;
pub mod save_paths;
pub mod scanner;
pub mod walker;

pub use config::{MissingUserDirPolicy, ScanConfig};
pub use devices::{DeviceLister, StaticDevices, SystemDevices};
pub use fs::{DirEntry, FileStat, FileSystem, TokioFs};
pub use host::Host;
pub use npki_core::*;
pub use scanner::DriveScanner;

use std::path::PathBuf;

/// Primary store path on this host for `platform` (default: the host's).
pub fn primary_drive_save_path(platform: Option<Platform>) -> Result<PathBuf> {
    Ok(Host::detect()?.primary_drive_save_path(platform))
}

/// Save path groups for the host's USB devices.
pub async fn external_drive_save_paths() -> Result<Vec<SavePathGroup>> {
    save_paths::list_external_groups(&SystemDevices).await
}

/// Primary store followed by the host's USB stores.
pub async fn drive_save_paths() -> Result<Vec<SavePathGroup>> {
    DriveScanner::detect()?.drive_save_paths().await
}

/// PKCS#11 token configuration file path for `platform`.
pub fn security_token_environment_file_path(platform: Option<Platform>) -> Result<PathBuf> {
    Ok(Host::detect()?.security_token_environment_file_path(platform))
}

/// Every certificate on this host's primary drive and USB devices.
pub async fn drive_certificates() -> Result<Vec<CertificateRecord>> {
    DriveScanner::detect()?.drive_certificates().await
}
