//! Certificate inventory records.

use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::device::{DeviceId, StorageDevice};

/// Subdirectory of an issuer directory holding per-subject certificates.
pub const USER_DIR: &str = "USER";

/// A path computed by naming convention, not checked to exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathCandidate(PathBuf);

impl PathCandidate {
    /// Wrap a computed path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Borrow the candidate path
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Take the candidate path
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for PathCandidate {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Well-known key material files inside a subject directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFile {
    /// Signing certificate (public key)
    SignCert,
    /// Signing private key
    SignPrivateKey,
    /// Key-distribution certificate (public key)
    KmCert,
    /// Key-distribution private key
    KmPrivateKey,
}

impl KeyFile {
    /// Every key file, in record field order
    pub const ALL: [Self; 4] = [
        Self::SignCert,
        Self::SignPrivateKey,
        Self::KmCert,
        Self::KmPrivateKey,
    ];

    /// File name on disk. Matched exactly, case included.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::SignCert => "signCert.der",
            Self::SignPrivateKey => "signPri.key",
            Self::KmCert => "kmCert.der",
            Self::KmPrivateKey => "kmPri.key",
        }
    }

    /// Candidate path of this file under a subject directory
    #[must_use]
    pub fn candidate_in(self, subject_dir: &Path) -> PathCandidate {
        PathCandidate::new(subject_dir.join(self.file_name()))
    }
}

/// One subject directory found under `<save path>/<issuer>/USER/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRecord {
    /// Device the save path lives on, `None` for the primary store
    pub device: Option<DeviceId>,

    /// Store root this record was found under
    pub save_path: PathBuf,

    /// Issuer directory name
    pub issuer_id: String,

    /// Subject directory name
    pub distinguished_name: String,

    /// `signCert.der`
    pub sign_public_key_path: Option<PathCandidate>,

    /// `signPri.key`
    pub sign_private_key_path: Option<PathCandidate>,

    /// `kmCert.der`
    pub key_distribution_public_key_path: Option<PathCandidate>,

    /// `kmPri.key`
    pub key_distribution_private_key_path: Option<PathCandidate>,
}

impl CertificateRecord {
    /// Build a record for `save_path/issuer/USER/subject`, deriving the four
    /// key material paths from their fixed file names.
    ///
    /// The directory names are kept as given. Non-UTF-8 names are stored
    /// lossily in the string fields, the derived paths use the raw names.
    pub fn new(
        device: Option<DeviceId>,
        save_path: impl Into<PathBuf>,
        issuer: impl AsRef<OsStr>,
        subject: impl AsRef<OsStr>,
    ) -> Self {
        let save_path = save_path.into();
        let (issuer, subject) = (issuer.as_ref(), subject.as_ref());
        let dir = save_path.join(issuer).join(USER_DIR).join(subject);

        Self {
            device,
            issuer_id: issuer.to_string_lossy().into_owned(),
            distinguished_name: subject.to_string_lossy().into_owned(),
            sign_public_key_path: Some(KeyFile::SignCert.candidate_in(&dir)),
            sign_private_key_path: Some(KeyFile::SignPrivateKey.candidate_in(&dir)),
            key_distribution_public_key_path: Some(KeyFile::KmCert.candidate_in(&dir)),
            key_distribution_private_key_path: Some(KeyFile::KmPrivateKey.candidate_in(&dir)),
            save_path,
        }
    }

    /// Directory holding this subject's key material.
    ///
    /// Taken from the key paths, which keep non-UTF-8 names intact. Falls
    /// back to the string fields when no key path is set.
    #[must_use]
    pub fn subject_dir(&self) -> PathBuf {
        KeyFile::ALL
            .into_iter()
            .find_map(|file| self.key_path(file)?.as_path().parent())
            .map_or_else(
                || {
                    self.save_path
                        .join(&self.issuer_id)
                        .join(USER_DIR)
                        .join(&self.distinguished_name)
                },
                Path::to_path_buf,
            )
    }

    /// Candidate path for one key file, if set
    #[must_use]
    pub const fn key_path(&self, file: KeyFile) -> Option<&PathCandidate> {
        match file {
            KeyFile::SignCert => self.sign_public_key_path.as_ref(),
            KeyFile::SignPrivateKey => self.sign_private_key_path.as_ref(),
            KeyFile::KmCert => self.key_distribution_public_key_path.as_ref(),
            KeyFile::KmPrivateKey => self.key_distribution_private_key_path.as_ref(),
        }
    }

    /// Returns true if the record was found on an external device
    #[must_use]
    pub const fn is_external(&self) -> bool {
        self.device.is_some()
    }
}

/// Full result of one discovery pass: the devices that were enumerated and
/// the records found, which refer back to them by [`DeviceId`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveInventory {
    /// Devices reported by the device service
    pub devices: Vec<StorageDevice>,

    /// Records in save path, issuer, subject order
    pub certificates: Vec<CertificateRecord>,
}

impl DriveInventory {
    /// Resolve a record's device back-reference
    #[must_use]
    pub fn device_of(&self, record: &CertificateRecord) -> Option<&StorageDevice> {
        let id = record.device.as_ref()?;
        self.devices.iter().find(|d| &d.id == id)
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    /// Returns true if no certificates were found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_derives_key_paths() {
        let record = CertificateRecord::new(None, "/home/me/NPKI", "yessign", "cn=Alice,o=Bank");
        let dir = Path::new("/home/me/NPKI/yessign/USER/cn=Alice,o=Bank");

        assert_eq!(record.subject_dir(), dir);
        for file in KeyFile::ALL {
            let path = record.key_path(file).unwrap();
            assert_eq!(path.as_path(), dir.join(file.file_name()));
        }
        assert!(!record.is_external());
    }

    #[cfg(unix)]
    #[test]
    fn test_subject_dir_keeps_non_utf8_names() {
        use std::os::unix::ffi::OsStrExt;

        let subject = OsStr::from_bytes(b"cn=\xff");
        let record = CertificateRecord::new(None, "/n", "i", subject);
        let dir = Path::new("/n/i/USER").join(subject);

        assert_eq!(record.subject_dir(), dir);
        assert_eq!(
            record.sign_public_key_path.as_ref().unwrap().as_path().parent(),
            Some(dir.as_path())
        );
        assert_eq!(record.distinguished_name, "cn=\u{fffd}");
    }

    #[test]
    fn test_subject_dir_without_key_paths() {
        let mut record = CertificateRecord::new(None, "/n", "i", "cn=Eve");
        record.sign_public_key_path = None;
        assert_eq!(record.subject_dir(), Path::new("/n/i/USER/cn=Eve"));

        record.sign_private_key_path = None;
        record.key_distribution_public_key_path = None;
        record.key_distribution_private_key_path = None;
        assert_eq!(record.subject_dir(), Path::new("/n/i/USER/cn=Eve"));
    }

    #[test]
    fn test_names_are_kept_verbatim() {
        let record = CertificateRecord::new(None, "/x", "YesSign", "CN=Bob");
        assert_eq!(record.issuer_id, "YesSign");
        assert_eq!(record.distinguished_name, "CN=Bob");
        assert!(record
            .sign_private_key_path
            .unwrap()
            .as_path()
            .ends_with("signPri.key"));
    }

    #[test]
    fn test_inventory_resolves_device() {
        let usb = StorageDevice::new("/dev/sdb").usb(true).mounted_at("/media/k");
        let record = CertificateRecord::new(
            Some(usb.id.clone()),
            "/media/k/NPKI",
            "signkorea",
            "cn=Carol",
        );
        let primary = CertificateRecord::new(None, "/home/me/NPKI", "yessign", "cn=Dan");
        let inventory = DriveInventory {
            devices: vec![usb.clone()],
            certificates: vec![record.clone(), primary.clone()],
        };

        assert_eq!(inventory.device_of(&record), Some(&usb));
        assert_eq!(inventory.device_of(&primary), None);
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_record_serializes_paths_as_strings() {
        let record = CertificateRecord::new(None, "/n", "i", "s");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["sign_public_key_path"], "/n/i/USER/s/signCert.der");
        assert!(json["device"].is_null());
    }
}
