use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for NPKI discovery operations
pub type Result<T> = std::result::Result<T, NpkiError>;

/// Errors that can occur while locating NPKI certificate stores
#[derive(Error, Debug)]
pub enum NpkiError {
    /// The user's home directory could not be resolved
    #[error("could not determine the home directory")]
    HomeDirUnavailable,

    /// The storage device service failed to enumerate devices
    #[error("device enumeration failed: {reason}")]
    DeviceList {
        /// What went wrong
        reason: String,
    },

    /// A filesystem query failed
    #[error("I/O error at {}: {}", path.display(), source)]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Unknown platform identifier
    #[error("invalid platform: {0} (expected linux, macos or windows)")]
    InvalidPlatform(String),
}

impl NpkiError {
    /// Wrap an I/O error with the path it happened at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a device enumeration error.
    pub fn device_list(reason: impl Into<String>) -> Self {
        Self::DeviceList {
            reason: reason.into(),
        }
    }

    /// Returns true if the error reports a missing path
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display_includes_path() {
        let err = NpkiError::io(
            "/media/usb/NPKI/yessign/USER",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(err.to_string().contains("/media/usb/NPKI/yessign/USER"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_permission_denied_is_not_not_found() {
        let err = NpkiError::io(
            "/root/NPKI",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(!err.is_not_found());
        assert!(!NpkiError::HomeDirUnavailable.is_not_found());
    }
}
