use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NpkiError;

/// Operating system family, which decides where the primary store lives
/// and how its relative path is spelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Linux and any other unrecognised OS
    #[default]
    Linux,
    /// macOS (Darwin)
    #[serde(alias = "darwin")]
    MacOs,
    /// Windows NT
    Windows,
}

impl Platform {
    /// Platform of the running host, decided from the compile target.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }

    /// Returns true for Windows
    #[must_use]
    pub const fn is_windows(self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl FromStr for Platform {
    type Err = NpkiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linux" => Ok(Self::Linux),
            "macos" | "darwin" => Ok(Self::MacOs),
            "windows" | "windows nt" => Ok(Self::Windows),
            _ => Err(NpkiError::InvalidPlatform(s.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
        }
    }
}
