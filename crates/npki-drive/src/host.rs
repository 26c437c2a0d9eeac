//! Host environment and the fixed per-platform paths derived from it.

use directories::BaseDirs;
use npki_core::{NpkiError, Platform, Result, NPKI_DIR};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Windows install directory when neither `SYSTEMROOT` nor `WINDIR` is set.
pub const DEFAULT_SYSTEM_ROOT: &str = "C:\\Windows";

/// PKCS#11 token configuration file name.
pub const TOKEN_CONFIG_FILE: &str = "npki_pkcs11.cnf";

/// Snapshot of what the path resolvers need from the running host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    /// Platform used when the caller does not name one
    pub platform: Platform,

    /// The user's home directory
    pub home_dir: PathBuf,

    /// `SYSTEMROOT`
    pub system_root: Option<OsString>,

    /// `WINDIR`
    pub windir: Option<OsString>,
}

impl Host {
    /// Host with the given platform and home directory and no Windows
    /// environment variables.
    pub fn new(platform: Platform, home_dir: impl Into<PathBuf>) -> Self {
        Self {
            platform,
            home_dir: home_dir.into(),
            system_root: None,
            windir: None,
        }
    }

    /// Read the running host's platform, home directory and environment.
    pub fn detect() -> Result<Self> {
        let home_dir = BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .ok_or(NpkiError::HomeDirUnavailable)?;

        Ok(Self {
            platform: Platform::current(),
            home_dir,
            system_root: std::env::var_os("SYSTEMROOT"),
            windir: std::env::var_os("WINDIR"),
        })
    }

    /// Primary certificate store on internal storage.
    #[must_use]
    pub fn primary_drive_save_path(&self, platform: Option<Platform>) -> PathBuf {
        primary_save_path_for(&self.home_dir, platform.unwrap_or(self.platform))
    }

    /// PKCS#11 security token configuration file.
    #[must_use]
    pub fn security_token_environment_file_path(&self, platform: Option<Platform>) -> PathBuf {
        token_config_path_for(
            platform.unwrap_or(self.platform),
            &self.home_dir,
            self.system_root.as_deref(),
            self.windir.as_deref(),
        )
    }
}

/// Store location relative to the home directory, in the platform's own
/// separator convention.
#[must_use]
pub const fn primary_relative_path(platform: Platform) -> &'static str {
    match platform {
        Platform::Windows => "AppData\\LocalLow\\NPKI",
        Platform::MacOs => "Library/Preferences/NPKI",
        Platform::Linux => NPKI_DIR,
    }
}

/// `home/<platform relative path>`
#[must_use]
pub fn primary_save_path_for(home: &Path, platform: Platform) -> PathBuf {
    home.join(primary_relative_path(platform))
}

/// Windows: `<SYSTEMROOT | WINDIR | C:\Windows>\System32\npki_pkcs11.cnf`.
/// Elsewhere: `~/.npki_pkcs11.cnf`.
#[must_use]
pub fn token_config_path_for(
    platform: Platform,
    home: &Path,
    system_root: Option<&OsStr>,
    windir: Option<&OsStr>,
) -> PathBuf {
    match platform {
        Platform::Windows => {
            let root = system_root
                .or(windir)
                .map_or_else(|| PathBuf::from(DEFAULT_SYSTEM_ROOT), PathBuf::from);
            root.join("System32").join(TOKEN_CONFIG_FILE)
        }
        Platform::MacOs | Platform::Linux => home.join(format!(".{TOKEN_CONFIG_FILE}")),
    }
}
