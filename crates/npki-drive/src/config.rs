//! Scan configuration types.

use npki_core::Platform;
use serde::{Deserialize, Serialize};

/// What to do when an issuer directory has no readable `USER` subdirectory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingUserDirPolicy {
    /// Fail the whole scan with the listing error
    #[default]
    Abort,
    /// Log a warning and continue with the next issuer
    Skip,
}

/// Options for a discovery pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Platform override for the primary store path
    pub platform: Option<Platform>,

    /// Search USB devices as well as the primary store
    pub include_external: bool,

    /// Handling of issuer directories without `USER`
    pub missing_user_dir: MissingUserDirPolicy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanConfig {
    /// Default configuration: host platform, external devices included,
    /// abort on a missing `USER` directory
    #[must_use]
    pub const fn new() -> Self {
        Self {
            platform: None,
            include_external: true,
            missing_user_dir: MissingUserDirPolicy::Abort,
        }
    }

    /// Override the platform
    #[must_use]
    pub const fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Enable or disable the removable device search
    #[must_use]
    pub const fn include_external(mut self, include: bool) -> Self {
        self.include_external = include;
        self
    }

    /// Set the missing `USER` directory policy
    #[must_use]
    pub const fn missing_user_dir(mut self, policy: MissingUserDirPolicy) -> Self {
        self.missing_user_dir = policy;
        self
    }
}
