//! Core types for NPKI certificate store discovery.
//!
//! This crate provides the foundational types shared by the discovery
//! library and the CLI:
//!
//! - **Types**: platforms, storage devices, save-path groups and
//!   certificate records
//! - **Errors**: one error enum, [`NpkiError`], for every fallible operation
//!
//! Nothing in here touches the filesystem.
//!
//! # Example
//!
//! ```rust
//! use npki_core::{CertificateRecord, KeyFile, Platform};
//!
//! let record = CertificateRecord::new(None, "/home/me/NPKI", "yessign", "cn=Me");
//! assert_eq!(record.issuer_id, "yessign");
//! assert!(record
//!     .sign_public_key_path
//!     .as_ref()
//!     .is_some_and(|p| p.as_path().ends_with(KeyFile::SignCert.file_name())));
//! # let _ = Platform::current();
//! ```

mod error;
pub mod types;

pub use error::{NpkiError, Result};
pub use types::*;
