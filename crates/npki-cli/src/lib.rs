//! # npki-cli
//!
//! Command-line front end for `npki-drive`.
//!
//! - **paths**: candidate store roots on the primary drive and USB devices
//! - **certs**: certificates found under those roots
//! - **token-config**: PKCS#11 token configuration file location
//! - **config**: show the CLI configuration

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;

pub use cli::run;
