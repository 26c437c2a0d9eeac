//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use npki_drive::Platform;

use crate::output::OutputFormat;

/// List NPKI certificates stored on this machine and its USB drives
///
/// Looks in the per-OS store under your home directory and in an NPKI
/// directory at the root of every mounted USB device.
#[derive(Parser, Debug)]
#[command(name = "npki")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Use this platform's store layout (linux, macos, windows)
    #[arg(long, global = true, env = "NPKI_PLATFORM")]
    pub platform: Option<Platform>,

    /// Skip issuers without a USER directory instead of failing
    #[arg(long, global = true)]
    pub skip_missing_user_dirs: bool,

    /// Do not search USB devices
    #[arg(long, global = true)]
    pub no_external: bool,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the directories searched for certificates
    Paths,

    /// List certificates found in the searched directories
    Certs,

    /// Show the PKCS#11 security token configuration file path
    TokenConfig,

    /// Inspect CLI configuration
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
