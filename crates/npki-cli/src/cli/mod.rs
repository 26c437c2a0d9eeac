//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use npki_drive::MissingUserDirPolicy;

use crate::config::Config;
use crate::logging::init_logging;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = Config::load()?;

    // Flags override the config file
    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Pretty);

    let mut scan = config.scan_config();
    if let Some(platform) = cli.platform {
        scan = scan.platform(platform);
    }
    if cli.skip_missing_user_dirs {
        scan = scan.missing_user_dir(MissingUserDirPolicy::Skip);
    }
    if cli.no_external {
        scan = scan.include_external(false);
    }

    tracing::debug!(?scan, %output_format, "effective options");

    let ctx = commands::Context {
        output_format,
        scan,
        config,
    };

    match cli.command {
        Commands::Paths => commands::paths::execute(ctx).await,
        Commands::Certs => commands::certs::execute(ctx).await,
        Commands::TokenConfig => commands::token::execute(ctx),
        Commands::Config(args) => commands::config::execute(ctx, args),
    }
}
