//! `npki config` - CLI configuration.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::{print_json, OutputFormat};

pub fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Path => show_path(),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    match ctx.output_format {
        OutputFormat::Json => print_json(config)?,
        OutputFormat::Pretty => {
            println!("{}", "Current Configuration:".bold());
            println!();

            let unset = || "(not set)".dimmed().to_string();
            println!(
                "  {} {}",
                "output_format:".bold(),
                config.output_format.map_or_else(unset, |f| f.to_string())
            );
            println!(
                "  {} {}",
                "platform:".bold(),
                config.platform.map_or_else(unset, |p| p.to_string())
            );
            println!(
                "  {} {}",
                "skip_missing_user_dirs:".bold(),
                config.skip_missing_user_dirs
            );
            println!("  {} {}", "no_external:".bold(), config.no_external);
        }
    }

    Ok(())
}

fn show_path() -> Result<()> {
    println!("{}", Config::path()?.display());
    Ok(())
}
