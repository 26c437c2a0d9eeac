//! `npki paths` - directories searched for certificates.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::output::{print_json, OutputFormat};

pub async fn execute(ctx: Context) -> Result<()> {
    let groups = ctx.scanner()?.drive_save_paths().await?;

    match ctx.output_format {
        OutputFormat::Json => print_json(&groups)?,
        OutputFormat::Pretty => {
            for group in &groups {
                let label = group
                    .device
                    .as_ref()
                    .map_or_else(|| "primary".bold(), |id| id.as_str().cyan().bold());
                println!("{label}");

                if group.paths.is_empty() {
                    println!("  {}", "(not mounted)".dimmed());
                }
                for path in &group.paths {
                    println!("  {}", path.display());
                }
            }
        }
    }

    Ok(())
}
