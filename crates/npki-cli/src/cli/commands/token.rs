//! `npki token-config` - PKCS#11 token configuration file location.

use anyhow::Result;

use super::Context;
use crate::output::{print_json, OutputFormat};

pub fn execute(ctx: Context) -> Result<()> {
    let path = ctx.scanner()?.security_token_environment_file_path(None);

    match ctx.output_format {
        OutputFormat::Json => print_json(&serde_json::json!({ "path": path }))?,
        OutputFormat::Pretty => println!("{}", path.display()),
    }

    Ok(())
}
