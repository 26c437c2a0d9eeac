//! npki - list NPKI certificates on this machine and its USB drives.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    npki_cli::run().await
}
