//! `npki certs` - certificates found on the primary drive and USB devices.

use anyhow::Result;
use colored::Colorize;
use npki_drive::{CertificateRecord, DriveInventory, KeyFile};

use super::Context;
use crate::output::{print_json, OutputFormat};

pub async fn execute(ctx: Context) -> Result<()> {
    let inventory = ctx.scanner()?.inventory().await?;

    match ctx.output_format {
        OutputFormat::Json => print_json(&inventory)?,
        OutputFormat::Pretty => print_pretty(&inventory),
    }

    Ok(())
}

fn print_pretty(inventory: &DriveInventory) {
    if inventory.is_empty() {
        println!("{}", "No certificates found.".dimmed());
        return;
    }

    for record in &inventory.certificates {
        println!(
            "{}  [{}]",
            record.distinguished_name.bold(),
            record.issuer_id.yellow()
        );
        println!("  {:<7} {}", "store", record.save_path.display());
        if let Some(location) = device_label(inventory, record) {
            println!("  {:<7} {}", "device", location.cyan());
        }
        println!(
            "  {:<7} {}",
            "sign",
            key_pair(record, KeyFile::SignCert, KeyFile::SignPrivateKey)
        );
        println!(
            "  {:<7} {}",
            "km",
            key_pair(record, KeyFile::KmCert, KeyFile::KmPrivateKey)
        );
        println!();
    }

    println!("{} certificate(s)", inventory.len().to_string().bold());
}

fn device_label(inventory: &DriveInventory, record: &CertificateRecord) -> Option<String> {
    let id = record.device.as_ref()?;
    let label = match inventory.device_of(record) {
        Some(device) if !device.description.is_empty() => {
            format!("{id} ({})", device.description)
        }
        _ => id.to_string(),
    };
    Some(label)
}

fn key_pair(record: &CertificateRecord, public: KeyFile, private: KeyFile) -> String {
    [public, private]
        .into_iter()
        .filter_map(|file| record.key_path(file))
        .map(|p| p.as_path().display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
