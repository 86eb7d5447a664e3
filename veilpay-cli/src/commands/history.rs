//! History command - show recorded transfers

use std::path::Path;

use anyhow::{anyhow, Result};
use colored::Colorize;

use crate::ui;

fn format_timestamp(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

pub async fn run(storage_dir: &Path, _verbose: bool) -> Result<()> {
    ui::header("Transfer History");

    let storage = super::open_storage(storage_dir)?;
    let transfers = storage.list_transfers()?;

    if transfers.is_empty() {
        ui::info("No transfers recorded");
        ui::info("Use 'veilpay-demo transfer' to send commitments");
        return Ok(());
    }

    for record in transfers {
        println!("\n{}", record.id.bold());
        ui::key_value("  To", &record.receiver_name);
        ui::key_value("  Amount", &record.amount.to_string());
        ui::key_value("  Change", &record.change.to_string());
        ui::key_value("  When", &format_timestamp(record.timestamp));
    }

    Ok(())
}

pub async fn show(storage_dir: &Path, id: &str, _verbose: bool) -> Result<()> {
    ui::header(&format!("Transfer: {}", id));

    let storage = super::open_storage(storage_dir)?;
    let record = storage
        .get_transfer(id)?
        .ok_or_else(|| anyhow!("Transfer '{}' not found", id))?;

    ui::key_value("To", &record.receiver_name);
    ui::key_value("Amount", &record.amount.to_string());
    ui::key_value("Change", &record.change.to_string());
    ui::key_value("When", &format_timestamp(record.timestamp));
    for hash in &record.consumed {
        ui::key_value("Consumed", &super::short_hash(hash));
    }

    Ok(())
}
