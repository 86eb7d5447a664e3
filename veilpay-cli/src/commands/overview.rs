//! Overview command - the page the transfer view routes to when the
//! commitment list empties

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use veilpay_core::ClientStorage;

use crate::ui;

const TABS: &[&str] = &["ft", "ft-commitment"];

pub async fn run(storage_dir: &Path, tab: &str, _verbose: bool) -> Result<()> {
    let storage = super::open_storage(storage_dir)?;
    render(&storage, tab)
}

/// Render the overview page with the given tab selected.
pub fn render(storage: &ClientStorage, tab: &str) -> Result<()> {
    ui::header("Overview");

    let tabs = TABS
        .iter()
        .map(|t| {
            if *t == tab {
                format!("[{}]", t).bold().to_string()
            } else {
                t.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    println!("  {}", tabs);
    ui::separator();

    let display = storage.token_display()?;
    if let Some(name) = &display.name {
        ui::key_value("Token", name);
    }
    if let Some(symbol) = &display.symbol {
        ui::key_value("Symbol", symbol);
    }

    if tab == "ft-commitment" {
        let transfers = storage.list_transfers()?;
        if transfers.is_empty() {
            ui::info("No commitment activity yet");
        } else {
            ui::info(&format!("{} transfer(s) recorded", transfers.len()));
            for record in transfers.iter().take(5) {
                ui::key_value(
                    &record.receiver_name,
                    &format!("{} sent, {} change", record.amount, record.change),
                );
            }
        }
    } else {
        ui::info("Nothing to show on this tab yet");
    }

    Ok(())
}
