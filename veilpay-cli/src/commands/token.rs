//! Token command - manage cached token display strings
//!
//! The transfer screen reads the token name and symbol from storage
//! rather than asking the gateway on every render; this command seeds
//! and inspects that cache.

use std::path::Path;

use anyhow::Result;
use veilpay_core::TokenDisplay;

use crate::ui;

pub async fn set(
    storage_dir: &Path,
    name: Option<&str>,
    symbol: Option<&str>,
    verbose: bool,
) -> Result<()> {
    let storage = super::open_storage(storage_dir)?;

    let mut display = storage.token_display()?;
    if let Some(name) = name {
        display.name = Some(name.to_string());
    }
    if let Some(symbol) = symbol {
        display.symbol = Some(symbol.to_string());
    }
    storage.set_token_display(display)?;

    if verbose {
        ui::info("Token display cache updated");
    }
    ui::success("Token info saved");

    Ok(())
}

pub async fn show(storage_dir: &Path, _verbose: bool) -> Result<()> {
    ui::header("Token");

    let storage = super::open_storage(storage_dir)?;
    let display = storage.token_display()?;

    match (&display.name, &display.symbol) {
        (None, None) => {
            ui::info("No token info cached");
            ui::info("Use 'veilpay-demo token set --name NAME --symbol SYMBOL'");
        }
        _ => {
            ui::key_value("Name", display.name.as_deref().unwrap_or("-"));
            ui::key_value("Symbol", display.symbol.as_deref().unwrap_or("-"));
        }
    }

    Ok(())
}
