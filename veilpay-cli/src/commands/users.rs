//! Users command - list registered recipient names

use anyhow::{Context, Result};
use colored::Colorize;

use veilpay_core::UserDirectory;

use crate::ui;

pub async fn run(api_url: &str, verbose: bool) -> Result<()> {
    ui::header("Registered Users");

    let client = super::gateway_client(api_url)?;
    let listing = client
        .get_registered_names()
        .await
        .context("Failed to fetch registered names")?;

    if listing.data.is_empty() {
        ui::info("No registered users found");
        return Ok(());
    }

    for user in &listing.data {
        println!("  {}", user.name.bold());
        if verbose {
            if let Some(address) = &user.address {
                ui::key_value("  Address", address);
            }
        }
    }

    ui::separator();
    ui::info(&format!("{} user(s)", listing.data.len()));

    Ok(())
}
