//! Commitments command - list token commitments

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;

use veilpay_core::view::matches_search;
use veilpay_core::TransferView;

use crate::ui;
use crate::ui::{TerminalNotifier, TerminalRouter};

pub async fn run(
    storage_dir: &Path,
    api_url: &str,
    search: Option<&str>,
    verbose: bool,
) -> Result<()> {
    ui::header("Token Commitments");

    let storage = super::open_storage(storage_dir)?;
    let client = super::gateway_client(api_url)?;
    let (mut view, _events) = TransferView::new(
        client.clone(),
        client,
        Arc::new(TerminalNotifier),
        Arc::new(TerminalRouter::new()),
    );

    view.initialize(&storage).await;
    view.teardown();

    if view.commitments().is_empty() {
        ui::info("No commitments found");
        return Ok(());
    }

    let symbol = view.token_symbol.clone().unwrap_or_default();
    let mut shown = 0;
    for commitment in view.commitments() {
        if let Some(term) = search {
            if !matches_search(term, Some(commitment)) {
                continue;
            }
        }
        shown += 1;

        let value = commitment
            .numeric_value()
            .map(|v| v.to_string())
            .unwrap_or_else(|| commitment.value.clone());
        println!("\n{}", format!("#{}  {} {}", commitment.id, value, symbol).bold());
        ui::key_value("  Commitment", &super::short_hash(&commitment.commitment));
        if verbose {
            ui::key_value("  Salt", &super::short_hash(&commitment.salt));
            ui::key_value("  Owner", &commitment.owner);
        }
    }

    if shown == 0 {
        ui::info(&format!(
            "No commitment matches \"{}\"",
            search.unwrap_or_default()
        ));
    } else {
        ui::separator();
        ui::info(&format!("{} commitment(s)", shown));
    }

    Ok(())
}
