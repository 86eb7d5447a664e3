//! Transfer command - split two commitments between a recipient and
//! change
//!
//! Drives the full transfer view flow: load commitments and registered
//! names, pick a commitment pair, pick a recipient and amount, submit.
//! Anything not supplied on the command line is prompted interactively.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::sync::mpsc::UnboundedReceiver;

use veilpay_core::view::matches_search;
use veilpay_core::{
    Commitment, TransferRecord, TransferView, ViewEvent,
};

use crate::ui;
use crate::ui::{TerminalNotifier, TerminalRouter};

#[tracing::instrument(skip(storage_dir))]
pub async fn run(
    storage_dir: &Path,
    api_url: &str,
    commitments: Option<String>,
    amount: Option<u128>,
    recipient: Option<String>,
    verbose: bool,
) -> Result<()> {
    ui::header("Transfer Token Commitments");

    let storage = super::open_storage(storage_dir)?;
    let client = super::gateway_client(api_url)?;
    let notifier = Arc::new(TerminalNotifier);
    let router = Arc::new(TerminalRouter::new());

    let (mut view, mut events) =
        TransferView::new(client.clone(), client, notifier, router.clone());

    let spinner = ui::spinner("Loading commitments and registered names...");
    view.initialize(&storage).await;
    spinner.finish_and_clear();

    if let Some(name) = view.token_name.clone() {
        let label = match view.token_symbol.clone() {
            Some(symbol) => format!("{} ({})", name, symbol),
            None => name,
        };
        ui::key_value("Token", &label);
    }

    if view.commitments().is_empty() {
        ui::info("No commitments available to transfer");
        return Ok(());
    }

    if verbose {
        ui::info(&format!("{} commitment(s) loaded", view.commitments().len()));
    }

    let selection = match commitments {
        Some(arg) => parse_selection_arg(&arg)?,
        None => prompt_selection(&view, &mut events).await?,
    };
    for id in selection {
        if !view.select(id) {
            ui::warning(&format!("Commitment {} is unknown or already selected", id));
        }
    }

    let amount = match amount {
        Some(value) => value,
        None => ui::input("Transfer amount")?
            .trim()
            .parse::<u128>()
            .context("Transfer amount must be a non-negative integer")?,
    };
    let recipient = match recipient {
        Some(name) => name,
        None => prompt_recipient(&view)?,
    };

    view.transfer_value = Some(amount);
    view.receiver_name = Some(recipient);

    ui::separator();

    match view.initiate_transfer().await {
        Ok(outcome) => {
            let transfer = outcome.request.output_commitments[0]
                .value
                .decode()
                .unwrap_or_default();
            let change = outcome.request.output_commitments[1]
                .value
                .decode()
                .unwrap_or_default();
            let record = TransferRecord::new(
                uuid::Uuid::new_v4().to_string(),
                outcome.request.receiver_name.clone(),
                transfer,
                change,
            )
            .with_consumed(
                outcome
                    .request
                    .input_commitments
                    .iter()
                    .map(|c| c.commitment.clone())
                    .collect(),
            );
            storage.save_transfer(record)?;

            ui::success(&format!(
                "Transfer submitted ({} sent, {} returned as change)",
                transfer, change
            ));

            if let Some(route) = router.take() {
                ui::info(&format!("Opening {}", route.to_uri()));
                let veilpay_core::Route::Overview { selected_tab } = route;
                super::overview::render(&storage, &selected_tab)?;
            }
        }
        Err(err) => {
            // the view already surfaced the failure as a toast
            tracing::debug!("Transfer aborted: {}", err);
        }
    }

    Ok(())
}

/// Parse a `--commitments` argument like "0,1" into selection ids.
pub fn parse_selection_arg(arg: &str) -> Result<Vec<usize>> {
    let ids = arg
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .with_context(|| format!("Invalid commitment id: {}", part))
        })
        .collect::<Result<Vec<_>>>()?;

    if ids.is_empty() {
        bail!("--commitments expects ids like \"0,1\"");
    }
    Ok(ids)
}

fn commitment_label(commitment: &Commitment, symbol: Option<&str>) -> String {
    let value = commitment
        .numeric_value()
        .map(|v| v.to_string())
        .unwrap_or_else(|| commitment.value.clone());
    format!(
        "#{}  {} {}  {}",
        commitment.id,
        value,
        symbol.unwrap_or(""),
        super::short_hash(&commitment.commitment)
    )
}

/// Interactive selection: wait for the deferred focus, offer a search
/// box, then a multi-select over the (filtered) list.
async fn prompt_selection(
    view: &TransferView,
    events: &mut UnboundedReceiver<ViewEvent>,
) -> Result<Vec<usize>> {
    // the view hands focus to the search input shortly after rendering
    if let Some(ViewEvent::FocusSearch) = events.recv().await {
        tracing::debug!("Search input focused");
    }

    let term = ui::input_allow_empty("Search by value (leave empty for all)")?;
    let candidates: Vec<&Commitment> = view
        .commitments()
        .iter()
        .filter(|c| term.is_empty() || matches_search(&term, Some(c)))
        .collect();

    if candidates.is_empty() {
        bail!("No commitment matches \"{}\"", term);
    }

    let symbol = view.token_symbol.clone();
    let labels: Vec<String> = candidates
        .iter()
        .map(|c| commitment_label(c, symbol.as_deref()))
        .collect();
    let picked = ui::multi_select("Pick exactly two commitments", &labels)?;

    Ok(picked.into_iter().map(|index| candidates[index].id).collect())
}

fn prompt_recipient(view: &TransferView) -> Result<String> {
    if view.users().is_empty() {
        return ui::input("Recipient name");
    }

    let names: Vec<String> = view.users().iter().map(|u| u.name.clone()).collect();
    let picked = ui::select("Recipient", &names)?;
    Ok(names[picked].clone())
}
