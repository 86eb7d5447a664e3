//! Command handlers

pub mod commitments;
pub mod history;
pub mod overview;
pub mod token;
pub mod transfer;
pub mod users;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use veilpay_core::{ClientStorage, DirectoryConfig, HttpDirectoryClient};

/// Open (and create if needed) the demo storage under the base
/// directory.
pub(crate) fn open_storage(storage_dir: &Path) -> Result<ClientStorage> {
    let storage = ClientStorage::new(storage_dir.join("data"));
    storage.init()?;
    Ok(storage)
}

/// Build a gateway client for the given base URL.
pub(crate) fn gateway_client(api_url: &str) -> Result<Arc<HttpDirectoryClient>> {
    let client = HttpDirectoryClient::new(DirectoryConfig::new(api_url))
        .context("Failed to build gateway client")?;
    Ok(Arc::new(client))
}

/// Abbreviate a commitment hash for list rendering.
pub(crate) fn short_hash(hash: &str) -> String {
    if hash.len() <= 12 {
        hash.to_string()
    } else {
        format!("{}…", &hash[..12])
    }
}
