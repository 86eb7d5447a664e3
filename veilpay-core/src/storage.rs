//! File-based storage for demo data (token display info, transfer history)
//!
//! This module provides a simple JSON-based file storage system for demo
//! applications.
//!
//! # Security Warning
//!
//! This storage is **NOT suitable for production use**:
//! - No encryption at rest
//! - No atomicity guarantees
//! - No concurrent access protection
//!
//! For production, use a proper database with encryption, transactions,
//! and access control.
//!
//! # Examples
//!
//! ```no_run
//! use veilpay_core::{ClientStorage, TokenDisplay};
//!
//! # fn example() -> anyhow::Result<()> {
//! let storage = ClientStorage::new("./data");
//! storage.init()?;
//!
//! storage.set_token_display(TokenDisplay {
//!     name: Some("Example Token".to_string()),
//!     symbol: Some("EXT".to_string()),
//! })?;
//!
//! let display = storage.token_display()?;
//! println!("Token: {:?}", display.name);
//! # Ok(())
//! # }
//! ```

use crate::models::TransferRecord;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Cached display strings for the token, written by whichever client
/// screen read them from the token contract.
///
/// The on-disk keys match the gateway UI's historical key-value names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenDisplay {
    /// Token name
    #[serde(rename = "ftName")]
    pub name: Option<String>,
    /// Token symbol
    #[serde(rename = "ftSymbol")]
    pub symbol: Option<String>,
}

/// Simple file-based storage for demo applications
pub struct ClientStorage {
    storage_dir: PathBuf,
}

#[derive(Serialize, Deserialize, Default)]
struct StorageData {
    #[serde(default)]
    token: TokenDisplay,
    #[serde(default)]
    transfers: HashMap<String, TransferRecord>,
}

impl ClientStorage {
    /// Create a new storage instance
    pub fn new(storage_dir: impl AsRef<Path>) -> Self {
        Self {
            storage_dir: storage_dir.as_ref().to_path_buf(),
        }
    }

    /// Initialize storage directory
    pub fn init(&self) -> Result<()> {
        std::fs::create_dir_all(&self.storage_dir).context("Failed to create storage directory")?;
        Ok(())
    }

    /// Read the cached token display strings
    pub fn token_display(&self) -> Result<TokenDisplay> {
        let data = self.load_data()?;
        Ok(data.token)
    }

    /// Replace the cached token display strings
    pub fn set_token_display(&self, token: TokenDisplay) -> Result<()> {
        let mut data = self.load_data()?;
        data.token = token;
        self.save_data(&data)?;
        Ok(())
    }

    /// Save a transfer record
    pub fn save_transfer(&self, record: TransferRecord) -> Result<()> {
        let mut data = self.load_data()?;
        data.transfers.insert(record.id.clone(), record);
        self.save_data(&data)?;
        Ok(())
    }

    /// Get a transfer record by ID
    pub fn get_transfer(&self, id: &str) -> Result<Option<TransferRecord>> {
        let data = self.load_data()?;
        Ok(data.transfers.get(id).cloned())
    }

    /// List all transfer records, newest first
    pub fn list_transfers(&self) -> Result<Vec<TransferRecord>> {
        let data = self.load_data()?;
        let mut transfers: Vec<_> = data.transfers.values().cloned().collect();
        transfers.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(transfers)
    }

    fn data_file(&self) -> PathBuf {
        self.storage_dir.join("data.json")
    }

    fn load_data(&self) -> Result<StorageData> {
        let path = self.data_file();
        if !path.exists() {
            return Ok(StorageData::default());
        }

        let content = std::fs::read_to_string(&path).context("Failed to read storage file")?;
        serde_json::from_str(&content).context("Failed to parse storage file")
    }

    fn save_data(&self, data: &StorageData) -> Result<()> {
        self.init()?;
        let content = serde_json::to_string_pretty(data).context("Failed to serialize storage")?;
        std::fs::write(self.data_file(), content).context("Failed to write storage file")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_display_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ClientStorage::new(dir.path());
        storage.init().unwrap();

        assert!(storage.token_display().unwrap().name.is_none());

        storage
            .set_token_display(TokenDisplay {
                name: Some("Example Token".to_string()),
                symbol: Some("EXT".to_string()),
            })
            .unwrap();

        let display = storage.token_display().unwrap();
        assert_eq!(display.name.as_deref(), Some("Example Token"));
        assert_eq!(display.symbol.as_deref(), Some("EXT"));
    }

    #[test]
    fn test_token_display_on_disk_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ClientStorage::new(dir.path());
        storage
            .set_token_display(TokenDisplay {
                name: Some("Example Token".to_string()),
                symbol: None,
            })
            .unwrap();

        let raw = std::fs::read_to_string(dir.path().join("data.json")).unwrap();
        assert!(raw.contains("ftName"));
        assert!(raw.contains("ftSymbol"));
    }

    #[test]
    fn test_transfers_sorted_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ClientStorage::new(dir.path());

        let mut older = TransferRecord::new("t1".to_string(), "bob".to_string(), 10, 5);
        older.timestamp = 100;
        let mut newer = TransferRecord::new("t2".to_string(), "carol".to_string(), 3, 0);
        newer.timestamp = 200;

        storage.save_transfer(older).unwrap();
        storage.save_transfer(newer).unwrap();

        let transfers = storage.list_transfers().unwrap();
        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0].id, "t2");

        assert!(storage.get_transfer("t1").unwrap().is_some());
        assert!(storage.get_transfer("missing").unwrap().is_none());
    }
}
