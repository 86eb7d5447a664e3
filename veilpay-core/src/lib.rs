//! Veilpay Demo Core Library
//!
//! Shared client logic for all Veilpay demo applications (CLI, Web, Desktop).
//! This crate provides the token-commitment transfer view, directory clients,
//! typed errors, and storage abstraction.

pub mod config;
pub mod directory;
pub mod errors;
pub mod models;
pub mod storage;
pub mod testing;
pub mod view;

pub use config::DirectoryConfig;
pub use directory::{CommitmentDirectory, HttpDirectoryClient, UserDirectory};
pub use errors::{DirectoryError, TransferError};
pub use models::{Commitment, Envelope, FieldHex, TransferRecord, TransferRequest, User};
pub use storage::{ClientStorage, TokenDisplay};
pub use view::{Notifier, Route, Router, TransferOutcome, TransferView, ViewEvent};

/// Result type for demo operations
pub type Result<T> = anyhow::Result<T>;
