//! Mock directory implementations for testing without network
//! dependencies.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use super::sample_commitment;
use crate::directory::{CommitmentDirectory, UserDirectory};
use crate::errors::DirectoryError;
use crate::models::{Commitment, Envelope, TransferRequest, User};

fn mock_failure(operation: &str) -> DirectoryError {
    DirectoryError::Server {
        status: 500,
        message: format!("mock {} failure", operation),
    }
}

/// In-memory commitment directory.
///
/// Serves a configurable commitment list, records every transfer
/// submission, and fails on demand per operation.
#[derive(Clone, Default)]
pub struct MockCommitmentDirectory {
    commitments: Arc<RwLock<Vec<Commitment>>>,
    transfers: Arc<RwLock<Vec<TransferRequest>>>,
    fail_listing: Arc<RwLock<bool>>,
    fail_transfer: Arc<RwLock<bool>>,
}

impl MockCommitmentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory serving one fixture commitment per value.
    pub fn with_values(values: &[u128]) -> Self {
        let directory = Self::new();
        directory.set_commitments(values.iter().map(|v| sample_commitment(*v)).collect());
        directory
    }

    pub fn set_commitments(&self, commitments: Vec<Commitment>) {
        *self.commitments.write().unwrap() = commitments;
    }

    pub fn set_fail_listing(&self, fail: bool) {
        *self.fail_listing.write().unwrap() = fail;
    }

    pub fn set_fail_transfer(&self, fail: bool) {
        *self.fail_transfer.write().unwrap() = fail;
    }

    /// Every transfer request submitted so far, in order.
    pub fn transfer_log(&self) -> Vec<TransferRequest> {
        self.transfers.read().unwrap().clone()
    }

    pub fn transfer_count(&self) -> usize {
        self.transfers.read().unwrap().len()
    }
}

#[async_trait]
impl CommitmentDirectory for MockCommitmentDirectory {
    async fn get_commitments(&self) -> Result<Envelope<Vec<Commitment>>, DirectoryError> {
        if *self.fail_listing.read().unwrap() {
            return Err(mock_failure("listing"));
        }
        Ok(Envelope {
            data: self.commitments.read().unwrap().clone(),
        })
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<(), DirectoryError> {
        if *self.fail_transfer.read().unwrap() {
            return Err(mock_failure("transfer"));
        }
        self.transfers.write().unwrap().push(request.clone());
        Ok(())
    }
}

/// In-memory user directory.
#[derive(Clone, Default)]
pub struct MockUserDirectory {
    users: Arc<RwLock<Vec<User>>>,
    fail_listing: Arc<RwLock<bool>>,
}

impl MockUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory serving the given registered names.
    pub fn with_names(names: &[&str]) -> Self {
        let directory = Self::new();
        *directory.users.write().unwrap() = names
            .iter()
            .map(|name| User {
                name: name.to_string(),
                address: None,
            })
            .collect();
        directory
    }

    pub fn set_fail_listing(&self, fail: bool) {
        *self.fail_listing.write().unwrap() = fail;
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn get_registered_names(&self) -> Result<Envelope<Vec<User>>, DirectoryError> {
        if *self.fail_listing.read().unwrap() {
            return Err(mock_failure("listing"));
        }
        Ok(Envelope {
            data: self.users.read().unwrap().clone(),
        })
    }
}
