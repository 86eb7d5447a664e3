//! Error types for Veilpay client operations.
//!
//! Directory errors cover the transport boundary to the API gateway;
//! transfer errors cover everything that can stop a commitment transfer,
//! including the validation failures that abort before any network call.

use thiserror::Error;

/// Errors returned by directory clients (commitment and user listings,
/// transfer submission).
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The gateway rejected the request as malformed.
    #[error("invalid request: {reason}")]
    InvalidData {
        /// Reason reported by the gateway
        reason: String,
    },

    /// The requested resource does not exist.
    #[error("{resource} not found")]
    NotFound {
        /// Resource description (path or entity)
        resource: String,
    },

    /// Rate limited, should retry after a delay.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited {
        /// Suggested retry delay in milliseconds
        retry_after_ms: u64,
    },

    /// The request timed out.
    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout {
        /// Operation that timed out
        operation: String,
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// Connection to the gateway failed.
    #[error("connection to {target} failed: {reason}")]
    Connection {
        /// Target endpoint
        target: String,
        /// Underlying error message
        reason: String,
    },

    /// Response could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The gateway reported a server-side failure.
    #[error("gateway error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Internal/unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DirectoryError {
    /// Returns true if this error is potentially recoverable by retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Timeout { .. } | Self::Connection { .. }
        )
    }
}

impl From<serde_json::Error> for DirectoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Errors raised by [`TransferView::initiate_transfer`](crate::view::TransferView::initiate_transfer).
///
/// The validation variants abort the transfer before anything is sent to
/// the gateway.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The selection does not hold exactly two commitments.
    #[error("expected exactly 2 selected commitments, found {count}")]
    InvalidSelection {
        /// Number of commitments currently selected
        count: usize,
    },

    /// Transfer amount or recipient is missing.
    #[error("transfer amount and recipient are required")]
    MissingFields,

    /// The transfer amount exceeds the combined value of the selected pair.
    #[error("transfer amount {amount} exceeds selected commitment value {available}")]
    AmountExceedsTotal {
        /// Requested transfer amount
        amount: u128,
        /// Combined value of the selected commitments
        available: u128,
    },

    /// A selected commitment carries a value the client cannot read as a
    /// number.
    #[error("commitment value {value:?} is not a readable amount")]
    InvalidValue {
        /// The raw value string as served by the gateway
        value: String,
    },

    /// The gateway call itself failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
