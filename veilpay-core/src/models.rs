//! Data models for Veilpay demo applications
//!
//! This module defines the structures exchanged with the API gateway and
//! the records kept locally by the clients.
//!
//! # Models
//!
//! - [`Commitment`] - a token commitment as served by the gateway
//! - [`TransferRequest`] - two input commitments split into two outputs
//! - [`User`] - a registered recipient
//! - [`FieldHex`] - the 128-bit field encoding used for output values
//! - [`TransferRecord`] - locally persisted transfer history entry
//!
//! # Examples
//!
//! ## Encoding an output value
//!
//! ```
//! use veilpay_core::FieldHex;
//!
//! let encoded = FieldHex::encode(Some(255));
//! assert_eq!(encoded.as_str(), "0x000000000000000000000000000000ff");
//! assert_eq!(encoded.decode(), Some(255));
//! ```
//!
//! ## Building a transfer request
//!
//! ```
//! use veilpay_core::{Commitment, TransferRequest};
//!
//! let a = Commitment::new("20", "0xaa11", "0x01", "alice");
//! let b = Commitment::new("5", "0xbb22", "0x02", "alice");
//! let request = TransferRequest::new([a, b], 17, 8, "bob".to_string());
//!
//! assert_eq!(request.output_commitments[0].value.decode(), Some(17));
//! assert_eq!(request.output_commitments[1].value.decode(), Some(8));
//! ```

use serde::{Deserialize, Serialize};

/// Number of hex digits in a field-encoded value (16 bytes / 128 bits).
pub const FIELD_HEX_DIGITS: usize = 32;

/// Generic response envelope used by every gateway endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Response payload
    pub data: T,
}

/// A token commitment held by the current user.
///
/// The gateway serves `value` as a numeric string, either decimal or
/// `0x`-prefixed hex; comparisons are always numeric. `selected` and `id`
/// are client-side annotations assigned when the list is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commitment {
    /// Token amount bound into the commitment, as served by the gateway
    pub value: String,
    /// Opaque commitment hash
    pub commitment: String,
    /// Salt used when the commitment was minted
    pub salt: String,
    /// Name of the current owner
    pub owner: String,
    /// Whether this commitment is in the current selection
    #[serde(default)]
    pub selected: bool,
    /// Zero-based position assigned when the list was loaded
    #[serde(default)]
    pub id: usize,
}

impl Commitment {
    pub fn new(
        value: impl Into<String>,
        commitment: impl Into<String>,
        salt: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            commitment: commitment.into(),
            salt: salt.into(),
            owner: owner.into(),
            selected: false,
            id: 0,
        }
    }

    /// Parse the commitment value as a number.
    ///
    /// Accepts decimal strings and `0x`-prefixed hex strings. Returns
    /// `None` when the value cannot be read as either.
    pub fn numeric_value(&self) -> Option<u128> {
        let raw = self.value.trim();
        if let Some(hex_digits) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
            u128::from_str_radix(hex_digits, 16).ok()
        } else {
            raw.parse::<u128>().ok()
        }
    }
}

/// A registered user, as listed by the user directory.
///
/// Only the name is consumed by the transfer flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Registered display name
    pub name: String,
    /// Account address, if the directory serves one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A `0x`-prefixed, 32-digit, lowercase hex rendering of a 128-bit value.
///
/// This is the wire format the gateway expects for output values. An
/// absent input encodes as all zeros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldHex(String);

impl FieldHex {
    /// Encode a value into the fixed-width field format.
    pub fn encode(value: Option<u128>) -> Self {
        Self(format!("0x{:0width$x}", value.unwrap_or(0), width = FIELD_HEX_DIGITS))
    }

    /// Decode back to the integer value. Returns `None` if the string is
    /// not a valid field encoding.
    pub fn decode(&self) -> Option<u128> {
        let digits = self.0.strip_prefix("0x")?;
        if digits.len() != FIELD_HEX_DIGITS {
            return None;
        }
        u128::from_str_radix(digits, 16).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FieldHex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One output of a transfer split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferOutput {
    /// Field-encoded output amount
    pub value: FieldHex,
}

/// A commitment transfer: two inputs split into a transfer output and a
/// change output.
///
/// Invariant: the two output values sum to the two input values. The
/// constructor takes the already-validated split so the encoding cannot
/// drift from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// The two commitments consumed by the transfer
    pub input_commitments: [Commitment; 2],
    /// Transfer output first, change output second
    pub output_commitments: [TransferOutput; 2],
    /// Registered name of the recipient
    pub receiver_name: String,
}

impl TransferRequest {
    pub fn new(
        inputs: [Commitment; 2],
        transfer_value: u128,
        change_value: u128,
        receiver_name: String,
    ) -> Self {
        Self {
            input_commitments: inputs,
            output_commitments: [
                TransferOutput {
                    value: FieldHex::encode(Some(transfer_value)),
                },
                TransferOutput {
                    value: FieldHex::encode(Some(change_value)),
                },
            ],
            receiver_name,
        }
    }
}

/// A locally persisted record of a submitted transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Unique record ID
    pub id: String,
    /// Recipient the transfer was sent to
    pub receiver_name: String,
    /// Transferred amount
    pub amount: u128,
    /// Change returned to the sender
    pub change: u128,
    /// Hashes of the two consumed commitments
    pub consumed: Vec<String>,
    /// Unix timestamp when the transfer was submitted
    pub timestamp: i64,
}

impl TransferRecord {
    pub fn new(id: String, receiver_name: String, amount: u128, change: u128) -> Self {
        Self {
            id,
            receiver_name,
            amount,
            change,
            consumed: Vec::new(),
            timestamp: current_timestamp(),
        }
    }

    pub fn with_consumed(mut self, consumed: Vec<String>) -> Self {
        self.consumed = consumed;
        self
    }
}

/// Get current Unix timestamp
///
/// Returns the number of seconds since the Unix epoch, or 0 if system
/// time is before the epoch.
pub fn current_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
