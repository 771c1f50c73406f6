use std::{path::PathBuf, string::FromUtf8Error};

use alloy_primitives::{Bytes, TxHash};
use alloy_transport::TransportError;

/// Error types for replaying a transaction
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// Transport error while looking up the transaction
    #[error("Failed to fetch transaction: {0}")]
    TransactionLookup(TransportError),

    /// The transaction has not been included in a block yet
    #[error("Transaction {0} has no block number")]
    MissingBlockNumber(TxHash),

    /// The node rejected or reverted the call
    #[error("Call failed: {0}")]
    Call(TransportError),

    /// The call response could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(#[from] DecodeError),

    /// Header length that does not describe a byte-aligned `0x`-prefixed header
    #[error("Invalid header length: {0} (must be even and at least 2)")]
    InvalidHeaderLength(usize),

    /// ABI file could not be read or parsed
    #[error("Failed to load ABI from {}: {reason}", path.display())]
    AbiLoad {
        /// Path of the ABI file
        path: PathBuf,
        /// What went wrong
        reason: String,
    },
}

impl ReplayError {
    /// Returns the revert data carried by a failed call, if the node returned any.
    pub fn revert_data(&self) -> Option<Bytes> {
        match self {
            Self::Call(err) => err.as_error_resp().and_then(|payload| payload.as_revert_data()),
            _ => None,
        }
    }
}

/// Errors raised while decoding a call response
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The bytes after the header are not valid UTF-8
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
}

/// Result type for replay operations
pub type Result<T> = std::result::Result<T, ReplayError>;
