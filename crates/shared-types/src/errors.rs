//! # Error Types
//!
//! Errors raised while interpreting shared entities.

use thiserror::Error;

/// Errors related to entity decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    /// The operation code is not one the ledger protocol defines.
    #[error("Unknown ledger operation type: {0}")]
    UnknownOperationType(u8),
}
