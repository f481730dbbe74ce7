//! # Domain Errors
//!
//! Error types for the ledger protocol client.

use std::fmt;
use thiserror::Error;

/// Step of the per-call exchange where a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Opening the TCP connection.
    Connect,
    /// Writing and flushing the request frame.
    Send,
    /// Reading the response frame.
    Receive,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Connect => write!(f, "connect"),
            Stage::Send => write!(f, "send"),
            Stage::Receive => write!(f, "receive"),
        }
    }
}

/// Ledger client error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Could not open a connection to the node.
    #[error("Connection to ledger node {addr} failed: {reason}")]
    Connect {
        /// Node address
        addr: String,
        /// Underlying I/O error
        reason: String,
    },

    /// A stage exceeded its timeout.
    #[error("Ledger {stage} timed out")]
    NetworkTimeout {
        /// Stage that timed out
        stage: Stage,
    },

    /// I/O failure after the connection was open.
    #[error("Ledger {stage} failed: {reason}")]
    Network {
        /// Stage that failed
        stage: Stage,
        /// Underlying I/O error
        reason: String,
    },

    /// Request could not be encoded.
    #[error("Failed to encode ledger request: {0}")]
    Encoding(String),

    /// Response could not be decoded.
    #[error("Failed to decode ledger response: {0}")]
    Decoding(String),

    /// Frame header announced more bytes than allowed.
    #[error("Ledger frame of {size} bytes exceeds limit of {limit} bytes")]
    FrameTooLarge {
        /// Announced size
        size: usize,
        /// Configured limit
        limit: usize,
    },
}

impl LedgerError {
    /// Whether repeating the whole exchange may succeed.
    ///
    /// Only failures where nothing reached the node, or where the operation
    /// is a read, qualify. Malformed bytes never heal on retry.
    pub fn is_retryable(&self, idempotent: bool) -> bool {
        match self {
            LedgerError::Connect { .. } => true,
            LedgerError::NetworkTimeout { stage } => idempotent || *stage == Stage::Connect,
            LedgerError::Network { .. } => idempotent,
            LedgerError::Encoding(_)
            | LedgerError::Decoding(_)
            | LedgerError::FrameTooLarge { .. } => false,
        }
    }

    /// Whether the node was unreachable or went silent.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            LedgerError::Connect { .. }
                | LedgerError::NetworkTimeout { .. }
                | LedgerError::Network { .. }
        )
    }

    /// Whether the caller should answer with an empty result instead of an
    /// error. True for anything the node caused; a request we could not
    /// encode is a local fault and is reported.
    pub fn is_degraded(&self) -> bool {
        !matches!(self, LedgerError::Encoding(_))
    }
}
