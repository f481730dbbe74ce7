//! # Domain Errors
//!
//! Error types for the record pipeline.

use ml_01_ledger_client::LedgerError;
use shared_crypto::CryptoError;
use shared_types::OperationType;
use thiserror::Error;

/// Envelope assembly errors. Structural only; no cryptography is checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// A field required for this operation is missing or empty.
    #[error("Incomplete {operation} envelope: missing {field}")]
    Incomplete {
        /// Operation being built
        operation: OperationType,
        /// Missing field name
        field: &'static str,
    },

    /// A query envelope was given write-only fields.
    #[error("{operation} envelope must not carry {field}")]
    UnexpectedField {
        /// Operation being built
        operation: OperationType,
        /// Offending field name
        field: &'static str,
    },
}

/// Errors raised by collaborator ports (card reader, profile source, key store).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The source could not be read.
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// The source was read but its contents are unusable.
    #[error("Malformed source data: {0}")]
    Malformed(String),

    /// The source holds a different identity kind than required.
    #[error("Expected a {expected} identity, found {actual}")]
    WrongIdentityKind {
        /// Required kind
        expected: &'static str,
        /// Kind found
        actual: &'static str,
    },
}

/// Read-path errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The ledger could not be queried.
    #[error("Ledger unavailable: {0}")]
    LedgerUnavailable(#[from] LedgerError),

    /// A transaction carried our patient hash but did not open with our
    /// passphrase.
    #[error("Integrity fault in ledger transaction #{index}: {source}")]
    IntegrityFault {
        /// Position in the ledger response
        index: usize,
        /// Decryption failure
        #[source]
        source: CryptoError,
    },

    /// Requester identity or passphrase could not be read.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl SearchError {
    /// Whether the HTTP layer should answer with an empty result.
    ///
    /// Integrity faults are never degraded: they mean the ledger holds a
    /// record for this patient that we cannot read.
    pub fn is_degraded(&self) -> bool {
        match self {
            SearchError::LedgerUnavailable(e) => e.is_degraded(),
            SearchError::IntegrityFault { .. } => false,
            SearchError::Source(_) => true,
        }
    }
}

/// Write-path and service errors.
#[derive(Debug, Error)]
pub enum RecordServiceError {
    /// Record could not be sealed.
    #[error("Encryption failed: {0}")]
    Encryption(#[source] CryptoError),

    /// Ciphertext could not be signed.
    #[error("Signing failed: {0}")]
    Signing(#[source] CryptoError),

    /// Envelope was structurally incomplete.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// Record names a doctor other than the one whose key signs it.
    #[error("Record doctor {record_doctor} does not match signing doctor {context_doctor}")]
    DoctorMismatch {
        /// Doctor id on the record
        record_doctor: i64,
        /// Doctor id of the clinic context
        context_doctor: i64,
    },

    /// Identity or passphrase could not be read.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Background delivery outcome errors.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The ledger rejected or never received the transaction.
    #[error("Delivery failed: {0}")]
    Ledger(#[from] LedgerError),

    /// The delivery task panicked or was cancelled.
    #[error("Delivery task aborted: {0}")]
    Aborted(String),
}
