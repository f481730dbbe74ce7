//! # Inbound Ports (Driving Ports / API)
//!
//! The ledger operations the record pipeline drives.

use async_trait::async_trait;
use shared_types::{IdentityHash, Transaction};

use crate::domain::LedgerError;

/// Ledger node access.
///
/// Every call is one connection: connect, send one request, optionally read
/// one response, close. Implementations must be thread-safe so the write
/// path can run on a background task.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// Append a transaction. Not acknowledged by the node: `Ok` means the
    /// request was flushed, not that it is durable.
    async fn add_transaction(&self, transaction: &Transaction) -> Result<(), LedgerError>;

    /// Fetch every transaction the node returns for `patient_hash`, in
    /// ledger order. The node may return other patients' transactions too;
    /// callers filter.
    async fn get_all_by_hash(
        &self,
        patient_hash: &IdentityHash,
    ) -> Result<Vec<Transaction>, LedgerError>;
}
