//! # Inbound Ports (Driving Ports / API)
//!
//! What the HTTP layer calls.

use async_trait::async_trait;
use shared_crypto::Passphrase;
use shared_types::{Identity, Record, Transaction};

use crate::application::DeliveryHandle;
use crate::domain::{RecordServiceError, SearchError};

/// Result of the write path.
#[derive(Debug)]
pub struct CreatedTransaction {
    /// The plaintext record that was sealed.
    pub record: Record,
    /// The signed envelope handed to the ledger.
    pub transaction: Transaction,
    /// Background ledger delivery. Await it or drop it.
    pub delivery: DeliveryHandle,
}

/// Record service API.
#[async_trait]
pub trait RecordServiceApi: Send + Sync {
    /// Seal, sign, and send `record`. Returns once the delivery task is
    /// spawned; the ledger write may still be in flight.
    async fn create_transaction(
        &self,
        record: &Record,
        passphrase: &Passphrase,
    ) -> Result<CreatedTransaction, RecordServiceError>;

    /// Compose a record for the current patient from `payload` and create
    /// its transaction with the card passphrase.
    async fn create_record(&self, payload: &str) -> Result<CreatedTransaction, RecordServiceError>;

    /// Verified, decrypted records of `identity` whose payload contains
    /// `query` (case-insensitive), in ledger order.
    async fn search_records(
        &self,
        identity: &Identity,
        passphrase: &Passphrase,
        query: &str,
    ) -> Result<Vec<Record>, SearchError>;

    /// `search_records` for the current patient and card passphrase.
    async fn search_own_records(&self, query: &str) -> Result<Vec<Record>, SearchError>;

    /// Records created by this process.
    fn records(&self) -> Vec<Record>;

    /// Record created by this process with `id`.
    fn record(&self, id: i64) -> Option<Record>;

    /// Transactions created by this process.
    fn transactions(&self) -> Vec<Transaction>;
}
