//! # Search Pipeline
//!
//! ```text
//! hash(requester) -> ledger.get_all_by_hash -> for each tx in ledger order:
//!     verify signature (trusted doctor key)    -- fail: warn, skip
//!     patient_hash == requester (const time)   -- no:   skip
//!     decrypt with passphrase                  -- fail: IntegrityFault
//!     payload contains query (ignore case)     -- yes:  collect
//! ```
//!
//! The node may return other patients' transactions; nothing is decrypted
//! until both the signature and the patient hash check out.

use std::sync::Arc;
use tracing::{debug, info, warn};

use ml_01_ledger_client::LedgerApi;
use shared_crypto::{decrypt_record, hash_identity, hashes_equal, Passphrase};
use shared_types::{Identity, IdentityHash, Record, Transaction};

use crate::domain::{SearchError, TrustedSigners};

/// Ledger search over verified, decrypted records.
pub struct SearchPipeline<L: LedgerApi + ?Sized> {
    ledger: Arc<L>,
    signers: TrustedSigners,
}

impl<L: LedgerApi + ?Sized> SearchPipeline<L> {
    /// Create a pipeline reading from `ledger` and trusting `signers`.
    pub fn new(ledger: Arc<L>, signers: TrustedSigners) -> Self {
        Self { ledger, signers }
    }

    /// Records of `requester` whose payload contains `query`.
    pub async fn search(
        &self,
        requester: &Identity,
        passphrase: &Passphrase,
        query: &str,
    ) -> Result<Vec<Record>, SearchError> {
        let requester_hash = hash_identity(requester);
        let transactions = self.ledger.get_all_by_hash(&requester_hash).await?;
        info!(count = transactions.len(), "[ml-02] Searching ledger transactions");

        let found = filter_transactions(
            &transactions,
            &requester_hash,
            &self.signers,
            passphrase,
            query,
        )?;
        info!(matched = found.len(), "[ml-02] Search complete");
        Ok(found)
    }

    /// Number of ledger transactions carrying `patient_hash`.
    pub async fn count_for(&self, patient_hash: &IdentityHash) -> Result<usize, SearchError> {
        let transactions = self.ledger.get_all_by_hash(patient_hash).await?;
        Ok(transactions
            .iter()
            .filter(|tx| hashes_equal(&tx.patient_hash, patient_hash))
            .count())
    }
}

/// Run the per-transaction checks over an already fetched ledger response.
pub fn filter_transactions(
    transactions: &[Transaction],
    requester_hash: &IdentityHash,
    signers: &TrustedSigners,
    passphrase: &Passphrase,
    query: &str,
) -> Result<Vec<Record>, SearchError> {
    let needle = query.to_lowercase();
    let mut found = Vec::new();

    for (index, tx) in transactions.iter().enumerate() {
        if !signers.verify(&tx.doctor_hash, &tx.ciphertext, &tx.signature) {
            warn!(
                index,
                doctor_hash = %hex::encode(tx.doctor_hash),
                signature = %hex::encode(&tx.signature),
                "[ml-02] Transaction signature rejected, skipping"
            );
            continue;
        }

        if !hashes_equal(&tx.patient_hash, requester_hash) {
            continue;
        }

        let record = decrypt_record(&tx.ciphertext, passphrase)
            .map_err(|source| SearchError::IntegrityFault { index, source })?;

        if record.payload.to_lowercase().contains(&needle) {
            debug!(index, record_id = record.id, "[ml-02] Record matches query");
            found.push(record);
        }
    }
    Ok(found)
}
