//! # Record Service
//!
//! Application service wiring the write path and the read path.
//!
//! ## Write path
//!
//! ```text
//! Record -> encrypt(passphrase) -> sign(ciphertext) -> envelope
//!        -> spawn delivery -> log locally -> CreatedTransaction
//! ```
//!
//! ## Read path
//!
//! See [`SearchPipeline`].

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use ml_01_ledger_client::LedgerApi;
use shared_crypto::{encrypt_record, hash_patient, Passphrase};
use shared_types::{Identity, Record, Transaction};

use super::context::ClinicContext;
use super::delivery::DeliveryHandle;
use super::search::SearchPipeline;
use crate::domain::{
    EnvelopeBuilder, RecordServiceError, SearchError, TransactionLog, TrustedSigners,
};
use crate::ports::{CreatedTransaction, RecordServiceApi};

/// RFC 850 timestamp layout, always in UTC.
const RFC850_UTC: &str = "%A, %d-%b-%y %H:%M:%S UTC";

/// Record Service - seals, signs, delivers, and searches records.
pub struct RecordService<L: LedgerApi + ?Sized> {
    /// Ledger node access.
    ledger: Arc<L>,
    /// Doctor identity, key, and patient sources.
    context: Arc<ClinicContext>,
    /// Doctor keys accepted on the read path.
    signers: TrustedSigners,
    /// Records and transactions created by this process.
    log: TransactionLog,
    /// Read path.
    search: SearchPipeline<L>,
}

impl<L: LedgerApi + ?Sized + 'static> RecordService<L> {
    /// Create a service. The context doctor is trusted automatically.
    pub fn new(ledger: Arc<L>, context: ClinicContext) -> Self {
        let signers = TrustedSigners::new();
        signers.register_hash(context.doctor_hash(), context.public_key());

        Self {
            search: SearchPipeline::new(ledger.clone(), signers.clone()),
            ledger,
            context: Arc::new(context),
            signers,
            log: TransactionLog::new(),
        }
    }

    /// Clinic context.
    pub fn context(&self) -> &ClinicContext {
        &self.context
    }

    /// Signer directory; register other doctors here to accept their records.
    pub fn signers(&self) -> &TrustedSigners {
        &self.signers
    }

    /// Local transaction log.
    pub fn log(&self) -> &TransactionLog {
        &self.log
    }

    /// Build a record for the current patient.
    ///
    /// The id continues the patient's ledger sequence. When the ledger
    /// cannot be reached the count is taken as 0.
    pub async fn compose_record(&self, payload: &str) -> Result<Record, RecordServiceError> {
        let patient = self.context.current_patient()?;
        let patient_hash = hash_patient(&patient);

        let existing = match self.search.count_for(&patient_hash).await {
            Ok(n) => n,
            Err(e) => {
                warn!("[ml-02] Could not count ledger records, numbering from 1: {}", e);
                0
            }
        };

        Ok(Record {
            id: existing as i64 + 1,
            doctor: self.context.doctor().clone(),
            patient,
            payload: payload.to_string(),
            timestamp: Utc::now().format(RFC850_UTC).to_string(),
        })
    }

    fn seal_and_sign(
        &self,
        record: &Record,
        passphrase: &Passphrase,
    ) -> Result<Transaction, RecordServiceError> {
        if record.doctor != *self.context.doctor() {
            return Err(RecordServiceError::DoctorMismatch {
                record_doctor: record.doctor.id,
                context_doctor: self.context.doctor().id,
            });
        }

        let ciphertext =
            encrypt_record(record, passphrase).map_err(RecordServiceError::Encryption)?;
        let signature = self
            .context
            .signing_key()
            .sign(&ciphertext)
            .map_err(RecordServiceError::Signing)?;

        let transaction = EnvelopeBuilder::add()
            .patient_hash(hash_patient(&record.patient))
            .doctor_hash(self.context.doctor_hash())
            .ciphertext(ciphertext)
            .signature(signature)
            .build()?;
        Ok(transaction)
    }
}

#[async_trait]
impl<L: LedgerApi + ?Sized + 'static> RecordServiceApi for RecordService<L> {
    async fn create_transaction(
        &self,
        record: &Record,
        passphrase: &Passphrase,
    ) -> Result<CreatedTransaction, RecordServiceError> {
        let transaction = self.seal_and_sign(record, passphrase)?;
        info!(
            record_id = record.id,
            signature = %hex::encode(&transaction.signature),
            "[ml-02] Created new signed transaction"
        );

        let delivery = DeliveryHandle::spawn(self.ledger.clone(), transaction.clone());
        self.log.append(record.clone(), transaction.clone());

        Ok(CreatedTransaction {
            record: record.clone(),
            transaction,
            delivery,
        })
    }

    async fn create_record(&self, payload: &str) -> Result<CreatedTransaction, RecordServiceError> {
        let record = self.compose_record(payload).await?;
        let passphrase = self.context.passphrase()?;
        self.create_transaction(&record, &passphrase).await
    }

    async fn search_records(
        &self,
        identity: &Identity,
        passphrase: &Passphrase,
        query: &str,
    ) -> Result<Vec<Record>, SearchError> {
        self.search.search(identity, passphrase, query).await
    }

    async fn search_own_records(&self, query: &str) -> Result<Vec<Record>, SearchError> {
        let patient = self.context.current_patient()?;
        let passphrase = self.context.passphrase()?;
        self.search
            .search(&Identity::Patient(patient), &passphrase, query)
            .await
    }

    fn records(&self) -> Vec<Record> {
        self.log.records()
    }

    fn record(&self, id: i64) -> Option<Record> {
        self.log.record(id)
    }

    fn transactions(&self) -> Vec<Transaction> {
        self.log.transactions()
    }
}
