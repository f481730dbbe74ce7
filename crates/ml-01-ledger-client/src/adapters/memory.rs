//! In-process ledger.
//!
//! Behaves like the development node: appends on Add, answers every query
//! with the full ledger in append order. Used by tests and by the dev node
//! as its backing store.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use shared_types::{IdentityHash, OperationType, Transaction};

use crate::domain::LedgerError;
use crate::ports::LedgerApi;

/// Append-only transaction list shared between handles.
#[derive(Clone, Debug, Default)]
pub struct LedgerStore {
    inner: Arc<RwLock<Vec<Transaction>>>,
}

impl LedgerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one transaction, forcing it to `Add`.
    pub fn append(&self, mut transaction: Transaction) {
        transaction.operation_type = OperationType::Add;
        self.inner.write().push(transaction);
    }

    /// Copy of every stored transaction in append order.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.inner.read().clone()
    }

    /// Number of stored transactions.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

/// `LedgerApi` backed by a `LedgerStore`.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLedger {
    store: LedgerStore,
    offline: Arc<AtomicBool>,
}

impl InMemoryLedger {
    /// Create an empty, reachable ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing store.
    pub fn with_store(store: LedgerStore) -> Self {
        Self {
            store,
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Backing store.
    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// Simulate the node going away (`true`) or coming back (`false`).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), LedgerError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(LedgerError::Connect {
                addr: "in-memory".to_string(),
                reason: "ledger offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerApi for InMemoryLedger {
    async fn add_transaction(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        self.check_online()?;
        self.store.append(transaction.clone());
        Ok(())
    }

    async fn get_all_by_hash(
        &self,
        _patient_hash: &IdentityHash,
    ) -> Result<Vec<Transaction>, LedgerError> {
        self.check_online()?;
        Ok(self.store.snapshot())
    }
}
