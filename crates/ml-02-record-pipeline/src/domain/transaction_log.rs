//! # Transaction Log
//!
//! Process-lifetime record of everything this process wrote. Lost on
//! restart; the ledger node is the only durable copy.

use parking_lot::RwLock;
use std::sync::Arc;

use shared_types::{Record, Transaction};

#[derive(Debug, Default)]
struct LogInner {
    records: Vec<Record>,
    transactions: Vec<Transaction>,
}

/// Shared, append-only log of created records and their transactions.
///
/// Clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct TransactionLog {
    inner: Arc<RwLock<LogInner>>,
}

impl TransactionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and the transaction that carries it.
    pub fn append(&self, record: Record, transaction: Transaction) {
        let mut inner = self.inner.write();
        inner.records.push(record);
        inner.transactions.push(transaction);
    }

    /// All records in creation order.
    pub fn records(&self) -> Vec<Record> {
        self.inner.read().records.clone()
    }

    /// First record with `id`, if any.
    pub fn record(&self, id: i64) -> Option<Record> {
        self.inner.read().records.iter().find(|r| r.id == id).cloned()
    }

    /// All transactions in creation order.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.inner.read().transactions.clone()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Whether nothing was logged yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
