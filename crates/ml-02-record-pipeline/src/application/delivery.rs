//! Background ledger delivery.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use ml_01_ledger_client::{LedgerApi, LedgerError};
use shared_types::Transaction;

use crate::domain::DeliveryError;

/// Handle to a ledger write running on its own task.
///
/// Dropping the handle does not cancel the write.
#[derive(Debug)]
pub struct DeliveryHandle {
    task: JoinHandle<Result<(), LedgerError>>,
}

impl DeliveryHandle {
    /// Send `transaction` on a new task.
    pub fn spawn<L>(ledger: Arc<L>, transaction: Transaction) -> Self
    where
        L: LedgerApi + ?Sized + 'static,
    {
        let task = tokio::spawn(async move {
            let result = ledger.add_transaction(&transaction).await;
            match &result {
                Ok(()) => info!(
                    signature = %hex::encode(&transaction.signature),
                    "[ml-02] Transaction delivered"
                ),
                Err(e) => warn!(
                    op = %transaction.operation_type,
                    "[ml-02] Transaction delivery failed: {}",
                    e
                ),
            }
            result
        });
        Self { task }
    }

    /// Wait for the write to finish.
    pub async fn wait(self) -> Result<(), DeliveryError> {
        match self.task.await {
            Ok(result) => result.map_err(DeliveryError::from),
            Err(e) => Err(DeliveryError::Aborted(e.to_string())),
        }
    }

    /// Let the write run unobserved.
    pub fn detach(self) {}
}
