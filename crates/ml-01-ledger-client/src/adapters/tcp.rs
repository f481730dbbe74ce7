//! TCP Ledger Adapter
//!
//! Implements `LedgerApi` with one short-lived TCP connection per call.
//!
//! ```text
//! Connect -> EncodeAndSend -> Flush -> [ReceiveAndDecode] -> Close
//! ```
//!
//! Each stage has its own timeout. The whole exchange is repeated per the
//! retry policy when the failure is retryable for that operation.

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use shared_types::{IdentityHash, OperationType, Transaction};

use super::framing::{read_frame, write_frame};
use crate::config::LedgerClientConfig;
use crate::domain::codec;
use crate::domain::{LedgerError, Stage};
use crate::ports::LedgerApi;

/// Ledger client over plain TCP.
#[derive(Clone, Debug)]
pub struct TcpLedgerClient {
    config: LedgerClientConfig,
}

impl TcpLedgerClient {
    /// Create a new client.
    pub fn new(config: LedgerClientConfig) -> Self {
        Self { config }
    }

    /// Client configuration.
    pub fn config(&self) -> &LedgerClientConfig {
        &self.config
    }

    /// One connection, one request, optionally one response.
    async fn exchange_once(
        &self,
        request: &Transaction,
    ) -> Result<Option<Vec<Transaction>>, LedgerError> {
        let payload = codec::encode_request(request)?;
        let addr = self.config.node_address.as_str();

        let mut stream = bounded(
            self.config.connect_timeout(),
            Stage::Connect,
            TcpStream::connect(addr),
        )
        .await?
        .map_err(|e| LedgerError::Connect {
            addr: addr.to_string(),
            reason: e.to_string(),
        })?;

        bounded(
            self.config.io_timeout(),
            Stage::Send,
            write_frame(&mut stream, &payload),
        )
        .await??;

        let response = if request.operation_type.expects_response() {
            let frame = bounded(
                self.config.io_timeout(),
                Stage::Receive,
                read_frame(&mut stream, self.config.max_frame_bytes),
            )
            .await??;
            Some(codec::decode_response(&frame)?)
        } else {
            None
        };

        // Close: the node only learns the write is complete at EOF.
        if let Err(e) = stream.shutdown().await {
            debug!("[ml-01] Shutdown after {} failed: {}", request.operation_type, e);
        }
        Ok(response)
    }

    /// Run the exchange under the retry policy.
    async fn exchange(
        &self,
        request: &Transaction,
    ) -> Result<Option<Vec<Transaction>>, LedgerError> {
        let op = request.operation_type;
        let idempotent = op.expects_response();
        let policy = &self.config.retry;
        let mut attempt = 1;

        loop {
            match self.exchange_once(request).await {
                Ok(response) => return Ok(response),
                Err(e) if attempt < policy.max_attempts && e.is_retryable(idempotent) => {
                    let delay = policy.backoff_for(attempt);
                    warn!(
                        op = %op,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "[ml-01] Ledger exchange failed, retrying: {}",
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!(op = %op, attempt, "[ml-01] Ledger exchange aborted: {}", e);
                    return Err(e);
                }
            }
        }
    }
}

/// Apply a stage timeout to a future.
async fn bounded<F, T>(limit: Duration, stage: Stage, fut: F) -> Result<T, LedgerError>
where
    F: Future<Output = T>,
{
    timeout(limit, fut)
        .await
        .map_err(|_| LedgerError::NetworkTimeout { stage })
}

#[async_trait]
impl LedgerApi for TcpLedgerClient {
    async fn add_transaction(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        let mut request = transaction.clone();
        request.operation_type = OperationType::Add;

        self.exchange(&request).await?;
        info!(
            addr = %self.config.node_address,
            ciphertext_len = request.ciphertext.len(),
            "[ml-01] Sent transaction to ledger"
        );
        Ok(())
    }

    async fn get_all_by_hash(
        &self,
        patient_hash: &IdentityHash,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let request = codec::query(OperationType::GetAll, *patient_hash);
        let transactions = self.exchange(&request).await?.unwrap_or_default();
        info!(
            addr = %self.config.node_address,
            count = transactions.len(),
            "[ml-01] Received transactions from ledger"
        );
        Ok(transactions)
    }
}
