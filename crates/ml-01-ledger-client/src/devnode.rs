//! # Development Ledger Node
//!
//! A minimal node speaking the same framed protocol as the client, for
//! local runs and end-to-end tests.
//!
//! - `Add` appends the transaction. Nothing is written back.
//! - `Get` and `GetAll` answer with every stored transaction in append
//!   order, regardless of the patient hash in the query.
//!
//! Each accepted connection carries exactly one request.

use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use shared_types::OperationType;

use crate::adapters::framing::{read_frame, write_frame};
use crate::adapters::memory::LedgerStore;
use crate::config::DEFAULT_MAX_FRAME_BYTES;
use crate::domain::codec;
use crate::domain::{LedgerError, Stage};

/// A bound, not yet running node.
pub struct DevLedgerNode {
    listener: TcpListener,
    store: LedgerStore,
    max_frame_bytes: usize,
}

/// Handle to a running node.
pub struct DevNodeHandle {
    local_addr: SocketAddr,
    store: LedgerStore,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl DevLedgerNode {
    /// Bind to `addr` with an empty ledger.
    pub async fn bind(addr: &str) -> Result<Self, LedgerError> {
        Self::bind_with_store(addr, LedgerStore::new()).await
    }

    /// Bind to `addr` serving an existing store.
    pub async fn bind_with_store(addr: &str, store: LedgerStore) -> Result<Self, LedgerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| LedgerError::Connect {
                addr: addr.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            listener,
            store,
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
        })
    }

    /// Address actually bound (useful with port 0).
    pub fn local_addr(&self) -> Result<SocketAddr, LedgerError> {
        self.listener.local_addr().map_err(|e| LedgerError::Network {
            stage: Stage::Connect,
            reason: e.to_string(),
        })
    }

    /// Backing store.
    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// Serve until the process exits.
    pub async fn run(self) {
        let (_keep, never) = oneshot::channel::<()>();
        self.serve(never).await;
    }

    /// Start serving on a background task.
    pub fn spawn(self) -> Result<DevNodeHandle, LedgerError> {
        let local_addr = self.local_addr()?;
        let store = self.store.clone();
        let (tx, rx) = oneshot::channel();
        let task = tokio::spawn(self.serve(rx));
        Ok(DevNodeHandle {
            local_addr,
            store,
            shutdown: Some(tx),
            task,
        })
    }

    async fn serve(self, mut shutdown: oneshot::Receiver<()>) {
        info!(
            addr = ?self.listener.local_addr().ok(),
            "[ml-01] Dev ledger node listening"
        );
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("[ml-01] Dev ledger node stopping");
                    return;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((socket, peer)) => {
                        let store = self.store.clone();
                        let limit = self.max_frame_bytes;
                        tokio::spawn(async move {
                            if let Err(e) = handle_connection(socket, &store, limit).await {
                                warn!(%peer, "[ml-01] Dev node request failed: {}", e);
                            }
                        });
                    }
                    Err(e) => warn!("[ml-01] Dev node accept failed: {}", e),
                }
            }
        }
    }
}

async fn handle_connection(
    mut socket: TcpStream,
    store: &LedgerStore,
    max_frame_bytes: usize,
) -> Result<(), LedgerError> {
    let frame = read_frame(&mut socket, max_frame_bytes).await?;
    let request = codec::decode_request(&frame)?;

    match request.operation_type {
        OperationType::Add => {
            debug!(
                patient = %hex::encode(&request.patient_hash[..4]),
                "[ml-01] Dev node appended transaction"
            );
            store.append(request);
        }
        OperationType::Get | OperationType::GetAll => {
            let transactions = store.snapshot();
            debug!(
                count = transactions.len(),
                "[ml-01] Dev node answering {}", request.operation_type
            );
            let response = codec::encode_response(&transactions)?;
            write_frame(&mut socket, &response).await?;
        }
    }
    Ok(())
}

impl DevNodeHandle {
    /// Address the node is listening on.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Backing store.
    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// Stop accepting connections and wait for the accept loop to exit.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.task.await;
    }
}
