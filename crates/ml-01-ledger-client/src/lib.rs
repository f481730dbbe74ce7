//! # ML-01 Ledger Client
//!
//! Client for the append-only ledger node.
//!
//! **Subsystem ID:** 1  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Protocol
//!
//! One TCP connection per call. Requests and responses are single frames:
//!
//! ```text
//! +----------------+---------------------------------------------+
//! | u32 BE length  | bincode(Transaction) or bincode(Vec<Tx>)    |
//! +----------------+---------------------------------------------+
//! ```
//!
//! | Operation | Request                    | Response                  |
//! |-----------|----------------------------|---------------------------|
//! | Add       | full signed transaction    | none                      |
//! | GetAll    | patient hash only          | every stored transaction  |
//!
//! ## Module Structure
//!
//! ```text
//! ml-01-ledger-client/
//! ├── domain/          # Wire codec, LedgerError
//! ├── ports/           # LedgerApi
//! ├── adapters/        # TcpLedgerClient, InMemoryLedger, frame I/O
//! ├── devnode.rs       # DevLedgerNode for local runs
//! └── config.rs        # LedgerClientConfig, RetryPolicy
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod devnode;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{InMemoryLedger, LedgerStore, TcpLedgerClient};
pub use config::{ConfigError, LedgerClientConfig, RetryPolicy, DEFAULT_NODE_ADDRESS};
pub use devnode::{DevLedgerNode, DevNodeHandle};
pub use domain::{LedgerError, Stage};
pub use ports::LedgerApi;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
