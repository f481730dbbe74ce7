//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implementations of `LedgerApi`: TCP for real nodes, in-memory for tests.

pub(crate) mod framing;
pub(crate) mod memory;
pub(crate) mod tcp;

pub use framing::{read_frame, write_frame};
pub use memory::{InMemoryLedger, LedgerStore};
pub use tcp::TcpLedgerClient;
