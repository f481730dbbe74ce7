//! # Shared Types Crate
//!
//! Domain entities exchanged between the MediLedger crates.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Doctor`, `Patient`, `Record`, and the ledger
//!   `Transaction` are defined once, here.
//! - **Wire Stability**: `Transaction` field order is the ledger protocol's
//!   field order. Reordering fields breaks every deployed node.
//! - **Fixed-Length Identities**: identity hashes are `[u8; 32]`, never
//!   variable-length slices.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
