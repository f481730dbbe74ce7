//! # Domain Module
//!
//! Wire codec and error types for the ledger protocol.

pub mod codec;
pub mod errors;

pub use errors::*;
