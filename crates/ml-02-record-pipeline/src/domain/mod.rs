//! # Domain Module
//!
//! Envelope assembly, signer directory, local log, and errors.

pub mod envelope;
pub mod errors;
pub mod signers;
pub mod transaction_log;

pub use envelope::EnvelopeBuilder;
pub use errors::*;
pub use signers::TrustedSigners;
pub use transaction_log::TransactionLog;
