//! # ML-02 Record Pipeline
//!
//! Turns clinical records into signed, sealed ledger transactions and back.
//!
//! **Subsystem ID:** 2  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Guarantees
//!
//! | Guarantee | Mechanism |
//! |-----------|-----------|
//! | Confidentiality | AES-256-GCM under a passphrase-derived key |
//! | Authorship | ECDSA signature over the sealed bytes |
//! | Patient isolation | Constant-time patient hash match before decryption |
//! | Non-blocking writes | Ledger send on a spawned task (`DeliveryHandle`) |
//!
//! The record key is `SHA-256(passphrase)`: unsalted and not stretched. A
//! low-entropy card passphrase can be brute-forced from any ciphertext on
//! the ledger.
//!
//! ## Module Structure
//!
//! ```text
//! ml-02-record-pipeline/
//! ├── domain/          # EnvelopeBuilder, TrustedSigners, TransactionLog, errors
//! ├── ports/           # RecordServiceApi (inbound) + identity/key sources (outbound)
//! └── application/     # ClinicContext, DeliveryHandle, SearchPipeline, RecordService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::{
    filter_transactions, ClinicContext, DeliveryHandle, RecordService, SearchPipeline,
};
pub use domain::{
    DeliveryError, EnvelopeBuilder, EnvelopeError, RecordServiceError, SearchError, SourceError,
    TransactionLog, TrustedSigners,
};
pub use ports::{
    CreatedTransaction, IdentitySource, PassphraseSource, RecordServiceApi, SigningKeyStore,
    StaticIdentitySource, StaticKeyStore, StaticPassphraseSource,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
