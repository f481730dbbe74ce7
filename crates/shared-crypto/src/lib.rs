//! # Shared Crypto - Record Pipeline Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256 over a canonical encoding | Identity fingerprints |
//! | `symmetric` | AES-256-GCM | Sealing medical records |
//! | `ecdsa` | secp256k1, DER signatures | Signing sealed records |
//!
//! ## Security Properties
//!
//! - **AES-256-GCM**: 96-bit random nonce per seal, 128-bit tag, any bit flip
//!   in nonce or ciphertext fails authentication
//! - **secp256k1**: randomized nonces, low-S signatures, SHA-256 message digest
//! - **Key hygiene**: derived record keys and signing scalars are zeroized on drop
//!
//! ## Known Limitation
//!
//! Record keys are `SHA-256(passphrase)`: no salt and no work factor. A
//! salted, memory-hard KDF would change the sealed-bytes layout and is not
//! implemented.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod symmetric;

// Re-exports
pub use ecdsa::{sign, verify, SigningKeyPair, VerifyingPublicKey};
pub use errors::CryptoError;
pub use hashing::{hash_doctor, hash_identity, hash_patient, hashes_equal, IdentityHasher};
pub use symmetric::{decrypt_record, encrypt_record, Passphrase, RecordKey};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
