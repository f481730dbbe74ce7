//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// AEAD tag check failed: wrong passphrase, tampering, or corrupted transport.
    #[error("Authentication failed: sealed record could not be opened")]
    Authentication,

    /// Decryption succeeded but the plaintext is not a record.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,
}
