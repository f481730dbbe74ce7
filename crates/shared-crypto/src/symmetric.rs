//! # Record Sealing
//!
//! AES-256-GCM encryption of medical records under a passphrase-derived key.
//!
//! ## Sealed Layout
//!
//! ```text
//! [ nonce (12 bytes) ][ ciphertext (n bytes) ][ tag (16 bytes) ]
//! ```
//!
//! The nonce travels with the ciphertext, so a sealed record is
//! self-describing. Nonce and ciphertext are both covered by the tag.
//!
//! ## Key Derivation
//!
//! `key = SHA-256(passphrase)`. Unsalted and unstretched; see the crate docs.

use crate::CryptoError;
use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use sha2::{Digest, Sha256};
use shared_types::Record;
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// AES-GCM tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Caller-supplied passphrase (e.g. read from the patient's card).
///
/// Zeroized on drop and never printed.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct Passphrase(String);

impl Passphrase {
    /// Wrap a passphrase.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Whether the passphrase is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passphrase(<redacted>)")
    }
}

/// Record key (256-bit), alive for a single seal/open call.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct RecordKey([u8; 32]);

impl RecordKey {
    /// Derive from a passphrase.
    pub fn derive(passphrase: &Passphrase) -> Self {
        let mut digest = Sha256::digest(passphrase.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        digest.as_mut_slice().zeroize();
        Self(bytes)
    }

    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Seal arbitrary plaintext. Returns `nonce || ciphertext || tag`.
///
/// # Errors
///
/// Returns `CryptoError::EncryptionFailed` if the AEAD rejects the input.
pub fn seal(key: &RecordKey, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Open bytes produced by [`seal`].
///
/// # Errors
///
/// Returns `CryptoError::Authentication` if the input is truncated or the
/// tag does not verify.
pub fn open(key: &RecordKey, sealed: &[u8]) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    if sealed.len() < NONCE_LEN + TAG_LEN {
        return Err(CryptoError::Authentication);
    }
    let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| CryptoError::Authentication)
}

/// Serialize and seal a record under a passphrase-derived key.
///
/// # Errors
///
/// Returns `CryptoError::EncryptionFailed` if the record cannot be
/// serialized or sealed.
pub fn encrypt_record(record: &Record, passphrase: &Passphrase) -> Result<Vec<u8>, CryptoError> {
    let plaintext = Zeroizing::new(
        bincode::serialize(record).map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?,
    );
    let key = RecordKey::derive(passphrase);
    seal(&key, &plaintext)
}

/// Open and deserialize a sealed record.
///
/// # Errors
///
/// - `CryptoError::Authentication`: wrong passphrase, tampering, truncation
/// - `CryptoError::MalformedRecord`: authentic bytes that are not a record
pub fn decrypt_record(sealed: &[u8], passphrase: &Passphrase) -> Result<Record, CryptoError> {
    let key = RecordKey::derive(passphrase);
    let plaintext = open(&key, sealed)?;
    bincode::deserialize(&plaintext).map_err(|e| CryptoError::MalformedRecord(e.to_string()))
}
