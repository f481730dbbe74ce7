//! # Outbound Ports (Driven Ports / SPI)
//!
//! Collaborators the pipeline reads identities and key material from.
//! All are read-only to this crate.

use shared_crypto::{Passphrase, SigningKeyPair};
use shared_types::Identity;

use crate::domain::SourceError;

/// Doctor or patient profile source (electronic card, profile file).
pub trait IdentitySource: Send + Sync {
    /// Read the current identity.
    fn get_identity(&self) -> Result<Identity, SourceError>;
}

/// Patient passphrase source (card reader).
pub trait PassphraseSource: Send + Sync {
    /// Read the passphrase the record key is derived from.
    fn get_passphrase_key(&self) -> Result<Passphrase, SourceError>;
}

/// Doctor signing key store.
pub trait SigningKeyStore: Send + Sync {
    /// Load the doctor's signing key pair.
    fn get_signing_key_pair(&self) -> Result<SigningKeyPair, SourceError>;
}

// =============================================================================
// Fixed-value implementations (tests, local setup)
// =============================================================================

/// Identity source returning a fixed identity.
#[derive(Clone, Debug)]
pub struct StaticIdentitySource(pub Identity);

impl IdentitySource for StaticIdentitySource {
    fn get_identity(&self) -> Result<Identity, SourceError> {
        Ok(self.0.clone())
    }
}

/// Passphrase source returning a fixed passphrase.
#[derive(Clone, Debug)]
pub struct StaticPassphraseSource(pub Passphrase);

impl PassphraseSource for StaticPassphraseSource {
    fn get_passphrase_key(&self) -> Result<Passphrase, SourceError> {
        Ok(self.0.clone())
    }
}

/// Key store holding one secret scalar in memory.
pub struct StaticKeyStore {
    secret: zeroize::Zeroizing<[u8; 32]>,
}

impl StaticKeyStore {
    /// Store a copy of `key`.
    pub fn new(key: &SigningKeyPair) -> Self {
        Self {
            secret: key.to_bytes(),
        }
    }
}

impl SigningKeyStore for StaticKeyStore {
    fn get_signing_key_pair(&self) -> Result<SigningKeyPair, SourceError> {
        SigningKeyPair::from_bytes(*self.secret)
            .map_err(|e| SourceError::Malformed(e.to_string()))
    }
}
