//! # Trusted Signers
//!
//! Directory from doctor identity hash to the public key whose signatures
//! are accepted for that doctor's transactions.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use shared_crypto::{hash_doctor, VerifyingPublicKey};
use shared_types::{Doctor, IdentityHash};

/// Shared signer directory. Clones see the same entries.
#[derive(Clone, Debug, Default)]
pub struct TrustedSigners {
    keys: Arc<RwLock<HashMap<IdentityHash, VerifyingPublicKey>>>,
}

impl TrustedSigners {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trust `key` for transactions authored by `doctor`.
    pub fn register(&self, doctor: &Doctor, key: VerifyingPublicKey) {
        self.register_hash(hash_doctor(doctor), key);
    }

    /// Trust `key` for transactions carrying `doctor_hash`. Replaces any
    /// previous key for that hash.
    pub fn register_hash(&self, doctor_hash: IdentityHash, key: VerifyingPublicKey) {
        self.keys.write().insert(doctor_hash, key);
    }

    /// Key for `doctor_hash`, if trusted.
    pub fn get(&self, doctor_hash: &IdentityHash) -> Option<VerifyingPublicKey> {
        self.keys.read().get(doctor_hash).copied()
    }

    /// Verify `signature` over `message` as coming from `doctor_hash`.
    /// Unknown doctors never verify.
    pub fn verify(&self, doctor_hash: &IdentityHash, message: &[u8], signature: &[u8]) -> bool {
        self.get(doctor_hash)
            .map(|key| key.verify(message, signature))
            .unwrap_or(false)
    }

    /// Number of trusted doctors.
    pub fn len(&self) -> usize {
        self.keys.read().len()
    }

    /// Whether no doctor is trusted.
    pub fn is_empty(&self) -> bool {
        self.keys.read().is_empty()
    }
}
