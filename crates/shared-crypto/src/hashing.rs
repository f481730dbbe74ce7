//! # Identity Hashing
//!
//! Deterministic SHA-256 fingerprints of doctor and patient profiles.
//!
//! ## Canonical Encoding
//!
//! Fields are fed to the digest in declaration order, after a `u32`
//! little-endian variant tag (`0` = doctor, `1` = patient):
//!
//! - integers: 8 bytes little-endian
//! - strings: `u64` little-endian byte length, then UTF-8 bytes
//!
//! This is the same layout `bincode` produces for `Identity`, so a node or
//! tool that hashes `bincode::serialize(&identity)` gets the same fingerprint.
//! Length prefixes make the encoding injective: `("ab", "c")` and
//! `("a", "bc")` never collide.

use sha2::{Digest, Sha256};
use shared_types::{Doctor, Identity, IdentityHash, Patient};
use subtle::ConstantTimeEq;

const DOCTOR_TAG: u32 = 0;
const PATIENT_TAG: u32 = 1;

/// Stateful canonical hasher.
pub struct IdentityHasher {
    inner: Sha256,
}

impl IdentityHasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self {
            inner: Sha256::new(),
        }
    }

    /// Feed a variant tag.
    pub fn tag(&mut self, tag: u32) -> &mut Self {
        self.inner.update(tag.to_le_bytes());
        self
    }

    /// Feed a signed integer field.
    pub fn int(&mut self, value: i64) -> &mut Self {
        self.inner.update(value.to_le_bytes());
        self
    }

    /// Feed a length-prefixed string field.
    pub fn text(&mut self, value: &str) -> &mut Self {
        self.inner.update((value.len() as u64).to_le_bytes());
        self.inner.update(value.as_bytes());
        self
    }

    /// Feed a whole doctor profile.
    pub fn doctor(&mut self, doctor: &Doctor) -> &mut Self {
        self.tag(DOCTOR_TAG)
            .int(doctor.id)
            .text(&doctor.first_name)
            .text(&doctor.last_name)
            .text(&doctor.email)
            .text(&doctor.phone)
            .text(&doctor.doctor_type)
    }

    /// Feed a whole patient profile.
    pub fn patient(&mut self, patient: &Patient) -> &mut Self {
        self.tag(PATIENT_TAG)
            .int(patient.id)
            .text(&patient.first_name)
            .text(&patient.last_name)
            .text(&patient.cnp)
            .text(&patient.phone)
    }

    /// Finalize and return the fingerprint.
    pub fn finalize(self) -> IdentityHash {
        self.inner.finalize().into()
    }
}

impl Default for IdentityHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Fingerprint an identity (one-shot).
pub fn hash_identity(identity: &Identity) -> IdentityHash {
    let mut hasher = IdentityHasher::new();
    match identity {
        Identity::Doctor(d) => hasher.doctor(d),
        Identity::Patient(p) => hasher.patient(p),
    };
    hasher.finalize()
}

/// Fingerprint a doctor profile.
pub fn hash_doctor(doctor: &Doctor) -> IdentityHash {
    let mut hasher = IdentityHasher::new();
    hasher.doctor(doctor);
    hasher.finalize()
}

/// Fingerprint a patient profile.
pub fn hash_patient(patient: &Patient) -> IdentityHash {
    let mut hasher = IdentityHasher::new();
    hasher.patient(patient);
    hasher.finalize()
}

/// Constant-time equality of two identity hashes.
///
/// Gates access to decrypted medical data, so it must not leak the length
/// of the matching prefix through timing.
pub fn hashes_equal(a: &IdentityHash, b: &IdentityHash) -> bool {
    a[..].ct_eq(&b[..]).into()
}
