//! # Clinic Context
//!
//! Who is writing, with which key, for which patient. Built once at startup
//! from the collaborator ports and shared by every request.
//!
//! The doctor profile and signing key are read once. The patient and the
//! passphrase are read from their sources on every call, since the card in
//! the reader can change between requests.

use std::fmt;
use std::sync::Arc;
use tracing::info;

use shared_crypto::{hash_doctor, Passphrase, SigningKeyPair, VerifyingPublicKey};
use shared_types::{Doctor, IdentityHash, Patient};

use crate::domain::SourceError;
use crate::ports::{IdentitySource, PassphraseSource, SigningKeyStore};

/// Process-wide clinic state.
pub struct ClinicContext {
    doctor: Doctor,
    doctor_hash: IdentityHash,
    signing_key: SigningKeyPair,
    patient_source: Arc<dyn IdentitySource>,
    passphrase_source: Arc<dyn PassphraseSource>,
}

impl ClinicContext {
    /// Read the doctor profile and signing key, and keep the per-request
    /// sources.
    pub fn initialize(
        doctor_source: &dyn IdentitySource,
        key_store: &dyn SigningKeyStore,
        patient_source: Arc<dyn IdentitySource>,
        passphrase_source: Arc<dyn PassphraseSource>,
    ) -> Result<Self, SourceError> {
        let identity = doctor_source.get_identity()?;
        let actual = identity.kind();
        let doctor = identity
            .into_doctor()
            .ok_or(SourceError::WrongIdentityKind {
                expected: "doctor",
                actual,
            })?;
        let signing_key = key_store.get_signing_key_pair()?;
        let doctor_hash = hash_doctor(&doctor);

        info!(
            doctor_id = doctor.id,
            doctor_hash = %hex::encode(doctor_hash),
            "[ml-02] Clinic context initialized"
        );

        Ok(Self {
            doctor,
            doctor_hash,
            signing_key,
            patient_source,
            passphrase_source,
        })
    }

    /// Authoring doctor.
    pub fn doctor(&self) -> &Doctor {
        &self.doctor
    }

    /// Hash of the authoring doctor.
    pub fn doctor_hash(&self) -> IdentityHash {
        self.doctor_hash
    }

    /// Doctor's signing key.
    pub fn signing_key(&self) -> &SigningKeyPair {
        &self.signing_key
    }

    /// Doctor's public key.
    pub fn public_key(&self) -> VerifyingPublicKey {
        self.signing_key.public_key()
    }

    /// Patient currently presented to the reader.
    pub fn current_patient(&self) -> Result<Patient, SourceError> {
        let identity = self.patient_source.get_identity()?;
        let actual = identity.kind();
        identity.into_patient().ok_or(SourceError::WrongIdentityKind {
            expected: "patient",
            actual,
        })
    }

    /// Passphrase on the current patient's card.
    pub fn passphrase(&self) -> Result<Passphrase, SourceError> {
        self.passphrase_source.get_passphrase_key()
    }
}

impl fmt::Debug for ClinicContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClinicContext")
            .field("doctor_id", &self.doctor.id)
            .field("doctor_hash", &hex::encode(self.doctor_hash))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{StaticIdentitySource, StaticKeyStore, StaticPassphraseSource};
    use shared_types::Identity;

    fn doctor() -> Doctor {
        Doctor {
            id: 1,
            first_name: "Ioana".into(),
            last_name: "Marin".into(),
            email: "ioana@clinic.ro".into(),
            phone: "0700".into(),
            doctor_type: "GP".into(),
        }
    }

    fn patient() -> Patient {
        Patient {
            id: 9,
            first_name: "Dan".into(),
            last_name: "Luca".into(),
            cnp: "1900101000000".into(),
            phone: "0711".into(),
        }
    }

    fn build(
        doctor_identity: Identity,
        patient_identity: Identity,
    ) -> Result<ClinicContext, SourceError> {
        let key = SigningKeyPair::generate();
        ClinicContext::initialize(
            &StaticIdentitySource(doctor_identity),
            &StaticKeyStore::new(&key),
            Arc::new(StaticIdentitySource(patient_identity)),
            Arc::new(StaticPassphraseSource(Passphrase::new("pin"))),
        )
    }

    #[test]
    fn test_initialize_reads_doctor_and_key() {
        let ctx = build(Identity::Doctor(doctor()), Identity::Patient(patient())).unwrap();
        assert_eq!(ctx.doctor(), &doctor());
        assert_eq!(ctx.doctor_hash(), hash_doctor(&doctor()));
        assert_eq!(ctx.current_patient().unwrap(), patient());
        assert_eq!(ctx.passphrase().unwrap().as_bytes(), b"pin");
    }

    #[test]
    fn test_patient_card_in_doctor_slot_rejected() {
        let err = build(Identity::Patient(patient()), Identity::Patient(patient())).unwrap_err();
        assert_eq!(
            err,
            SourceError::WrongIdentityKind {
                expected: "doctor",
                actual: "patient"
            }
        );
    }

    #[test]
    fn test_doctor_card_in_patient_slot_rejected() {
        let ctx = build(Identity::Doctor(doctor()), Identity::Doctor(doctor())).unwrap();
        assert!(matches!(
            ctx.current_patient(),
            Err(SourceError::WrongIdentityKind {
                expected: "patient",
                ..
            })
        ));
    }
}
