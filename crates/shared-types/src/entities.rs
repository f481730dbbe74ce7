//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Identities**: `Doctor`, `Patient`, `Identity`
//! - **Records**: `Record` (plaintext, never leaves the process unencrypted)
//! - **Ledger**: `Transaction`, `OperationType`, `IdentityHash`

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::EntityError;

// =============================================================================
// CLUSTER A: IDENTITIES
// =============================================================================

/// Length of an identity hash in bytes (SHA-256 output).
pub const IDENTITY_HASH_LEN: usize = 32;

/// Fixed-length fingerprint of a canonicalized identity.
pub type IdentityHash = [u8; IDENTITY_HASH_LEN];

/// All-zero hash used in query envelopes where a field is unused.
pub const EMPTY_HASH: IdentityHash = [0u8; IDENTITY_HASH_LEN];

/// Doctor profile, as read from the doctor's electronic card.
///
/// JSON field names follow the card format (`firstname`, `type`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Doctor {
    /// Numeric doctor identifier.
    pub id: i64,
    /// Given name.
    #[serde(rename = "firstname")]
    pub first_name: String,
    /// Family name.
    #[serde(rename = "lastname")]
    pub last_name: String,
    /// Contact e-mail.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Specialty / category.
    #[serde(rename = "type")]
    pub doctor_type: String,
}

/// Patient profile, as read from the patient's electronic card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Patient {
    /// Numeric patient identifier.
    pub id: i64,
    /// Given name.
    #[serde(rename = "firstname")]
    pub first_name: String,
    /// Family name.
    #[serde(rename = "lastname")]
    pub last_name: String,
    /// National personal identification number.
    pub cnp: String,
    /// Contact phone.
    pub phone: String,
}

/// Either kind of profile that can be fingerprinted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Identity {
    /// A doctor profile.
    Doctor(Doctor),
    /// A patient profile.
    Patient(Patient),
}

impl Identity {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Identity::Doctor(_) => "doctor",
            Identity::Patient(_) => "patient",
        }
    }

    /// Returns the doctor profile, if this is one.
    pub fn into_doctor(self) -> Option<Doctor> {
        match self {
            Identity::Doctor(d) => Some(d),
            Identity::Patient(_) => None,
        }
    }

    /// Returns the patient profile, if this is one.
    pub fn into_patient(self) -> Option<Patient> {
        match self {
            Identity::Patient(p) => Some(p),
            Identity::Doctor(_) => None,
        }
    }
}

impl From<Doctor> for Identity {
    fn from(doctor: Doctor) -> Self {
        Identity::Doctor(doctor)
    }
}

impl From<Patient> for Identity {
    fn from(patient: Patient) -> Self {
        Identity::Patient(patient)
    }
}

// =============================================================================
// CLUSTER B: RECORDS
// =============================================================================

/// A medical record in plaintext form.
///
/// Exists only while being sealed (write path) or after being opened
/// (read path). Only its sealed form is sent to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Sequence number of this record for the patient.
    pub id: i64,
    /// Authoring doctor.
    pub doctor: Doctor,
    /// Subject patient.
    pub patient: Patient,
    /// Free-text clinical content.
    pub payload: String,
    /// Creation time (RFC 850 style).
    pub timestamp: String,
}

// =============================================================================
// CLUSTER C: LEDGER
// =============================================================================

/// Ledger protocol operation code.
///
/// Encoded on the wire as a single `u8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum OperationType {
    /// Append a transaction.
    Add = 0,
    /// Fetch a single transaction.
    Get = 1,
    /// Fetch every transaction for a patient hash.
    GetAll = 2,
}

impl OperationType {
    /// Whether the node answers this operation on the same connection.
    pub fn expects_response(self) -> bool {
        !matches!(self, OperationType::Add)
    }
}

impl From<OperationType> for u8 {
    fn from(op: OperationType) -> u8 {
        op as u8
    }
}

impl TryFrom<u8> for OperationType {
    type Error = EntityError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(OperationType::Add),
            1 => Ok(OperationType::Get),
            2 => Ok(OperationType::GetAll),
            other => Err(EntityError::UnknownOperationType(other)),
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationType::Add => write!(f, "add"),
            OperationType::Get => write!(f, "get"),
            OperationType::GetAll => write!(f, "get-all"),
        }
    }
}

/// The unit exchanged with the ledger node.
///
/// Field order is the wire order: operation, patient hash, doctor hash,
/// ciphertext (length-prefixed), signature (length-prefixed).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// What the node should do with this transaction.
    pub operation_type: OperationType,
    /// Fingerprint of the subject patient.
    pub patient_hash: IdentityHash,
    /// Fingerprint of the authoring doctor.
    pub doctor_hash: IdentityHash,
    /// Sealed record bytes (nonce || ciphertext || tag).
    pub ciphertext: Vec<u8>,
    /// DER-encoded ECDSA signature over `ciphertext`.
    pub signature: Vec<u8>,
}

// Ciphertext is noise in logs; show sizes instead.
impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("operation_type", &self.operation_type)
            .field("patient_hash", &hex::encode(self.patient_hash))
            .field("doctor_hash", &hex::encode(self.doctor_hash))
            .field("ciphertext_len", &self.ciphertext.len())
            .field("signature", &hex::encode(&self.signature))
            .finish()
    }
}
