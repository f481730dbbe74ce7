//! # Envelope Builder
//!
//! Assembles a `Transaction` from its parts.
//!
//! | Operation     | patient_hash | doctor_hash | ciphertext | signature |
//! |---------------|--------------|-------------|------------|-----------|
//! | Add           | required     | required    | non-empty  | non-empty |
//! | Get / GetAll  | required     | zeroed      | empty      | empty     |
//!
//! Only structure is checked here. Whether the signature verifies or the
//! ciphertext opens is the concern of the search pipeline.

use shared_types::{IdentityHash, OperationType, Transaction, EMPTY_HASH};

use super::errors::EnvelopeError;

/// Builder for ledger transactions.
#[derive(Debug, Clone)]
pub struct EnvelopeBuilder {
    operation_type: OperationType,
    patient_hash: Option<IdentityHash>,
    doctor_hash: Option<IdentityHash>,
    ciphertext: Vec<u8>,
    signature: Vec<u8>,
}

impl EnvelopeBuilder {
    /// Start an envelope for `operation_type`.
    pub fn new(operation_type: OperationType) -> Self {
        Self {
            operation_type,
            patient_hash: None,
            doctor_hash: None,
            ciphertext: Vec::new(),
            signature: Vec::new(),
        }
    }

    /// Start an `Add` envelope.
    pub fn add() -> Self {
        Self::new(OperationType::Add)
    }

    /// Set the patient hash.
    pub fn patient_hash(mut self, hash: IdentityHash) -> Self {
        self.patient_hash = Some(hash);
        self
    }

    /// Set the doctor hash.
    pub fn doctor_hash(mut self, hash: IdentityHash) -> Self {
        self.doctor_hash = Some(hash);
        self
    }

    /// Set the sealed record bytes.
    pub fn ciphertext(mut self, ciphertext: Vec<u8>) -> Self {
        self.ciphertext = ciphertext;
        self
    }

    /// Set the DER signature over the ciphertext.
    pub fn signature(mut self, signature: Vec<u8>) -> Self {
        self.signature = signature;
        self
    }

    /// Produce the transaction.
    pub fn build(self) -> Result<Transaction, EnvelopeError> {
        let operation = self.operation_type;
        let incomplete = |field| EnvelopeError::Incomplete { operation, field };
        let unexpected = |field| EnvelopeError::UnexpectedField { operation, field };

        let patient_hash = self.patient_hash.ok_or_else(|| incomplete("patient_hash"))?;

        match operation {
            OperationType::Add => {
                let doctor_hash = self.doctor_hash.ok_or_else(|| incomplete("doctor_hash"))?;
                if self.ciphertext.is_empty() {
                    return Err(incomplete("ciphertext"));
                }
                if self.signature.is_empty() {
                    return Err(incomplete("signature"));
                }
                Ok(Transaction {
                    operation_type: operation,
                    patient_hash,
                    doctor_hash,
                    ciphertext: self.ciphertext,
                    signature: self.signature,
                })
            }
            OperationType::Get | OperationType::GetAll => {
                if self.doctor_hash.is_some_and(|h| h != EMPTY_HASH) {
                    return Err(unexpected("doctor_hash"));
                }
                if !self.ciphertext.is_empty() {
                    return Err(unexpected("ciphertext"));
                }
                if !self.signature.is_empty() {
                    return Err(unexpected("signature"));
                }
                Ok(Transaction {
                    operation_type: operation,
                    patient_hash,
                    doctor_hash: EMPTY_HASH,
                    ciphertext: Vec::new(),
                    signature: Vec::new(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ml_01_ledger_client::domain::codec;

    fn full_add() -> EnvelopeBuilder {
        EnvelopeBuilder::add()
            .patient_hash([1u8; 32])
            .doctor_hash([2u8; 32])
            .ciphertext(vec![0xAA; 40])
            .signature(vec![0x30, 0x44])
    }

    #[test]
    fn test_add_envelope_carries_all_parts() {
        let tx = full_add().build().unwrap();
        assert_eq!(tx.operation_type, OperationType::Add);
        assert_eq!(tx.patient_hash, [1u8; 32]);
        assert_eq!(tx.doctor_hash, [2u8; 32]);
        assert_eq!(tx.ciphertext.len(), 40);
        assert_eq!(tx.signature, vec![0x30, 0x44]);
    }

    #[test]
    fn test_add_without_signature_is_incomplete() {
        let err = full_add().signature(Vec::new()).build().unwrap_err();
        assert_eq!(
            err,
            EnvelopeError::Incomplete {
                operation: OperationType::Add,
                field: "signature"
            }
        );
    }

    #[test]
    fn test_add_without_ciphertext_is_incomplete() {
        let err = full_add().ciphertext(Vec::new()).build().unwrap_err();
        assert!(matches!(
            err,
            EnvelopeError::Incomplete {
                field: "ciphertext",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_hashes_rejected() {
        let err = EnvelopeBuilder::add()
            .doctor_hash([2u8; 32])
            .ciphertext(vec![1])
            .signature(vec![1])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            EnvelopeError::Incomplete {
                field: "patient_hash",
                ..
            }
        ));

        let err = EnvelopeBuilder::add()
            .patient_hash([1u8; 32])
            .ciphertext(vec![1])
            .signature(vec![1])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            EnvelopeError::Incomplete {
                field: "doctor_hash",
                ..
            }
        ));
    }

    #[test]
    fn test_query_envelope_is_zeroed() {
        let tx = EnvelopeBuilder::new(OperationType::GetAll)
            .patient_hash([9u8; 32])
            .build()
            .unwrap();
        assert_eq!(tx.operation_type, OperationType::GetAll);
        assert_eq!(tx.doctor_hash, EMPTY_HASH);
        assert!(tx.ciphertext.is_empty());
        assert!(tx.signature.is_empty());

        // Same bytes the ledger client puts on the wire.
        assert_eq!(tx, codec::query(OperationType::GetAll, [9u8; 32]));
    }

    #[test]
    fn test_query_envelope_refuses_payload() {
        let err = EnvelopeBuilder::new(OperationType::Get)
            .patient_hash([9u8; 32])
            .ciphertext(vec![1])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            EnvelopeError::UnexpectedField {
                field: "ciphertext",
                ..
            }
        ));
    }
}
