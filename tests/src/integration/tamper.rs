//! # Tamper Detection
//!
//! Ledger entries whose signature does not cover their ciphertext, or that
//! were signed by an untrusted key, are excluded before decryption. An entry
//! that passes those checks but does not open is an integrity fault.

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use ml_02_record_pipeline::{RecordServiceApi, SearchError};
    use shared_crypto::{encrypt_record, hash_doctor, hash_patient, Passphrase, SigningKeyPair};
    use shared_types::{OperationType, Record, Transaction};

    fn forged(p: &shared_types::Patient, key: &SigningKeyPair, signed_over: &[u8]) -> Transaction {
        let record = Record {
            id: 99,
            doctor: doctor(),
            patient: p.clone(),
            payload: "Diagnosed with Flu (forged)".into(),
            timestamp: String::new(),
        };
        Transaction {
            operation_type: OperationType::Add,
            patient_hash: hash_patient(p),
            doctor_hash: hash_doctor(&doctor()),
            ciphertext: encrypt_record(&record, &Passphrase::new("pin")).unwrap(),
            signature: key.sign(signed_over).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_signature_over_other_ciphertext_excluded() {
        let node = start_node().await;
        let key = SigningKeyPair::generate();
        let dan = patient(1, "Dan", "1900101000001");
        let service = clinic(&node, &key, &dan, "pin");

        service.create_record("Diagnosed with Flu").await.unwrap().delivery.wait().await.unwrap();
        node.store().append(forged(&dan, &key, b"a different ciphertext"));
        settle(node.store(), 2).await;

        let found = service.search_own_records("flu").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].payload, "Diagnosed with Flu");

        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_untrusted_signer_excluded() {
        let node = start_node().await;
        let key = SigningKeyPair::generate();
        let intruder = SigningKeyPair::generate();
        let dan = patient(1, "Dan", "1900101000001");
        let service = clinic(&node, &key, &dan, "pin");

        let mut tx = forged(&dan, &intruder, b"");
        tx.signature = intruder.sign(&tx.ciphertext).unwrap();
        node.store().append(tx);

        assert!(service.search_own_records("").await.unwrap().is_empty());
        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_validly_signed_unreadable_entry_is_integrity_fault() {
        let node = start_node().await;
        let key = SigningKeyPair::generate();
        let dan = patient(1, "Dan", "1900101000001");
        let service = clinic(&node, &key, &dan, "pin");

        // Correct doctor key, correct patient hash, wrong passphrase.
        let record = Record {
            patient: dan.clone(),
            doctor: doctor(),
            ..Default::default()
        };
        let ciphertext = encrypt_record(&record, &Passphrase::new("not-the-card")).unwrap();
        node.store().append(Transaction {
            operation_type: OperationType::Add,
            patient_hash: hash_patient(&dan),
            doctor_hash: hash_doctor(&doctor()),
            signature: key.sign(&ciphertext).unwrap(),
            ciphertext,
        });

        let err = service.search_own_records("").await.unwrap_err();
        assert!(matches!(err, SearchError::IntegrityFault { index: 0, .. }));
        assert!(!err.is_degraded());

        node.shutdown().await;
    }
}
