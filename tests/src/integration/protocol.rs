//! # Protocol Round-Trip
//!
//! Add for patient hash `H` with ciphertext `C1`; a later GetAll for `H`
//! returns a set containing `(H, C1)`.

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use ml_01_ledger_client::{LedgerApi, LedgerError};
    use ml_02_record_pipeline::{EnvelopeBuilder, RecordServiceApi};
    use shared_crypto::{encrypt_record, hash_doctor, hash_patient, Passphrase, SigningKeyPair};
    use shared_types::{OperationType, Record};

    #[tokio::test]
    async fn test_add_then_get_all_returns_ciphertext() {
        let node = start_node().await;
        let client = client_for(&node);
        let key = SigningKeyPair::generate();
        let p = patient(1, "Dan", "1900101000001");

        let record = Record {
            id: 1,
            doctor: doctor(),
            patient: p.clone(),
            payload: "Diagnosed with Flu".into(),
            timestamp: "Monday, 02-Jan-06 15:04:05 UTC".into(),
        };
        let c1 = encrypt_record(&record, &Passphrase::new("pin")).unwrap();
        let tx = EnvelopeBuilder::add()
            .patient_hash(hash_patient(&p))
            .doctor_hash(hash_doctor(&doctor()))
            .signature(key.sign(&c1).unwrap())
            .ciphertext(c1.clone())
            .build()
            .unwrap();

        client.add_transaction(&tx).await.unwrap();
        settle(node.store(), 1).await;

        let returned = client.get_all_by_hash(&hash_patient(&p)).await.unwrap();
        assert!(returned
            .iter()
            .any(|t| t.patient_hash == hash_patient(&p) && t.ciphertext == c1));
        assert!(returned.iter().all(|t| t.operation_type == OperationType::Add));

        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_service_write_reaches_node() {
        let node = start_node().await;
        let key = SigningKeyPair::generate();
        let p = patient(1, "Dan", "1900101000001");
        let service = clinic(&node, &key, &p, "pin");

        let created = service.create_record("Annual checkup").await.unwrap();
        created.delivery.wait().await.unwrap();
        settle(node.store(), 1).await;

        assert_eq!(node.store().snapshot(), vec![created.transaction.clone()]);
        assert_eq!(service.transactions(), vec![created.transaction]);

        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_record_ids_follow_ledger_count() {
        let node = start_node().await;
        let key = SigningKeyPair::generate();
        let p = patient(1, "Dan", "1900101000001");
        let service = clinic(&node, &key, &p, "pin");

        for expected in 1..=3 {
            let created = service.create_record("visit").await.unwrap();
            assert_eq!(created.record.id, expected);
            created.delivery.wait().await.unwrap();
            settle(node.store(), expected as usize).await;
        }

        assert_eq!(service.record(2).map(|r| r.id), Some(2));
        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_stopped_node_is_a_degraded_failure() {
        let node = start_node().await;
        let client = client_for(&node);
        node.shutdown().await;

        let err = client.get_all_by_hash(&[0u8; 32]).await.unwrap_err();
        assert!(err.is_degraded());
        assert!(matches!(err, LedgerError::Connect { .. }));
    }
}
