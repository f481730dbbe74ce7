//! # Search Filtering
//!
//! Two patients share one ledger. A search returns only the requester's
//! records, and only those whose payload contains the query.

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use ml_02_record_pipeline::RecordServiceApi;
    use shared_crypto::Passphrase;
    use shared_crypto::SigningKeyPair;
    use shared_types::Identity;

    #[tokio::test]
    async fn test_search_returns_only_requesters_matching_records() {
        let node = start_node().await;
        let key = SigningKeyPair::generate();
        let dan = patient(1, "Dan", "1900101000001");
        let eva = patient(2, "Eva", "2900101000002");

        let dan_clinic = clinic(&node, &key, &dan, "dan-pin");
        let eva_clinic = clinic(&node, &key, &eva, "eva-pin");

        dan_clinic
            .create_record("Diagnosed with Flu")
            .await
            .unwrap()
            .delivery
            .wait()
            .await
            .unwrap();
        eva_clinic
            .create_record("Diagnosed with flu as well")
            .await
            .unwrap()
            .delivery
            .wait()
            .await
            .unwrap();
        settle(node.store(), 2).await;

        let found = dan_clinic.search_own_records("flu").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].patient, dan);
        assert_eq!(found[0].payload, "Diagnosed with Flu");

        assert!(dan_clinic.search_own_records("covid").await.unwrap().is_empty());

        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_search_by_explicit_identity() {
        let node = start_node().await;
        let key = SigningKeyPair::generate();
        let dan = patient(1, "Dan", "1900101000001");
        let eva = patient(2, "Eva", "2900101000002");
        let dan_clinic = clinic(&node, &key, &dan, "dan-pin");

        dan_clinic
            .create_record("Fractured wrist")
            .await
            .unwrap()
            .delivery
            .wait()
            .await
            .unwrap();
        settle(node.store(), 1).await;

        let as_dan = dan_clinic
            .search_records(&Identity::Patient(dan), &Passphrase::new("dan-pin"), "WRIST")
            .await
            .unwrap();
        assert_eq!(as_dan.len(), 1);

        // Eva's hash matches nothing, so nothing is decrypted.
        let as_eva = dan_clinic
            .search_records(&Identity::Patient(eva), &Passphrase::new("eva-pin"), "")
            .await
            .unwrap();
        assert!(as_eva.is_empty());

        node.shutdown().await;
    }

    #[tokio::test]
    async fn test_results_keep_ledger_order() {
        let node = start_node().await;
        let key = SigningKeyPair::generate();
        let dan = patient(1, "Dan", "1900101000001");
        let service = clinic(&node, &key, &dan, "dan-pin");

        for (i, payload) in ["flu: fever", "x-ray", "flu: recovered"].into_iter().enumerate() {
            service.create_record(payload).await.unwrap().delivery.wait().await.unwrap();
            settle(node.store(), i + 1).await;
        }

        let found = service.search_own_records("flu").await.unwrap();
        let payloads: Vec<_> = found.iter().map(|r| r.payload.as_str()).collect();
        assert_eq!(payloads, vec!["flu: fever", "flu: recovered"]);
        let ids: Vec<_> = found.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);

        node.shutdown().await;
    }
}
