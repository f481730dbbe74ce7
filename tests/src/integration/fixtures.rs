//! Shared clinic setup for the scenarios.

use std::sync::Arc;
use std::time::Duration;

use ml_01_ledger_client::{
    DevLedgerNode, DevNodeHandle, LedgerClientConfig, LedgerStore, TcpLedgerClient,
};
use ml_02_record_pipeline::{
    ClinicContext, RecordService, StaticIdentitySource, StaticKeyStore, StaticPassphraseSource,
};
use shared_crypto::{Passphrase, SigningKeyPair};
use shared_types::{Doctor, Identity, Patient};

pub fn doctor() -> Doctor {
    Doctor {
        id: 1,
        first_name: "Ioana".into(),
        last_name: "Marin".into(),
        email: "ioana.marin@clinic.ro".into(),
        phone: "0700000001".into(),
        doctor_type: "GP".into(),
    }
}

pub fn patient(id: i64, first_name: &str, cnp: &str) -> Patient {
    Patient {
        id,
        first_name: first_name.into(),
        last_name: "Popescu".into(),
        cnp: cnp.into(),
        phone: "0711000000".into(),
    }
}

pub async fn start_node() -> DevNodeHandle {
    DevLedgerNode::bind("127.0.0.1:0")
        .await
        .unwrap()
        .spawn()
        .unwrap()
}

pub fn client_for(node: &DevNodeHandle) -> TcpLedgerClient {
    TcpLedgerClient::new(LedgerClientConfig::for_testing(node.local_addr().to_string()))
}

/// A clinic session for `patient` whose card holds `passphrase`.
pub fn clinic(
    node: &DevNodeHandle,
    key: &SigningKeyPair,
    patient: &Patient,
    passphrase: &str,
) -> RecordService<TcpLedgerClient> {
    let context = ClinicContext::initialize(
        &StaticIdentitySource(Identity::Doctor(doctor())),
        &StaticKeyStore::new(key),
        Arc::new(StaticIdentitySource(Identity::Patient(patient.clone()))),
        Arc::new(StaticPassphraseSource(Passphrase::new(passphrase))),
    )
    .unwrap();
    RecordService::new(Arc::new(client_for(node)), context)
}

/// Wait until the node has stored `n` transactions.
///
/// Writes are not acknowledged: a finished delivery only means the frame
/// was flushed, not that the node has stored it.
pub async fn settle(store: &LedgerStore, n: usize) {
    for _ in 0..200 {
        if store.len() >= n {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("ledger never reached {n} transactions (has {})", store.len());
}
