//! # Clinic Runtime
//!
//! Process wiring for the clinic side.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, then environment)
//! 2. Validate it; any failure ends the process
//! 3. Read the doctor card and signing key into a `ClinicContext`
//! 4. Build the `RecordService` over a TCP ledger client
//!
//! ## Modules
//!
//! - `config` - `RuntimeConfig` and environment loading
//! - `sources` - file-backed profile, passphrase, and key sources

pub mod config;
pub mod sources;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use ml_01_ledger_client::TcpLedgerClient;
use ml_02_record_pipeline::{ClinicContext, RecordService};

use crate::config::RuntimeConfig;
use crate::sources::{HexKeyStore, JsonProfileSource, PassphraseFile, ProfileKind};

/// Build the record service described by `config`.
pub fn build_record_service(config: &RuntimeConfig) -> Result<RecordService<TcpLedgerClient>> {
    config
        .validate_for_clinic()
        .context("invalid clinic configuration")?;

    let secret = config
        .signing_key_hex
        .clone()
        .context("ML_SIGNING_KEY_HEX is not set")?;

    let context = ClinicContext::initialize(
        &JsonProfileSource::new(&config.doctor_profile, ProfileKind::Doctor),
        &HexKeyStore::new(secret),
        Arc::new(JsonProfileSource::new(
            &config.patient_profile,
            ProfileKind::Patient,
        )),
        Arc::new(PassphraseFile::new(&config.passphrase_file)),
    )
    .context("failed to initialize clinic context")?;

    info!(
        ledger = %config.ledger.node_address,
        "Record service ready"
    );
    let ledger = Arc::new(TcpLedgerClient::new(config.ledger.clone()));
    Ok(RecordService::new(ledger, context))
}
