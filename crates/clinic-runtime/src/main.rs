//! # Clinic Runtime
//!
//! Command-line entry point.
//!
//! ```text
//! clinic-runtime add <payload>     seal, sign, and send a record for the current patient
//! clinic-runtime search <query>    verified records of the current patient matching query
//! clinic-runtime records           every verified record of the current patient
//! clinic-runtime devnode           run a development ledger node
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use clinic_runtime::build_record_service;
use clinic_runtime::config::RuntimeConfig;
use ml_01_ledger_client::{DevLedgerNode, TcpLedgerClient};
use ml_02_record_pipeline::{RecordService, RecordServiceApi, SearchError};
use shared_types::Record;

/// Clinic-side client for the medical record ledger.
#[derive(Parser, Debug)]
#[command(name = "clinic-runtime")]
#[command(about = "Seal, sign, and search medical records on a ledger node")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a record for the current patient.
    Add {
        /// Free-text record content
        payload: String,
    },
    /// Search the current patient's records (case-insensitive substring).
    Search {
        /// Text to look for
        query: String,
    },
    /// List every readable record of the current patient.
    Records,
    /// Run an in-memory development ledger node.
    Devnode {
        /// Listen address (defaults to the configured ledger address)
        #[arg(short, long)]
        listen: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = RuntimeConfig::from_env().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    match cli.command {
        Command::Add { payload } => {
            let service = clinic_service(&config).await?;
            let created = service
                .create_record(&payload)
                .await
                .context("failed to create record")?;
            // The process is about to exit; do not leave the write behind.
            created
                .delivery
                .wait()
                .await
                .context("record created but not delivered to the ledger")?;
            print_json(&created.record)?;
        }
        Command::Search { query } => {
            let service = clinic_service(&config).await?;
            let found = degrade(service.search_own_records(&query).await)?;
            print_json(&found)?;
        }
        Command::Records => {
            let service = clinic_service(&config).await?;
            let found = degrade(service.search_own_records("").await)?;
            print_json(&found)?;
        }
        Command::Devnode { listen } => {
            let addr = listen.unwrap_or_else(|| config.ledger.node_address.clone());
            let handle = DevLedgerNode::bind(&addr)
                .await
                .with_context(|| format!("failed to bind dev node on {addr}"))?
                .spawn()?;
            info!(addr = %handle.local_addr(), "Dev ledger node running. Press Ctrl+C to stop.");
            tokio::signal::ctrl_c().await?;
            handle.shutdown().await;
        }
    }

    Ok(())
}

/// Resolve the ledger, then build the record service.
async fn clinic_service(config: &RuntimeConfig) -> Result<RecordService<TcpLedgerClient>> {
    let addr = config
        .resolve_ledger()
        .await
        .context("invalid configuration")?;
    debug!(%addr, "Ledger address resolved");
    build_record_service(config)
}

/// Map degraded search failures to an empty result, as the HTTP layer does.
fn degrade(result: Result<Vec<Record>, SearchError>) -> Result<Vec<Record>> {
    match result {
        Ok(records) => Ok(records),
        Err(e) if e.is_degraded() => {
            warn!("Search degraded to empty result: {}", e);
            Ok(Vec::new())
        }
        Err(e) => Err(e).context("search failed"),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}
