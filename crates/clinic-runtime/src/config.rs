//! # Runtime Configuration
//!
//! Defaults, then environment overrides:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `ML_LEDGER_ADDR` | `ledger.node_address` |
//! | `ML_CONNECT_TIMEOUT_MS` | `ledger.connect_timeout_ms` |
//! | `ML_IO_TIMEOUT_MS` | `ledger.io_timeout_ms` |
//! | `ML_MAX_ATTEMPTS` | `ledger.retry.max_attempts` |
//! | `ML_DOCTOR_PROFILE` | `doctor_profile` |
//! | `ML_PATIENT_PROFILE` | `patient_profile` |
//! | `ML_SIGNING_KEY_HEX` | `signing_key_hex` |
//! | `ML_PASSPHRASE_FILE` | `passphrase_file` |
//!
//! Any error here is fatal at startup. Commands that talk to the ledger also
//! resolve its address before doing any work.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use zeroize::Zeroizing;

use ml_01_ledger_client::LedgerClientConfig;

/// Startup configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Ledger client settings are invalid.
    #[error("Invalid ledger configuration: {0}")]
    Ledger(#[from] ml_01_ledger_client::ConfigError),

    /// An environment variable could not be parsed.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },

    /// The ledger address does not resolve.
    #[error("Unreachable ledger address {address}: {reason}")]
    UnreachableLedger {
        /// Configured address
        address: String,
        /// Resolver failure
        reason: String,
    },

    /// Key material needed for clinic operations is not configured.
    #[error("Missing key material: {0} is not set")]
    MissingKeyMaterial(&'static str),
}

/// Clinic runtime configuration.
#[derive(Clone)]
pub struct RuntimeConfig {
    /// Ledger client settings.
    pub ledger: LedgerClientConfig,
    /// JSON doctor profile (the doctor card).
    pub doctor_profile: PathBuf,
    /// JSON patient profile (the patient card).
    pub patient_profile: PathBuf,
    /// Hex secret scalar of the doctor's signing key.
    pub signing_key_hex: Option<Zeroizing<String>>,
    /// File holding the patient passphrase.
    pub passphrase_file: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            ledger: LedgerClientConfig::default(),
            doctor_profile: PathBuf::from("keys/doctor/profile.json"),
            patient_profile: PathBuf::from("keys/patient/profile.json"),
            signing_key_hex: None,
            passphrase_file: PathBuf::from("keys/patient/passphrase.key"),
        }
    }
}

// The signing key must never reach a log line.
impl fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("ledger", &self.ledger)
            .field("doctor_profile", &self.doctor_profile)
            .field("patient_profile", &self.patient_profile)
            .field(
                "signing_key_hex",
                &self.signing_key_hex.as_ref().map(|_| "<redacted>"),
            )
            .field("passphrase_file", &self.passphrase_file)
            .finish()
    }
}

impl RuntimeConfig {
    /// Load defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load defaults overridden by `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("ML_LEDGER_ADDR") {
            config.ledger.node_address = addr;
        }
        if let Some(ms) = parse(&lookup, "ML_CONNECT_TIMEOUT_MS")? {
            config.ledger.connect_timeout_ms = ms;
        }
        if let Some(ms) = parse(&lookup, "ML_IO_TIMEOUT_MS")? {
            config.ledger.io_timeout_ms = ms;
        }
        if let Some(n) = parse(&lookup, "ML_MAX_ATTEMPTS")? {
            config.ledger.retry.max_attempts = n;
        }
        if let Some(path) = lookup("ML_DOCTOR_PROFILE") {
            config.doctor_profile = PathBuf::from(path);
        }
        if let Some(path) = lookup("ML_PATIENT_PROFILE") {
            config.patient_profile = PathBuf::from(path);
        }
        if let Some(key) = lookup("ML_SIGNING_KEY_HEX") {
            config.signing_key_hex = Some(Zeroizing::new(key));
        }
        if let Some(path) = lookup("ML_PASSPHRASE_FILE") {
            config.passphrase_file = PathBuf::from(path);
        }

        Ok(config)
    }

    /// Validate settings every command needs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ledger.validate()?;
        Ok(())
    }

    /// Validate settings for commands that sign or decrypt records.
    pub fn validate_for_clinic(&self) -> Result<(), ConfigError> {
        self.validate()?;
        match &self.signing_key_hex {
            Some(key) if !key.trim().is_empty() => Ok(()),
            _ => Err(ConfigError::MissingKeyMaterial("ML_SIGNING_KEY_HEX")),
        }
    }

    /// Resolve the ledger address to its first socket address.
    ///
    /// Only resolution is checked. A node that is down is reported per
    /// request, so records can still be created while it is offline.
    pub async fn resolve_ledger(&self) -> Result<SocketAddr, ConfigError> {
        let address = &self.ledger.node_address;
        let unreachable = |reason: String| ConfigError::UnreachableLedger {
            address: address.clone(),
            reason,
        };

        let mut resolved = tokio::net::lookup_host(address.as_str())
            .await
            .map_err(|e| unreachable(e.to_string()))?;
        resolved
            .next()
            .ok_or_else(|| unreachable("no addresses".to_string()))
    }
}

fn parse<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(ConfigError::InvalidValue { var, value }),
    }
}
