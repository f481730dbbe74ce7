//! File-backed identity, passphrase, and key sources.
//!
//! Profiles are JSON in the card format (`firstname`, `lastname`, `type`,
//! ...). Files are re-read on every call so a swapped card is picked up.

use std::fs;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

use ml_02_record_pipeline::{IdentitySource, PassphraseSource, SigningKeyStore, SourceError};
use shared_crypto::{Passphrase, SigningKeyPair};
use shared_types::{Doctor, Identity, Patient};

/// Which profile shape a file holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileKind {
    /// Doctor card.
    Doctor,
    /// Patient card.
    Patient,
}

/// Identity read from a JSON profile file.
#[derive(Clone, Debug)]
pub struct JsonProfileSource {
    path: PathBuf,
    kind: ProfileKind,
}

impl JsonProfileSource {
    /// Source for the profile at `path`.
    pub fn new(path: impl Into<PathBuf>, kind: ProfileKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

fn read(path: &Path) -> Result<Zeroizing<String>, SourceError> {
    fs::read_to_string(path)
        .map(Zeroizing::new)
        .map_err(|e| SourceError::Unavailable(format!("{}: {}", path.display(), e)))
}

impl IdentitySource for JsonProfileSource {
    fn get_identity(&self) -> Result<Identity, SourceError> {
        let raw = read(&self.path)?;
        let malformed = |e: serde_json::Error| {
            SourceError::Malformed(format!("{}: {}", self.path.display(), e))
        };
        match self.kind {
            ProfileKind::Doctor => serde_json::from_str::<Doctor>(&raw)
                .map(Identity::Doctor)
                .map_err(malformed),
            ProfileKind::Patient => serde_json::from_str::<Patient>(&raw)
                .map(Identity::Patient)
                .map_err(malformed),
        }
    }
}

/// Passphrase read from a key file. One trailing newline is ignored.
#[derive(Clone, Debug)]
pub struct PassphraseFile {
    path: PathBuf,
}

impl PassphraseFile {
    /// Source for the passphrase at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PassphraseSource for PassphraseFile {
    fn get_passphrase_key(&self) -> Result<Passphrase, SourceError> {
        let raw = read(&self.path)?;
        let value = raw
            .strip_suffix('\n')
            .map(|s| s.strip_suffix('\r').unwrap_or(s))
            .unwrap_or(raw.as_str());
        if value.is_empty() {
            return Err(SourceError::Malformed(format!(
                "{}: empty passphrase",
                self.path.display()
            )));
        }
        Ok(Passphrase::new(value))
    }
}

/// Signing key held as a hex secret scalar.
pub struct HexKeyStore {
    secret_hex: Zeroizing<String>,
}

impl HexKeyStore {
    /// Store wrapping `secret_hex`.
    pub fn new(secret_hex: Zeroizing<String>) -> Self {
        Self { secret_hex }
    }
}

impl SigningKeyStore for HexKeyStore {
    fn get_signing_key_pair(&self) -> Result<SigningKeyPair, SourceError> {
        SigningKeyPair::from_hex(self.secret_hex.trim())
            .map_err(|e| SourceError::Malformed(format!("signing key: {e}")))
    }
}
