//! # ECDSA Signatures (secp256k1)
//!
//! Signs sealed records so the ledger copy can be checked against the
//! authoring doctor's key.
//!
//! ## Security Properties
//!
//! - Randomized nonces: two signatures over the same message differ, both verify
//! - Message digest is SHA-256
//! - Low-S normalization on signing, high-S rejected on verification
//!
//! ## Encoding
//!
//! Signatures travel as ASN.1 DER `SEQUENCE { INTEGER r, INTEGER s }`, so
//! they decode without knowing the message.

use crate::CryptoError;
use k256::ecdsa::{
    signature::{RandomizedSigner, Verifier},
    Signature, SigningKey, VerifyingKey,
};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

/// Compressed secp256k1 public key (33 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VerifyingPublicKey([u8; 33]);

impl VerifyingPublicKey {
    /// Create from compressed bytes (33 bytes, starting with 0x02 or 0x03).
    pub fn from_bytes(bytes: [u8; 33]) -> Result<Self, CryptoError> {
        VerifyingKey::from_sec1_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Get raw compressed bytes.
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    /// Verify a DER signature over `message`.
    ///
    /// Any decoding problem (key or signature) yields `false`.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_sec1_bytes(&self.0) else {
            return false;
        };
        let Ok(sig) = Signature::from_der(signature) else {
            return false;
        };
        verifying_key.verify(message, &sig).is_ok()
    }
}

/// secp256k1 ECDSA keypair. The secret scalar is wiped when dropped.
pub struct SigningKeyPair {
    signing_key: SigningKey,
}

impl SigningKeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut OsRng);
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes((&bytes).into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Create from a hex-encoded 32-byte secret.
    pub fn from_hex(secret_hex: &str) -> Result<Self, CryptoError> {
        let mut decoded = Zeroizing::new([0u8; 32]);
        let raw = Zeroizing::new(
            hex::decode(secret_hex.trim()).map_err(|_| CryptoError::InvalidPrivateKey)?,
        );
        if raw.len() != 32 {
            return Err(CryptoError::InvalidPrivateKey);
        }
        decoded.copy_from_slice(&raw);
        Self::from_bytes(*decoded)
    }

    /// Get public key (compressed, 33 bytes).
    pub fn public_key(&self) -> VerifyingPublicKey {
        let sec1_bytes = self.signing_key.verifying_key().to_sec1_bytes();
        // SEC1 compressed points are always 33 bytes: 0x02/0x03 then x.
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(&sec1_bytes[..33]);
        VerifyingPublicKey(bytes)
    }

    /// Sign a message with a fresh random nonce. Returns the DER encoding.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::SigningFailed` if the signer rejects the input.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let sig: Signature = self
            .signing_key
            .try_sign_with_rng(&mut OsRng, message)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        Ok(sig.to_der().as_bytes().to_vec())
    }

    /// Get secret key bytes (for provisioning tools).
    pub fn to_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.signing_key.to_bytes().into())
    }
}

/// Sign `message` with `key`.
pub fn sign(key: &SigningKeyPair, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
    key.sign(message)
}

/// Verify a DER signature. Never errors; failures are `false`.
pub fn verify(public_key: &VerifyingPublicKey, message: &[u8], signature: &[u8]) -> bool {
    public_key.verify(message, signature)
}
