//! # Wire Codec
//!
//! Pure encoding of ledger requests and responses. No I/O.
//!
//! ## Layout
//!
//! ```text
//! frame    = len:u32be payload
//! request  = Transaction
//! response = count:u64le Transaction*
//! Transaction = op:u8 patient_hash:[32] doctor_hash:[32]
//!               ciphertext_len:u64le ciphertext signature_len:u64le signature
//! ```
//!
//! Payloads use `bincode` fixed-int little-endian encoding, the same bytes
//! `bincode::serialize` produces.

use bincode::Options;
use serde::{de::DeserializeOwned, Serialize};
use shared_types::{IdentityHash, OperationType, Transaction, EMPTY_HASH};

use super::errors::LedgerError;

/// Size of the frame length prefix.
pub const FRAME_HEADER_LEN: usize = 4;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, LedgerError> {
    options()
        .serialize(value)
        .map_err(|e| LedgerError::Encoding(e.to_string()))
}

fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T, LedgerError> {
    options()
        .with_limit(payload.len() as u64)
        .deserialize(payload)
        .map_err(|e| LedgerError::Decoding(e.to_string()))
}

/// Prefix `payload` with its big-endian `u32` length.
pub fn frame(payload: &[u8]) -> Result<Vec<u8>, LedgerError> {
    let len = u32::try_from(payload.len())
        .map_err(|_| LedgerError::Encoding(format!("payload of {} bytes", payload.len())))?;
    let mut framed = Vec::with_capacity(FRAME_HEADER_LEN + payload.len());
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(payload);
    Ok(framed)
}

/// Encode one request transaction (unframed payload).
pub fn encode_request(transaction: &Transaction) -> Result<Vec<u8>, LedgerError> {
    encode(transaction)
}

/// Decode one request transaction.
pub fn decode_request(payload: &[u8]) -> Result<Transaction, LedgerError> {
    decode(payload)
}

/// Encode a response sequence (unframed payload).
pub fn encode_response(transactions: &[Transaction]) -> Result<Vec<u8>, LedgerError> {
    encode(transactions)
}

/// Decode a response sequence.
pub fn decode_response(payload: &[u8]) -> Result<Vec<Transaction>, LedgerError> {
    decode(payload)
}

/// Build a read request. Unused fields are zero/empty.
pub fn query(operation_type: OperationType, patient_hash: IdentityHash) -> Transaction {
    Transaction {
        operation_type,
        patient_hash,
        doctor_hash: EMPTY_HASH,
        ciphertext: Vec::new(),
        signature: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(patient: u8, data: &[u8]) -> Transaction {
        Transaction {
            operation_type: OperationType::Add,
            patient_hash: [patient; 32],
            doctor_hash: [0xDD; 32],
            ciphertext: data.to_vec(),
            signature: vec![0x30, 0x01, 0x00],
        }
    }

    #[test]
    fn test_request_matches_plain_bincode() {
        let tx = add(1, b"sealed");
        assert_eq!(encode_request(&tx).unwrap(), bincode::serialize(&tx).unwrap());
    }

    #[test]
    fn test_frame_prefix_is_big_endian_length() {
        let framed = frame(&[9u8; 300]).unwrap();
        assert_eq!(&framed[..4], &300u32.to_be_bytes());
        assert_eq!(framed.len(), 304);
    }

    #[test]
    fn test_response_sequence() {
        let txs = vec![add(1, b"a"), add(2, b"bb")];
        let payload = encode_response(&txs).unwrap();
        assert_eq!(&payload[..8], &2u64.to_le_bytes());
        assert_eq!(decode_response(&payload).unwrap(), txs);
    }

    #[test]
    fn test_empty_response() {
        let payload = encode_response(&[]).unwrap();
        assert_eq!(payload, 0u64.to_le_bytes());
        assert!(decode_response(&payload).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_request_is_decoding_error() {
        let payload = encode_request(&add(1, b"sealed")).unwrap();
        let result = decode_request(&payload[..payload.len() - 1]);
        assert!(matches!(result, Err(LedgerError::Decoding(_))));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut payload = encode_request(&add(1, b"sealed")).unwrap();
        payload.push(0);
        assert!(matches!(decode_request(&payload), Err(LedgerError::Decoding(_))));
    }

    #[test]
    fn test_oversized_length_prefix_rejected() {
        let mut payload = encode_request(&add(1, b"x")).unwrap();
        // ciphertext length field starts after op + hashes
        payload[65..73].copy_from_slice(&u64::MAX.to_le_bytes());
        assert!(matches!(decode_request(&payload), Err(LedgerError::Decoding(_))));
    }

    #[test]
    fn test_query_envelope() {
        let q = query(OperationType::GetAll, [7u8; 32]);
        assert_eq!(q.operation_type, OperationType::GetAll);
        assert_eq!(q.patient_hash, [7u8; 32]);
        assert_eq!(q.doctor_hash, EMPTY_HASH);
        assert!(q.ciphertext.is_empty() && q.signature.is_empty());
    }
}
