//!
//! Base58-check text codec for addresses.
//!
//! An address is a 21-byte payload (version byte, then the 20-byte
//! public-key hash) with a 4-byte double-SHA-256 checksum appended,
//! written in base58. Leading zero bytes of the payload appear as
//! leading `1` characters.
//!

use crate::parser::proto::Hash160;
use bitcoin_hashes::{sha256d, Hash};

/// Version byte prepended to a public-key hash before encoding.
pub const PUBKEY_ADDRESS_VERSION: u8 = 0;

/// Append the 4-byte checksum and encode in base58.
pub fn encode_check(payload: &[u8]) -> String {
    let checksum = sha256d::Hash::hash(payload);
    let mut data = Vec::with_capacity(payload.len() + 4);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..4]);
    bs58::encode(data).into_string()
}

/// Decode a base58-check string back to its payload. `None` when the
/// text contains a character outside the alphabet, is too short to
/// carry a checksum, or the checksum does not match.
pub fn decode_check(text: &str) -> Option<Vec<u8>> {
    let data = bs58::decode(text).into_vec().ok()?;
    if data.len() < 5 {
        return None;
    }
    let split = data.len() - 4;
    let checksum = sha256d::Hash::hash(&data[..split]);
    if checksum[..4] != data[split..] {
        return None;
    }
    Some(data[..split].to_vec())
}

/// Render a public-key hash as address text.
pub fn hash_to_address(hash: &Hash160) -> String {
    let mut payload = Vec::with_capacity(21);
    payload.push(PUBKEY_ADDRESS_VERSION);
    payload.extend_from_slice(hash.as_inner());
    encode_check(&payload)
}

/// Parse address text back to the embedded public-key hash. The
/// version byte is discarded.
pub fn address_to_hash(address: &str) -> Option<Hash160> {
    let payload = decode_check(address)?;
    if payload.len() != 21 {
        return None;
    }
    let mut inner = [0u8; 20];
    inner.copy_from_slice(&payload[1..]);
    Some(Hash160::from_inner(inner))
}
