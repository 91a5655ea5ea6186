//!
//! Passphrase to public-key-hash derivation, for tools that look up
//! candidate addresses in a scanned ledger.
//!

use crate::parser::errors::OpResult;
use crate::parser::proto::Hash160;
use bitcoin_hashes::{sha256, Hash};
use secp256k1::{All, PublicKey, Secp256k1, SecretKey};

///
/// Derives the public-key hash of a brainwallet passphrase.
///
/// Owns its secp256k1 context; derivation scratch state is never
/// shared process-wide, so independent derivers can run on separate
/// threads without synchronization.
///
pub struct KeyDeriver {
    ctx: Secp256k1<All>,
}

impl KeyDeriver {
    pub fn new() -> KeyDeriver {
        KeyDeriver {
            ctx: Secp256k1::new(),
        }
    }

    ///
    /// The brainwallet rule: the secret key is SHA-256 of the
    /// passphrase bytes, and the address hash is hash160 of the
    /// 65-byte uncompressed public key.
    ///
    /// Fails only for the negligible set of digests that are not valid
    /// secp256k1 secret keys.
    ///
    pub fn passphrase_to_hash(&self, passphrase: &str) -> OpResult<Hash160> {
        let secret = sha256::Hash::hash(passphrase.as_bytes());
        let secret_key = SecretKey::from_slice(&secret[..])?;
        let public_key = PublicKey::from_secret_key(&self.ctx, &secret_key);
        Ok(Hash160::hash(&public_key.serialize_uncompressed()))
    }
}

impl Default for KeyDeriver {
    fn default() -> Self {
        KeyDeriver::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::hash_to_address;
    use bitcoin_hashes::hex::ToHex;

    #[test]
    fn test_known_brainwallet_vector() {
        let deriver = KeyDeriver::new();
        let hash = deriver
            .passphrase_to_hash("correct horse battery staple")
            .unwrap();
        assert_eq!(hash.to_hex(), "c4c5d791fcb4654a1ef5e03fe0ad3d9c598f9827");
        assert_eq!(
            hash_to_address(&hash),
            "1JwSSubhmg6iPtRjtyqhUYYH7bZg3Lfy1T"
        );
    }

    #[test]
    fn test_derivation_deterministic() {
        let deriver = KeyDeriver::new();
        let first = deriver.passphrase_to_hash("password").unwrap();
        let second = deriver.passphrase_to_hash("password").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_hex(), "3e546d0acc0de5aa3d66d7a920900ecbc66c2031");
        assert_ne!(first, deriver.passphrase_to_hash("Password").unwrap());
    }
}
