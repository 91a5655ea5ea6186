use crate::parser::proto::Hash160;
use bitcoin_hashes::Hash;
use serde::{Deserialize, Serialize};
use std::fmt;

/// OP_DUP, the first opcode of a pay-to-pubkey-hash output script.
const OP_DUP: u8 = 0x76;
/// OP_CHECKSIG, the last opcode of a pay-to-pubkey output script.
const OP_CHECKSIG: u8 = 0xac;

///
/// The two output templates the scan tracks, plus everything else.
///
/// Only `Pay2PublicKeyHash` and `Pay2PublicKey` yield an owner hash;
/// any other script is permitted but untracked.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScriptType {
    Pay2PublicKey,
    Pay2PublicKeyHash,
    NotRecognised,
}

///
/// Classification result: the owner hash extracted from the script,
/// if any, and the template that matched.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScriptInfo {
    pub owner: Option<Hash160>,
    pub pattern: ScriptType,
}

///
/// Classify a raw script against the two recognized templates.
///
/// The checks are length-exact:
/// - 25 bytes starting with OP_DUP: pay-to-pubkey-hash, the owner hash
///   is embedded at bytes 3..23.
/// - 67 bytes ending with OP_CHECKSIG: pay-to-pubkey, the owner hash is
///   hash160 of the 65-byte uncompressed public key at bytes 1..66.
///
/// A pure function of the script bytes; classifying twice yields the
/// same result.
///
pub fn evaluate_script(script: &[u8]) -> ScriptInfo {
    if script.len() == 25 && script[0] == OP_DUP {
        let mut hash = [0u8; 20];
        hash.copy_from_slice(&script[3..23]);
        return ScriptInfo {
            owner: Some(Hash160::from_inner(hash)),
            pattern: ScriptType::Pay2PublicKeyHash,
        };
    }
    if script.len() == 67 && script[66] == OP_CHECKSIG {
        return ScriptInfo {
            owner: Some(Hash160::hash(&script[1..66])),
            pattern: ScriptType::Pay2PublicKey,
        };
    }
    ScriptInfo {
        owner: None,
        pattern: ScriptType::NotRecognised,
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ScriptType::Pay2PublicKey => write!(f, "Pay2PublicKey"),
            ScriptType::Pay2PublicKeyHash => write!(f, "Pay2PublicKeyHash"),
            ScriptType::NotRecognised => write!(f, "NotRecognised"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{evaluate_script, ScriptType};
    use bitcoin_hashes::hex::ToHex;

    #[test]
    fn test_script_p2pkh() {
        // Raw output script: 76a91412ab8dc588ca9d5787dde7eb29569da63c3a238c88ac
        //                    OP_DUP OP_HASH160 OP_PUSHDATA0(20 bytes) 12ab8dc588ca9d5787dde7eb29569da63c3a238c OP_EQUALVERIFY OP_CHECKSIG
        let bytes = [
            0x76 as u8, 0xa9, 0x14, 0x12, 0xab, 0x8d, 0xc5, 0x88, 0xca, 0x9d, 0x57, 0x87, 0xdd,
            0xe7, 0xeb, 0x29, 0x56, 0x9d, 0xa6, 0x3c, 0x3a, 0x23, 0x8c, 0x88, 0xac,
        ];
        let result = evaluate_script(&bytes);
        assert_eq!(
            result.owner.unwrap().to_hex(),
            "12ab8dc588ca9d5787dde7eb29569da63c3a238c"
        );
        assert_eq!(result.pattern, ScriptType::Pay2PublicKeyHash);
    }

    #[test]
    fn test_script_p2pk() {
        // Raw output script: 0x41 0x044bca633a91de10df85a63d0a24cb09783148fe0e16c92e937fc4491580c860757148effa0595a955f44078b48ba67fa198782e8bb68115da0daa8fde5301f7f9 OP_CHECKSIG
        //                    OP_PUSHDATA0(65 bytes) 0x044bca... OP_CHECKSIG
        let bytes = [
            0x41 as u8, // Push next 65 bytes
            0x04, 0x4b, 0xca, 0x63, 0x3a, 0x91, 0xde, 0x10, 0xdf, 0x85, 0xa6, 0x3d, 0x0a, 0x24,
            0xcb, 0x09, 0x78, 0x31, 0x48, 0xfe, 0x0e, 0x16, 0xc9, 0x2e, 0x93, 0x7f, 0xc4, 0x49,
            0x15, 0x80, 0xc8, 0x60, 0x75, 0x71, 0x48, 0xef, 0xfa, 0x05, 0x95, 0xa9, 0x55, 0xf4,
            0x40, 0x78, 0xb4, 0x8b, 0xa6, 0x7f, 0xa1, 0x98, 0x78, 0x2e, 0x8b, 0xb6, 0x81, 0x15,
            0xda, 0x0d, 0xaa, 0x8f, 0xde, 0x53, 0x01, 0xf7, 0xf9, 0xac,
        ]; // OP_CHECKSIG
        let result = evaluate_script(&bytes);
        assert_eq!(
            result.owner.unwrap().to_hex(),
            "d2f8c976b7c63b586f7a9eefce230b527a9ad0e8"
        );
        assert_eq!(result.pattern, ScriptType::Pay2PublicKey);
    }

    #[test]
    fn test_script_p2sh_not_tracked() {
        // P2SH scripts are 23 bytes; neither template matches.
        let bytes = [
            0xa9 as u8, 0x14, // OP_HASH160, OP_PUSHDATA0(20 bytes)
            0xe9, 0xc3, 0xdd, 0x0c, 0x07, 0xaa, 0xc7, 0x61, 0x79, 0xeb, 0xc7, 0x6a, 0x6c, 0x78,
            0xd4, 0xd6, 0x7c, 0x6c, 0x16, 0x0a, 0x87,
        ]; // OP_EQUAL
        let result = evaluate_script(&bytes);
        assert!(result.owner.is_none());
        assert_eq!(result.pattern, ScriptType::NotRecognised);
    }

    #[test]
    fn test_script_non_standard() {
        // Raw output script: 736372697074
        //                    OP_IFDUP OP_IF OP_2SWAP OP_VERIFY OP_2OVER OP_DEPTH
        let bytes = [0x73 as u8, 0x63, 0x72, 0x69, 0x70, 0x74];
        let result = evaluate_script(&bytes);
        assert!(result.owner.is_none());
        assert_eq!(result.pattern, ScriptType::NotRecognised);
    }

    #[test]
    fn test_script_empty_and_length_edge() {
        assert!(evaluate_script(&[]).owner.is_none());
        // 25 bytes but wrong leading opcode
        let mut bytes = [0u8; 25];
        bytes[0] = 0xa9;
        assert!(evaluate_script(&bytes).owner.is_none());
        // 67 bytes but wrong trailing opcode
        let bytes = [0u8; 67];
        assert!(evaluate_script(&bytes).owner.is_none());
    }

    #[test]
    fn test_classification_idempotent() {
        let bytes = [
            0x76 as u8, 0xa9, 0x14, 0x12, 0xab, 0x8d, 0xc5, 0x88, 0xca, 0x9d, 0x57, 0x87, 0xdd,
            0xe7, 0xeb, 0x29, 0x56, 0x9d, 0xa6, 0x3c, 0x3a, 0x23, 0x8c, 0x88, 0xac,
        ];
        let first = evaluate_script(&bytes);
        let second = evaluate_script(&bytes);
        assert_eq!(first.owner, second.owner);
        assert_eq!(first.pattern, second.pattern);
    }
}
