//!
//! Value types shared by the decoder and the ledger.
//!

use bitcoin_hashes::{
    borrow_slice_impl, hash160, hash_newtype, hex_fmt_impl, index_impl, serde_impl, sha256d, Hash,
};
use serde::{Deserialize, Serialize};

hash_newtype!(
    Txid,
    sha256d::Hash,
    32,
    doc = "Double-SHA-256 of a transaction's serialized bytes, its identity key."
);

hash_newtype!(
    BlockHash,
    sha256d::Hash,
    32,
    doc = "Double-SHA-256 of an 80-byte block header."
);

hash_newtype!(
    TxMerkleNode,
    sha256d::Hash,
    32,
    doc = "Merkle root carried in a block header. Never validated."
);

hash_newtype!(
    Hash160,
    hash160::Hash,
    20,
    doc = "RIPEMD-160(SHA-256(public key)), the binary form of an address."
);

///
/// One transaction output as retained by the ledger.
///
/// `owner` is `None` when the output script matched no recognized
/// template; the output still occupies its index so that later inputs
/// referring to `(txid, index)` resolve positionally.
///
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Output {
    pub owner: Option<Hash160>,
    pub value: u64,
}

///
/// Decoded 80-byte block header with its own hash precomputed.
///
/// None of the fields are checked against consensus rules; the scan
/// records what the file declares.
///
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct BlockHeader {
    pub block_hash: BlockHash,
    pub version: i32,
    pub prev_blockhash: BlockHash,
    pub merkle_root: TxMerkleNode,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

///
/// Running totals for one public-key hash.
///
/// Both counters only ever increase; balance is derived on demand.
///
#[derive(Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct AddressAccount {
    pub received: u64,
    pub sent: u64,
}

impl AddressAccount {
    /// `received - sent`, wrapping rather than erroring when a
    /// malformed chain over-spends an address.
    #[inline]
    pub fn balance(&self) -> u64 {
        self.received.wrapping_sub(self.sent)
    }
}
