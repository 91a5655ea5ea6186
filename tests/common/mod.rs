//!
//! Wire-format builders for synthetic block files.
//!

use bitcoin_hashes::{sha256d, Hash};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const MAGIC: u32 = 0xd9b4_bef9;

/// Minimal-width wire-format varint.
pub fn varint(n: u64) -> Vec<u8> {
    if n < 0xfd {
        vec![n as u8]
    } else if n <= 0xffff {
        let mut v = vec![0xfd];
        v.extend_from_slice(&(n as u16).to_le_bytes());
        v
    } else if n <= 0xffff_ffff {
        let mut v = vec![0xfe];
        v.extend_from_slice(&(n as u32).to_le_bytes());
        v
    } else {
        let mut v = vec![0xff];
        v.extend_from_slice(&n.to_le_bytes());
        v
    }
}

pub fn p2pkh_script(hash: [u8; 20]) -> Vec<u8> {
    let mut script = vec![0x76, 0xa9, 0x14];
    script.extend_from_slice(&hash);
    script.extend_from_slice(&[0x88, 0xac]);
    script
}

pub fn p2pk_script(pubkey: &[u8; 65]) -> Vec<u8> {
    let mut script = vec![0x41];
    script.extend_from_slice(pubkey);
    script.push(0xac);
    script
}

pub fn txid(tx_bytes: &[u8]) -> [u8; 32] {
    sha256d::Hash::hash(tx_bytes).into_inner()
}

#[derive(Default)]
pub struct TxBuilder {
    inputs: Vec<([u8; 32], u32)>,
    outputs: Vec<(u64, Vec<u8>)>,
}

impl TxBuilder {
    pub fn new() -> TxBuilder {
        TxBuilder::default()
    }

    pub fn coinbase(self) -> TxBuilder {
        self.input([0u8; 32], 0xffff_ffff)
    }

    pub fn input(mut self, prev_tx: [u8; 32], prev_index: u32) -> TxBuilder {
        self.inputs.push((prev_tx, prev_index));
        self
    }

    pub fn output(mut self, value: u64, script: Vec<u8>) -> TxBuilder {
        self.outputs.push((value, script));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&1u32.to_le_bytes());
        buf.extend_from_slice(&varint(self.inputs.len() as u64));
        for (prev_tx, prev_index) in &self.inputs {
            buf.extend_from_slice(prev_tx);
            buf.extend_from_slice(&prev_index.to_le_bytes());
            buf.push(0); // empty script
            buf.extend_from_slice(&0xffff_ffffu32.to_le_bytes());
        }
        buf.extend_from_slice(&varint(self.outputs.len() as u64));
        for (value, script) in &self.outputs {
            buf.extend_from_slice(&value.to_le_bytes());
            buf.extend_from_slice(&varint(script.len() as u64));
            buf.extend_from_slice(script);
        }
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf
    }
}

/// 80-byte header (arbitrary field contents) plus the transactions.
pub fn block_payload(txs: &[Vec<u8>]) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(&1i32.to_le_bytes());
    payload.extend_from_slice(&[0u8; 32]); // prev block hash
    payload.extend_from_slice(&[0u8; 32]); // merkle root
    payload.extend_from_slice(&1231006505u32.to_le_bytes()); // time
    payload.extend_from_slice(&0x1d00_ffffu32.to_le_bytes()); // bits
    payload.extend_from_slice(&0u32.to_le_bytes()); // nonce
    payload.extend_from_slice(&varint(txs.len() as u64));
    for tx in txs {
        payload.extend_from_slice(tx);
    }
    payload
}

/// Frame block payloads into the on-disk record stream.
pub fn frame(payloads: &[Vec<u8>]) -> Vec<u8> {
    let mut stream = Vec::new();
    for payload in payloads {
        stream.extend_from_slice(&MAGIC.to_le_bytes());
        stream.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        stream.extend_from_slice(payload);
    }
    stream
}

pub fn write_blk(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();
    file.write_all(bytes).unwrap();
    path
}
