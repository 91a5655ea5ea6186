use crate::ledger::Ledger;
use crate::parser::errors::OpResult;
use crate::parser::proto::{BlockHash, BlockHeader, Output, TxMerkleNode, Txid};
use crate::parser::reader::{BlockchainRead, MAX_RECORD_SIZE};
use crate::parser::script::evaluate_script;
use bitcoin_hashes::Hash;
use log::warn;
use std::io::{self, Cursor, Read};

/// Outcome of reading one `{magic}{size}{payload}` record.
pub(crate) enum BlockStep {
    /// Payload fully decoded into the ledger.
    Parsed {
        header: BlockHeader,
        payload_size: u32,
        n_tx: u64,
    },
    /// Payload advanced past without decoding (skip mode, or an
    /// undecodable payload).
    Skipped { payload_size: u32 },
    /// The stream ended before a complete record could be read.
    Eof,
}

///
/// Read one block record from the stream.
///
/// The magic field is never validated. The whole declared payload is
/// consumed from the stream before returning, so a malformed inner
/// record cannot desynchronize the outer scan: the reader always ends
/// up at `block_start + payload_size`.
///
/// A short read on the header fields, a declared payload size of zero,
/// or a truncated payload all signal end-of-stream rather than an
/// error.
///
pub(crate) fn read_block<R: BlockchainRead>(
    reader: &mut R,
    ledger: &mut Ledger,
    skip: bool,
) -> OpResult<BlockStep> {
    let _magic = match reader.read_u32() {
        Ok(magic) => magic,
        Err(_) => return Ok(BlockStep::Eof),
    };
    let payload_size = match reader.read_u32() {
        Ok(size) => size,
        Err(_) => return Ok(BlockStep::Eof),
    };
    // zero-padded tail of a preallocated file
    if payload_size == 0 {
        return Ok(BlockStep::Eof);
    }
    if skip {
        let skipped = io::copy(
            &mut reader.by_ref().take(u64::from(payload_size)),
            &mut io::sink(),
        )?;
        if skipped < u64::from(payload_size) {
            return Ok(BlockStep::Eof);
        }
        return Ok(BlockStep::Skipped { payload_size });
    }
    let payload = match reader.read_u8_vec(u64::from(payload_size)) {
        Ok(payload) => payload,
        Err(_) => return Ok(BlockStep::Eof),
    };
    match parse_block_payload(&payload, ledger) {
        Ok((header, n_tx)) => Ok(BlockStep::Parsed {
            header,
            payload_size,
            n_tx,
        }),
        Err(e) => {
            warn!("skipping undecodable block payload: {}", e);
            Ok(BlockStep::Skipped { payload_size })
        }
    }
}

/// Decode a block payload: 80-byte header, transaction count, then the
/// transactions in file order, each feeding the ledger.
fn parse_block_payload(payload: &[u8], ledger: &mut Ledger) -> OpResult<(BlockHeader, u64)> {
    let mut cursor = Cursor::new(payload);
    let header = read_block_header(&mut cursor)?;
    let n_tx = cursor.read_varint()?;
    for _ in 0..n_tx {
        read_transaction(&mut cursor, ledger)?;
    }
    Ok((header, n_tx))
}

pub(crate) fn read_block_header(cursor: &mut Cursor<&[u8]>) -> OpResult<BlockHeader> {
    let start = cursor.position() as usize;
    let version = cursor.read_i32()?;
    let prev_blockhash = BlockHash::from_inner(cursor.read_u256()?);
    let merkle_root = TxMerkleNode::from_inner(cursor.read_u256()?);
    let time = cursor.read_u32()?;
    let bits = cursor.read_u32()?;
    let nonce = cursor.read_u32()?;
    let end = cursor.position() as usize;
    let block_hash = BlockHash::hash(&cursor.get_ref()[start..end]);
    Ok(BlockHeader {
        block_hash,
        version,
        prev_blockhash,
        merkle_root,
        time,
        bits,
        nonce,
    })
}

///
/// Decode one transaction and apply it to the ledger.
///
/// Processing order matters and must not be rearranged:
/// 1. inputs: classify each script, then resolve the `(prev_tx,
///    prev_index)` reference against already-registered transactions,
/// 2. outputs: classify, credit recognized owners, collect the output
///    list in index order,
/// 3. hash the exact serialized span to obtain the txid and register
///    the output list under it.
///
/// An output of a transaction can be spent by a later transaction in
/// the same block, which is why registration happens before the next
/// transaction is decoded. Transactions larger than `MAX_RECORD_SIZE`
/// are decoded but never registered, so later spends of their outputs
/// will not resolve.
///
/// Returns the transaction's serialized size in bytes.
///
pub(crate) fn read_transaction(cursor: &mut Cursor<&[u8]>, ledger: &mut Ledger) -> OpResult<u64> {
    let start = cursor.position() as usize;
    let _version = cursor.read_u32()?;

    let input_count = cursor.read_varint()?;
    for _ in 0..input_count {
        let prev_tx = Txid::from_inner(cursor.read_u256()?);
        let prev_index = cursor.read_u32()?;
        // input scripts go through the classifier like any other script,
        // though the two templates only ever match output scripts
        if let Some(script) = read_script(cursor)? {
            evaluate_script(&script);
        }
        let _sequence = cursor.read_u32()?;
        ledger.resolve_spend(&prev_tx, prev_index);
    }

    let output_count = cursor.read_varint()?;
    // declared counts are untrusted
    let mut outputs = Vec::with_capacity(output_count.min(1024) as usize);
    for _ in 0..output_count {
        let value = cursor.read_u64()?;
        let owner = match read_script(cursor)? {
            Some(script) => evaluate_script(&script).owner,
            None => None,
        };
        if let Some(ref owner) = owner {
            ledger.credit_received(owner, value);
        }
        outputs.push(Output { owner, value });
    }

    let _lock_time = cursor.read_u32()?;
    let end = cursor.position() as usize;
    let size = (end - start) as u64;
    if size <= MAX_RECORD_SIZE {
        let txid = Txid::hash(&cursor.get_ref()[start..end]);
        ledger.record_transaction(txid, outputs);
    }
    Ok(size)
}

/// Read a varint-length-prefixed script. A script longer than
/// `MAX_RECORD_SIZE` is stepped over and reported as `None`; either
/// way the cursor advances exactly the declared length.
fn read_script(cursor: &mut Cursor<&[u8]>) -> OpResult<Option<Vec<u8>>> {
    let size = cursor.read_varint()?;
    if size > MAX_RECORD_SIZE {
        cursor.set_position(cursor.position().saturating_add(size));
        return Ok(None);
    }
    Ok(Some(cursor.read_u8_vec(size)?))
}
