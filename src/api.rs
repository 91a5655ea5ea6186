//!
//! Crate APIs; essential structs, functions and methods are all here.
//!
//! All scans start from constructing a `Scanner`; have a look at its
//! documentation first.
//!

use crate::parser::blk_file::BlkFile;
use crate::parser::block::{read_block, BlockStep};
use crate::parser::errors::{OpError, OpResult};
use log::{debug, info};
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};

// re-exports
pub use crate::address::{
    address_to_hash, decode_check, encode_check, hash_to_address, PUBKEY_ADDRESS_VERSION,
};
pub use crate::keys::KeyDeriver;
pub use crate::ledger::Ledger;
pub use crate::parser::proto::{
    AddressAccount, BlockHash, BlockHeader, Hash160, Output, TxMerkleNode, Txid,
};
pub use crate::parser::script::{evaluate_script, ScriptInfo, ScriptType};
pub use bitcoin_hashes::hex::{FromHex, ToHex};

///
/// Classify a script public key given in hex.
///
#[inline]
pub fn parse_script(script_pub_key: &str) -> OpResult<ScriptInfo> {
    let script: Vec<u8> = FromHex::from_hex(script_pub_key)?;
    Ok(evaluate_script(&script))
}

///
/// Where to start and stop within the block stream.
///
/// Blocks before `start_block` are advanced past in skip mode: their
/// frame is read but no transaction is decoded, so nothing they
/// contain enters the ledger. When `stop_block` is set, the scan ends
/// after processing the block with that index (inclusive).
///
#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    pub start_block: usize,
    pub stop_block: Option<usize>,
}

///
/// Cumulative counters reported to the observer after every block.
///
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanProgress {
    pub bytes_done: u64,
    pub bytes_total: u64,
    pub blocks: usize,
    pub addresses: usize,
    pub transactions: usize,
}

///
/// Receives scan progress. `progress` is invoked after every block;
/// `finished` once, with the final counters.
///
pub trait ScanObserver {
    fn progress(&mut self, progress: &ScanProgress);

    fn finished(&mut self, _progress: &ScanProgress) {}
}

struct NullObserver;

impl ScanObserver for NullObserver {
    fn progress(&mut self, _progress: &ScanProgress) {}
}

///
/// Observer that reports through the `log` crate, at most once per
/// interval, plus a final summary line.
///
pub struct LogObserver {
    interval: Duration,
    last: Instant,
}

impl LogObserver {
    pub fn new(interval: Duration) -> LogObserver {
        LogObserver {
            interval,
            last: Instant::now(),
        }
    }

    fn report(progress: &ScanProgress) {
        info!(
            "{}/{} bytes, {} blks, {} addr, {} txns",
            progress.bytes_done,
            progress.bytes_total,
            progress.blocks,
            progress.addresses,
            progress.transactions
        );
    }
}

impl ScanObserver for LogObserver {
    fn progress(&mut self, progress: &ScanProgress) {
        if self.last.elapsed() < self.interval {
            return;
        }
        self.last = Instant::now();
        LogObserver::report(progress);
    }

    fn finished(&mut self, progress: &ScanProgress) {
        LogObserver::report(progress);
    }
}

///
/// This is the main struct of this crate! Click and read the doc.
///
/// A `Scanner` walks a block byte source once, front to back, decoding
/// every block and transaction into a fresh [`Ledger`], which is
/// returned when the stream ends. Pass either a single `blk*.dat` file
/// or a directory containing them.
///
/// # Example
///
/// ```rust
/// use blkscan::{address_to_hash, Scanner};
/// use std::path::Path;
///
/// let scanner = Scanner::new(Path::new("/Users/me/.bitcoin/blocks")).unwrap();
/// let ledger = scanner.scan().unwrap();
///
/// let hash = address_to_hash("12cbQLTFMXRnSzktFkuoG3eHoMeFtpTu3S").unwrap();
/// println!("balance: {}", ledger.balance_of(&hash));
/// ```
///
pub struct Scanner {
    blk_file: BlkFile,
    options: ScanOptions,
}

impl Scanner {
    ///
    /// Opening the byte source is the only fatal failure of a scan:
    /// a missing path errors here, before any byte is read.
    ///
    pub fn new(path: &Path) -> OpResult<Scanner> {
        Scanner::with_options(path, ScanOptions::default())
    }

    pub fn with_options(path: &Path, options: ScanOptions) -> OpResult<Scanner> {
        if !path.exists() {
            return Err(OpError::from("block source does not exist"));
        }
        Ok(Scanner {
            blk_file: BlkFile::new(path)?,
            options,
        })
    }

    /// Total number of bytes the scan will walk through.
    pub fn total_size(&self) -> u64 {
        self.blk_file.total_size()
    }

    /// Scan without progress reporting.
    pub fn scan(&self) -> OpResult<Ledger> {
        self.scan_with(&mut NullObserver)
    }

    ///
    /// Drive the block decoder across the whole byte source, strictly
    /// sequentially, and return the populated ledger.
    ///
    /// Blocks, transactions within a block, and inputs before outputs
    /// within a transaction are processed in file order; later records
    /// may spend outputs created only moments earlier.
    ///
    pub fn scan_with(&self, observer: &mut dyn ScanObserver) -> OpResult<Ledger> {
        let mut ledger = Ledger::new();
        let mut progress = ScanProgress {
            bytes_total: self.blk_file.total_size(),
            ..ScanProgress::default()
        };
        let mut block = 0usize;
        'files: for path in self.blk_file.paths() {
            info!("scanning {}", path.display());
            let mut reader = BlkFile::open(path)?;
            loop {
                let skip = block < self.options.start_block;
                let payload_size = match read_block(&mut reader, &mut ledger, skip)? {
                    BlockStep::Eof => break,
                    BlockStep::Parsed {
                        header,
                        payload_size,
                        n_tx,
                    } => {
                        debug!("block {} {} with {} txns", block, header.block_hash, n_tx);
                        payload_size
                    }
                    BlockStep::Skipped { payload_size } => payload_size,
                };
                progress.bytes_done += 8 + u64::from(payload_size);
                progress.blocks = block + 1;
                progress.addresses = ledger.address_count();
                progress.transactions = ledger.transaction_count();
                observer.progress(&progress);
                if Some(block) == self.options.stop_block {
                    break 'files;
                }
                block += 1;
            }
        }
        observer.finished(&progress);
        Ok(ledger)
    }
}
