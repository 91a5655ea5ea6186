//!
//! This module decodes the binary block-file format and feeds the Ledger.
//!

/// locate blk.dat files on disk
pub mod blk_file;

/// decode block and transaction records
pub mod block;

/// error handling
pub mod errors;

/// value types shared by decoder and ledger
pub mod proto;

/// define binary file readers
pub mod reader;

/// output script template recognition
pub mod script;
