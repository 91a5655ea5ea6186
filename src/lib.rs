//!
//! # Introduction
//!
//! This library decodes binary Bitcoin Core style block files in one
//! sequential pass and maintains a running received/sent ledger per
//! public-key hash, so that balances can be queried by address.
//!
//! It recognises the pay-to-pubkey-hash and pay-to-pubkey output
//! templates, connects inputs to previously seen outputs, and keeps
//! the whole index in memory for the duration of the scan.
//!
//! ## Caveat
//!
//! No consensus validation is performed: proof-of-work, signatures and
//! header linkage are taken on faith, and no block is ever rejected.
//!
//! # Example
//!
//! ```rust
//! use blkscan::{address_to_hash, Scanner};
//! use std::path::Path;
//!
//! let scanner = Scanner::new(Path::new("/Users/me/.bitcoin/blocks")).unwrap();
//! let ledger = scanner.scan().unwrap();
//!
//! let hash = address_to_hash("12cbQLTFMXRnSzktFkuoG3eHoMeFtpTu3S").unwrap();
//! println!("balance: {}", ledger.balance_of(&hash));
//! ```
//!

pub(crate) mod api;
pub mod address;
pub mod keys;
pub mod ledger;
pub mod parser;

#[doc(inline)]
pub use crate::api::*;
