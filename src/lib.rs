// Rust SegWit Address Library
// Written by
//   The rust-segwit-addr developers
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! # Rust SegWit Address Library
//!
//! Bech32 encoding and decoding as described in [BIP-173], together with
//! the segregated witness address rules layered on top of it.
//!
//! The [`bech32`] module maps between a checksummed string and a
//! `(human-readable part, 5-bit data)` pair. The [`segwit`] module
//! interprets that data as a witness version and program and builds the
//! matching `scriptPubKey`. [`Address`] ties a witness program to a
//! network.
//!
//! ```
//! use segwit_addr::segwit;
//!
//! let prog = segwit::decode("bc", "BC1QW508D6QEJXTDG4Y5R3ZARVARY0C5XW7KV8F3T4").unwrap();
//! assert_eq!(prog.version(), 0);
//! assert_eq!(prog.program().len(), 20);
//! assert_eq!(
//!     segwit::encode("bc", prog.version(), prog.program()).unwrap(),
//!     "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4",
//! );
//! ```
//!
//! [BIP-173]: <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki>

// Coding conventions
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(missing_docs)]

/// Re-export of the `bitcoin` crate used for script and hash types.
pub extern crate bitcoin;
#[cfg(feature = "serde")]
extern crate actual_serde as serde;

mod error;
pub mod address;
pub mod bech32;
pub mod convert;
pub mod segwit;

pub use crate::address::{Address, AddressError, AddressParams};
pub use crate::bech32::Variant;
pub use crate::convert::{convert_bits, ConversionError, FromBase32, ToBase32};
pub use crate::segwit::WitnessProgram;
