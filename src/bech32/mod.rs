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

//! # Bech32
//!
//! The general checksummed base32 format of [BIP-173].
//!
//! A bech32 string is at most 90 characters long and consists of:
//!
//! - The human-readable part, 1 to 83 US-ASCII characters in the range
//!   `[33, 126]`.
//! - The separator, which is always the *last* `"1"` in the string.
//! - The data part, at least 6 characters long, drawn from the 32 symbol
//!   alphabet `qpzry9x8gf2tvdw0s3jn54khce6mua7l`. The final 6 characters
//!   are the checksum.
//!
//! Strings may be all lowercase or all uppercase, never both. Encoding
//! always produces lowercase.
//!
//! The [BIP-350] bech32m checksum is also supported through the
//! `*_with_variant` functions; [`encode`] and [`decode`] only ever use
//! the original bech32 checksum.
//!
//! [BIP-173]: <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki>
//! [BIP-350]: <https://github.com/bitcoin/bips/blob/master/bip-0350.mediawiki>


use std::convert::TryFrom;
use std::fmt;

use bech32::primitives::gf32::Fe32;
use bech32::primitives::hrp::{self, Hrp};

use crate::error::write_err;

mod checksum;

pub use self::checksum::{Bech32, Bech32m, CHECKSUM_LENGTH};

/// Human-readable part and data part separator
pub const SEP: char = '1';

/// Minimum length of a bech32 string.
pub const MIN_LENGTH: usize = 8;

/// Maximum length of a bech32 string.
pub const MAX_LENGTH: usize = 90;

/// Maximum length of the human-readable part.
pub const MAX_HRP_LENGTH: usize = 83;

const BECH32_CONST: u32 = 1;
const BECH32M_CONST: u32 = 0x2bc8_30a3;

/// The checksum flavour of a bech32 string.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Variant {
    /// The original checksum of [BIP-173](https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki).
    Bech32,
    /// The modified checksum of [BIP-350](https://github.com/bitcoin/bips/blob/master/bip-0350.mediawiki).
    Bech32m,
}

impl Variant {
    /// The residue a valid string of this variant leaves behind.
    pub fn constant(self) -> u32 {
        match self {
            Variant::Bech32 => BECH32_CONST,
            Variant::Bech32m => BECH32M_CONST,
        }
    }

    /// Maps a checksum residue back to the variant it belongs to.
    pub fn from_residue(residue: u32) -> Option<Variant> {
        match residue {
            BECH32_CONST => Some(Variant::Bech32),
            BECH32M_CONST => Some(Variant::Bech32m),
            _ => None,
        }
    }
}

/// Errors from encoding or decoding a bech32 string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The string is shorter than 8 or longer than 90 characters.
    InvalidLength(usize),
    /// The human-readable part is empty or longer than 83 characters.
    InvalidHrpLength(usize),
    /// A character is outside the printable ASCII range, or is not part of
    /// the bech32 alphabet where one is required.
    InvalidChar {
        /// The offending character.
        ch: char,
        /// Byte offset of the character in the input.
        pos: usize,
    },
    /// The string mixes uppercase and lowercase letters.
    MixedCase,
    /// The string has no `"1"` separator.
    MissingSeparator,
    /// The last `"1"` leaves no human-readable part, or too little room
    /// for the checksum.
    MisplacedSeparator(usize),
    /// The checksum does not match the rest of the data.
    InvalidChecksum,
    /// A data value handed to the encoder does not fit in 5 bits.
    InvalidDataValue(u8),
    /// The human-readable part was refused by [`Hrp::parse`].
    Hrp(hrp::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidLength(len) => {
                write!(f, "bech32 string must be {} to {} characters, not {}", MIN_LENGTH, MAX_LENGTH, len)
            }
            Error::InvalidHrpLength(len) => {
                write!(f, "human-readable part must be 1 to {} characters, not {}", MAX_HRP_LENGTH, len)
            }
            Error::InvalidChar { ch, pos } => {
                write!(f, "invalid character {:?} at position {}", ch, pos)
            }
            Error::MixedCase => write!(f, "mixed-case strings not allowed"),
            Error::MissingSeparator => write!(f, "missing human-readable separator, \"{}\"", SEP),
            Error::MisplacedSeparator(pos) => write!(f, "misplaced separator at position {}", pos),
            Error::InvalidChecksum => write!(f, "invalid checksum"),
            Error::InvalidDataValue(v) => write!(f, "data value {} does not fit in 5 bits", v),
            Error::Hrp(ref e) => write_err!(f, "invalid human-readable part"; e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Hrp(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<hrp::Error> for Error {
    fn from(e: hrp::Error) -> Error {
        Error::Hrp(e)
    }
}

/// Encodes a human-readable part and 5-bit data with the bech32 checksum.
///
/// The human-readable part is lowercased; the result is all lowercase.
pub fn encode(hrp: &str, data: &[u8]) -> Result<String, Error> {
    encode_with_variant(hrp, data, Variant::Bech32)
}

/// Encodes a human-readable part and 5-bit data with the given checksum
/// variant.
pub fn encode_with_variant(hrp: &str, data: &[u8], variant: Variant) -> Result<String, Error> {
    let hrp = check_hrp(hrp)?;
    let data = to_fes(data)?;

    let len = hrp.len() + 1 + data.len() + CHECKSUM_LENGTH;
    if len > MAX_LENGTH {
        return Err(Error::InvalidLength(len));
    }

    let mut ret = String::with_capacity(len);
    write_unchecked(&mut ret, hrp, &data, variant).expect("writing to a String cannot fail");
    Ok(ret)
}

/// Encodes a bech32 payload to an [fmt::Formatter].
///
/// No length checks are done. The human-readable part is written
/// lowercase. An unparseable human-readable part or a data value above 31
/// is reported as [`fmt::Error`].
pub fn encode_to_fmt(fmt: &mut fmt::Formatter, hrp: &str, data: &[u8], variant: Variant) -> fmt::Result {
    let hrp = Hrp::parse(&hrp.to_ascii_lowercase()).map_err(|_| fmt::Error)?;
    let data = to_fes(data).map_err(|_| fmt::Error)?;
    write_unchecked(fmt, hrp, &data, variant)
}

fn write_unchecked<W: fmt::Write>(w: &mut W, hrp: Hrp, data: &[Fe32], variant: Variant) -> fmt::Result {
    let checksum = checksum::create_checksum(hrp, data, variant);
    for c in hrp.lowercase_char_iter() {
        w.write_char(c)?;
    }
    w.write_char(SEP)?;
    for fe in data.iter().chain(checksum.iter()) {
        w.write_char(fe.to_char())?;
    }
    Ok(())
}

fn to_fes(data: &[u8]) -> Result<Vec<Fe32>, Error> {
    data.iter().map(|&v| Fe32::try_from(v).map_err(|_| Error::InvalidDataValue(v))).collect()
}

/// Checks the human-readable part and parses it.
fn check_hrp(hrp: &str) -> Result<Hrp, Error> {
    if hrp.is_empty() || hrp.len() > MAX_HRP_LENGTH {
        return Err(Error::InvalidHrpLength(hrp.len()));
    }
    if let Some((pos, ch)) = hrp.char_indices().find(|&(_, ch)| !is_printable(ch)) {
        return Err(Error::InvalidChar { ch, pos });
    }
    Ok(Hrp::parse(&hrp.to_ascii_lowercase())?)
}

fn is_printable(ch: char) -> bool {
    let c = u32::from(ch);
    c >= 33 && c <= 126
}

/// Decodes a bech32 string into its lowercased human-readable part and
/// 5-bit data, checksum removed.
///
/// Only the bech32 checksum is accepted; a valid bech32m string fails with
/// [`Error::InvalidChecksum`].
pub fn decode(s: &str) -> Result<(String, Vec<u8>), Error> {
    match decode_with_variant(s)? {
        (hrp, data, Variant::Bech32) => Ok((hrp, data)),
        (_, _, Variant::Bech32m) => Err(Error::InvalidChecksum),
    }
}

/// Decodes a bech32 or bech32m string, reporting which checksum matched.
pub fn decode_with_variant(s: &str) -> Result<(String, Vec<u8>, Variant), Error> {
    // Ensure overall length is within bounds
    let len = s.len();
    if len < MIN_LENGTH || len > MAX_LENGTH {
        return Err(Error::InvalidLength(len));
    }

    let mut has_lower = false;
    let mut has_upper = false;
    for (pos, ch) in s.char_indices() {
        if !is_printable(ch) {
            return Err(Error::InvalidChar { ch, pos });
        }
        if ch.is_ascii_lowercase() {
            has_lower = true;
        } else if ch.is_ascii_uppercase() {
            has_upper = true;
        }
    }
    if has_lower && has_upper {
        return Err(Error::MixedCase);
    }

    let sep = match s.rfind(SEP) {
        None => return Err(Error::MissingSeparator),
        Some(pos) if pos == 0 || len - pos - 1 < CHECKSUM_LENGTH => {
            return Err(Error::MisplacedSeparator(pos));
        }
        Some(pos) => pos,
    };

    // Everything is printable ASCII from here on, so bytes and chars agree.
    let hrp = Hrp::parse(&s[..sep].to_ascii_lowercase())?;
    let data = s[sep + 1..]
        .char_indices()
        .map(|(i, ch)| Fe32::from_char(ch).map_err(|_| Error::InvalidChar { ch, pos: sep + 1 + i }))
        .collect::<Result<Vec<Fe32>, Error>>()?;

    let variant = Variant::from_residue(checksum::residue(hrp, &data)).ok_or(Error::InvalidChecksum)?;

    let payload = data[..data.len() - CHECKSUM_LENGTH].iter().map(|fe| fe.to_u8()).collect();
    Ok((hrp.to_lowercase(), payload, variant))
}
