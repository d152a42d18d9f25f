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

//! # Bit Regrouping
//!
//! Conversion between 8-bit bytes and the 5-bit groups carried by a
//! bech32 data part.
//!
//! From BIP-173:
//! > Re-arrange those bits into groups of 8 bits. Any incomplete group at the
//! > end MUST be 4 bits or less, MUST be all zeroes, and is discarded.

use std::convert::TryFrom;
use std::fmt;

use bech32::primitives::gf32::Fe32;
use bech32::primitives::iter::{ByteIterExt, Fe32IterExt};

/// Errors while regrouping bits.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConversionError {
    /// An input value does not fit in the source group width.
    InvalidValue(u8),
    /// A group width outside of 1 to 8 bits was requested.
    InvalidBitWidth(u32),
    /// The data payload has too many bits of padding.
    TooMuchPadding,
    /// The data payload is padded with non-zero bits.
    NonZeroPadding,
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConversionError::InvalidValue(v) => write!(f, "value {} is wider than the source group", v),
            ConversionError::InvalidBitWidth(w) => write!(f, "invalid group width: {} bits", w),
            ConversionError::TooMuchPadding => write!(f, "the data payload has too many bits of padding"),
            ConversionError::NonZeroPadding => write!(f, "the data payload is padded with non-zero bits"),
        }
    }
}

impl std::error::Error for ConversionError {}

/// Regroups `data` from `from`-bit values into `to`-bit values, most
/// significant bit first.
///
/// With `pad` set, a trailing partial group is filled with zero bits and
/// emitted. Without it, the leftover must be shorter than `from` bits and
/// all zero; it is then dropped.
pub fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, ConversionError> {
    if from == 0 || from > 8 {
        return Err(ConversionError::InvalidBitWidth(from));
    }
    if to == 0 || to > 8 {
        return Err(ConversionError::InvalidBitWidth(to));
    }

    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let maxv: u32 = (1 << to) - 1;
    let max_acc: u32 = (1 << (from + to - 1)) - 1;
    let mut ret = Vec::with_capacity((data.len() * from as usize + to as usize - 1) / to as usize);

    for &value in data {
        let v = u32::from(value);
        if v >> from != 0 {
            return Err(ConversionError::InvalidValue(value));
        }
        acc = ((acc << from) | v) & max_acc;
        bits += from;
        while bits >= to {
            bits -= to;
            ret.push(((acc >> bits) & maxv) as u8);
        }
    }

    if pad {
        if bits > 0 {
            ret.push(((acc << (to - bits)) & maxv) as u8);
        }
    } else if bits >= from {
        return Err(ConversionError::TooMuchPadding);
    } else if (acc << (to - bits)) & maxv != 0 {
        return Err(ConversionError::NonZeroPadding);
    }

    Ok(ret)
}

/// Types that can be regrouped into 5-bit values.
pub trait ToBase32 {
    /// Converts to 5-bit values, zero padding the final group.
    fn to_base32(&self) -> Vec<u8>;
}

impl<T: AsRef<[u8]> + ?Sized> ToBase32 for T {
    fn to_base32(&self) -> Vec<u8> {
        self.as_ref().iter().copied().bytes_to_fes().map(|fe| fe.to_u8()).collect()
    }
}

/// Types that can be rebuilt from 5-bit values.
pub trait FromBase32: Sized {
    /// Error returned by [`FromBase32::from_base32`].
    type Err;

    /// Rebuilds `Self` from 5-bit values.
    fn from_base32(b32: &[u8]) -> Result<Self, Self::Err>;
}

impl FromBase32 for Vec<u8> {
    type Err = ConversionError;

    fn from_base32(b32: &[u8]) -> Result<Self, Self::Err> {
        let fes = b32
            .iter()
            .map(|&v| Fe32::try_from(v).map_err(|_| ConversionError::InvalidValue(v)))
            .collect::<Result<Vec<Fe32>, _>>()?;
        check_padding(&fes)?;
        Ok(fes.into_iter().fes_to_bytes().collect())
    }
}

/// Checks the bits left over after regrouping 5-bit values into bytes.
///
/// From BIP-173:
/// > Any incomplete group at the end MUST be 4 bits or less, MUST be all
/// > zeroes, and is discarded.
fn check_padding(fes: &[Fe32]) -> Result<(), ConversionError> {
    let Some(last) = fes.last() else {
        return Ok(());
    };

    let padding_len = fes.len() * 5 % 8;
    if padding_len > 4 {
        return Err(ConversionError::TooMuchPadding);
    }
    if last.to_u8() & ((1u8 << padding_len) - 1) != 0 {
        return Err(ConversionError::NonZeroPadding);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_to_five_pads() {
        assert_eq!(convert_bits(&[0xff], 8, 5, true).unwrap(), vec![31, 28]);
        assert_eq!([0x75u8, 0x1e].to_base32(), vec![14, 20, 15, 0]);
        assert!(Vec::<u8>::new().to_base32().is_empty());
    }

    #[test]
    fn five_to_eight_drops_zero_padding() {
        assert_eq!(Vec::<u8>::from_base32(&[14, 20, 15, 0]).unwrap(), vec![0x75, 0x1e]);
        assert_eq!(Vec::<u8>::from_base32(&[]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn five_to_eight_rejects_bad_padding() {
        // 10 bits: one byte and two bits of padding, but the padding is set
        assert_eq!(Vec::<u8>::from_base32(&[31, 31]), Err(ConversionError::NonZeroPadding));
        // 5 bits: a whole group of padding
        assert_eq!(Vec::<u8>::from_base32(&[0]), Err(ConversionError::TooMuchPadding));
        // 15 bits: one byte and seven bits of padding
        assert_eq!(Vec::<u8>::from_base32(&[0, 0, 0]), Err(ConversionError::TooMuchPadding));
    }

    #[test]
    fn rejects_wide_values() {
        assert_eq!(convert_bits(&[32], 5, 8, false), Err(ConversionError::InvalidValue(32)));
        assert_eq!(convert_bits(&[1, 2, 0x80], 7, 8, true), Err(ConversionError::InvalidValue(0x80)));
    }

    #[test]
    fn rejects_bad_widths() {
        assert_eq!(convert_bits(&[1], 0, 5, true), Err(ConversionError::InvalidBitWidth(0)));
        assert_eq!(convert_bits(&[1], 8, 9, true), Err(ConversionError::InvalidBitWidth(9)));
    }

    #[test]
    fn traits_agree_with_convert_bits() {
        let bytes = [0x00, 0x01, 0x7f, 0x80, 0xfe, 0xff, 0x42];
        for len in 0..=bytes.len() {
            let b32 = bytes[..len].to_base32();
            assert_eq!(b32, convert_bits(&bytes[..len], 8, 5, true).unwrap());
            assert_eq!(Vec::<u8>::from_base32(&b32), convert_bits(&b32, 5, 8, false));
        }
        assert_eq!(Vec::<u8>::from_base32(&[14, 32]), Err(ConversionError::InvalidValue(32)));
    }

    #[test]
    fn whole_groups_need_no_padding() {
        let bytes = [0xde, 0xad, 0xbe, 0xef, 0x01];
        let b32 = bytes.to_base32();
        assert_eq!(b32.len(), 8);
        assert_eq!(Vec::<u8>::from_base32(&b32).unwrap(), bytes.to_vec());
    }
}
