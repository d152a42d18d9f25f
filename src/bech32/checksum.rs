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


//! # Checksum
//!
//! The BCH checksums over GF(32) of bech32 and bech32m, run through the
//! `bech32` crate's checksum engine. Six 5-bit groups are packed into the
//! low 30 bits of a `u32` residue.

use std::convert::TryFrom;

use bech32::primitives::checksum::{Checksum, Engine, PackedFe32};
use bech32::primitives::gf32::Fe32;
use bech32::primitives::hrp::Hrp;

use super::Variant;

/// Number of 5-bit values in a checksum.
pub const CHECKSUM_LENGTH: usize = 6;

/// Generator coefficients
const GEN: [u32; 5] = [0x3b6a_57b2, 0x2650_8e6d, 0x1ea1_19fa, 0x3d42_33dd, 0x2a14_62b3];

/// The BIP-173 checksum algorithm.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Bech32 {}

impl Checksum for Bech32 {
    type MidstateRepr = u32;
    const CHECKSUM_LENGTH: usize = CHECKSUM_LENGTH;
    const GENERATOR_SH: [u32; 5] = GEN;
    const TARGET_RESIDUE: u32 = 1;

    const CODE_LENGTH: usize = 1023;
}

/// The BIP-350 checksum algorithm.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Bech32m {}

impl Checksum for Bech32m {
    type MidstateRepr = u32;
    const CHECKSUM_LENGTH: usize = CHECKSUM_LENGTH;
    const GENERATOR_SH: [u32; 5] = GEN;
    const TARGET_RESIDUE: u32 = 0x2bc8_30a3;

    const CODE_LENGTH: usize = 1023;
}

/// Computes the checksum to append to `data`.
pub(crate) fn create_checksum(hrp: Hrp, data: &[Fe32], variant: Variant) -> [Fe32; CHECKSUM_LENGTH] {
    match variant {
        Variant::Bech32 => checksum_for::<Bech32>(hrp, data),
        Variant::Bech32m => checksum_for::<Bech32m>(hrp, data),
    }
}

fn checksum_for<Ck: Checksum<MidstateRepr = u32>>(hrp: Hrp, data: &[Fe32]) -> [Fe32; CHECKSUM_LENGTH] {
    let mut engine = Engine::<Ck>::new();
    engine.input_hrp(hrp);
    for &fe in data {
        engine.input_fe(fe);
    }
    engine.input_target_residue();

    let residue = engine.residue();
    let mut checksum = [Fe32::Q; CHECKSUM_LENGTH];
    for (i, fe) in checksum.iter_mut().enumerate() {
        // Unwrap ok since unpack masks to five bits.
        *fe = Fe32::try_from(residue.unpack(CHECKSUM_LENGTH - 1 - i)).expect("five-bit value");
    }
    checksum
}

/// Returns the residue of `hrp` followed by `data`, checksum included. A
/// valid string leaves the constant of its [`Variant`].
pub(crate) fn residue(hrp: Hrp, data: &[Fe32]) -> u32 {
    // Both variants share a generator, so one engine serves either.
    let mut engine = Engine::<Bech32>::new();
    engine.input_hrp(hrp);
    for &fe in data {
        engine.input_fe(fe);
    }
    *engine.residue()
}
