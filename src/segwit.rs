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

//! # Segregated Witness Addresses
//!
//! Interprets bech32 data as a witness version followed by a witness
//! program, following the address rules of BIP-173. Every witness version
//! is checksummed with [`Variant::Bech32`](crate::Variant::Bech32).

use std::fmt;

use crate::bech32;
use crate::convert::{ConversionError, FromBase32, ToBase32};
use crate::error::write_err;

/// Minimum length of a segwit address.
pub const MIN_ADDRESS_LENGTH: usize = 14;

/// Maximum length of a segwit address.
pub const MAX_ADDRESS_LENGTH: usize = 74;

/// Highest valid witness version.
pub const MAX_WITNESS_VERSION: u8 = 16;

/// Minimum length of a witness program, in bytes.
pub const MIN_PROGRAM_LENGTH: usize = 2;

/// Maximum length of a witness program, in bytes.
pub const MAX_PROGRAM_LENGTH: usize = 40;

/// `OP_0`, the script opcode of witness version 0.
const OP_0: u8 = 0x00;

/// `OP_1` to `OP_16` are `OP_1_BASE + version`.
const OP_1_BASE: u8 = 0x50;

/// Errors from encoding or decoding a segwit address.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The underlying bech32 string is invalid.
    Bech32(bech32::Error),
    /// The address is shorter than 14 or longer than 74 characters.
    InvalidLength(usize),
    /// The address belongs to a different human-readable part.
    HrpMismatch {
        /// The human-readable part the caller asked for, lowercased.
        expected: String,
        /// The human-readable part found in the address.
        found: String,
    },
    /// The data part is empty, so there is no witness version.
    MissingWitnessVersion,
    /// Script version must be 0 to 16 inclusive.
    InvalidWitnessVersion(u8),
    /// Invalid padding on the witness program.
    Padding(ConversionError),
    /// The witness program must be between 2 and 40 bytes in length.
    InvalidWitnessProgramLength(usize),
    /// A v0 witness program must be either of length 20 or 32.
    InvalidSegwitV0ProgramLength(usize),
    /// The bytes are not a witness `scriptPubKey`.
    InvalidScriptPubkey,
    /// A freshly encoded address did not decode back to its input.
    RoundTripMismatch,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Bech32(ref e) => write_err!(f, "bech32 error"; e),
            Error::InvalidLength(len) => write!(
                f,
                "segwit address must be {} to {} characters, not {}",
                MIN_ADDRESS_LENGTH, MAX_ADDRESS_LENGTH, len
            ),
            Error::HrpMismatch { ref expected, ref found } => {
                write!(f, "expected human-readable part {:?}, found {:?}", expected, found)
            }
            Error::MissingWitnessVersion => write!(f, "the witness version is missing"),
            Error::InvalidWitnessVersion(v) => write!(f, "invalid witness script version: {}", v),
            Error::Padding(ref e) => write_err!(f, "invalid padding on the witness program"; e),
            Error::InvalidWitnessProgramLength(len) => write!(
                f,
                "the witness program must be between {} and {} bytes in length, not {}",
                MIN_PROGRAM_LENGTH, MAX_PROGRAM_LENGTH, len
            ),
            Error::InvalidSegwitV0ProgramLength(len) => {
                write!(f, "a v0 witness program must be length 20 or 32, not {}", len)
            }
            Error::InvalidScriptPubkey => write!(f, "not a witness program scriptPubKey"),
            Error::RoundTripMismatch => write!(f, "encoded address does not decode to its input"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Bech32(ref e) => Some(e),
            Error::Padding(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<bech32::Error> for Error {
    fn from(e: bech32::Error) -> Error {
        Error::Bech32(e)
    }
}

impl From<ConversionError> for Error {
    fn from(e: ConversionError) -> Error {
        Error::Padding(e)
    }
}

/// A witness version together with its witness program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WitnessProgram {
    version: u8,
    program: Vec<u8>,
}

impl WitnessProgram {
    /// Creates a witness program after checking the version and program
    /// length rules.
    pub fn new(version: u8, program: Vec<u8>) -> Result<WitnessProgram, Error> {
        validate(version, program.len())?;
        Ok(WitnessProgram { version, program })
    }

    /// The witness version, 0 to 16.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// The witness program bytes.
    pub fn program(&self) -> &[u8] {
        &self.program
    }

    /// Splits into the version and the program bytes.
    pub fn into_parts(self) -> (u8, Vec<u8>) {
        (self.version, self.program)
    }

    /// The `scriptPubKey` locking to this program.
    pub fn script_pubkey(&self) -> Vec<u8> {
        script_pubkey(self)
    }

    /// Parses a `scriptPubKey` of the form `[OP_n, len, program]`.
    pub fn from_script_pubkey(script: &[u8]) -> Result<WitnessProgram, Error> {
        let (&op, rest) = script.split_first().ok_or(Error::InvalidScriptPubkey)?;
        let (&len, program) = rest.split_first().ok_or(Error::InvalidScriptPubkey)?;

        let version = match op {
            OP_0 => 0,
            op if op > OP_1_BASE && op <= OP_1_BASE + MAX_WITNESS_VERSION => op - OP_1_BASE,
            _ => return Err(Error::InvalidScriptPubkey),
        };
        if usize::from(len) != program.len() {
            return Err(Error::InvalidScriptPubkey);
        }

        WitnessProgram::new(version, program.to_vec())
    }

    /// The 5-bit data part: version followed by the regrouped program.
    fn to_base32(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(1 + (self.program.len() * 8 + 4) / 5);
        data.push(self.version);
        data.extend(self.program.to_base32());
        data
    }

    /// Writes the address for `hrp` without further checks.
    pub(crate) fn encode_to_fmt(&self, f: &mut fmt::Formatter, hrp: &str) -> fmt::Result {
        bech32::encode_to_fmt(f, hrp, &self.to_base32(), bech32::Variant::Bech32)
    }
}

/// Checks the witness version and program length rules.
fn validate(version: u8, len: usize) -> Result<(), Error> {
    if version > MAX_WITNESS_VERSION {
        return Err(Error::InvalidWitnessVersion(version));
    }
    if len < MIN_PROGRAM_LENGTH || len > MAX_PROGRAM_LENGTH {
        return Err(Error::InvalidWitnessProgramLength(len));
    }
    if version == 0 && len != 20 && len != 32 {
        return Err(Error::InvalidSegwitV0ProgramLength(len));
    }
    Ok(())
}

fn check_address_length(len: usize) -> Result<(), Error> {
    if len < MIN_ADDRESS_LENGTH || len > MAX_ADDRESS_LENGTH {
        return Err(Error::InvalidLength(len));
    }
    Ok(())
}

/// Decodes a segwit address, requiring the human-readable part `hrp`.
///
/// The comparison with `hrp` ignores case.
pub fn decode(hrp: &str, address: &str) -> Result<WitnessProgram, Error> {
    decode_unlogged(hrp, address).map_err(|e| {
        log::debug!("rejected segwit address {:?}: {}", address, e);
        e
    })
}

fn decode_unlogged(hrp: &str, address: &str) -> Result<WitnessProgram, Error> {
    check_address_length(address.len())?;

    let (found, data) = bech32::decode(address)?;
    if !found.eq_ignore_ascii_case(hrp) {
        return Err(Error::HrpMismatch { expected: hrp.to_ascii_lowercase(), found });
    }

    let (&version, payload) = data.split_first().ok_or(Error::MissingWitnessVersion)?;
    if version > MAX_WITNESS_VERSION {
        return Err(Error::InvalidWitnessVersion(version));
    }

    let program = Vec::<u8>::from_base32(payload)?;
    WitnessProgram::new(version, program)
}

/// Encodes a witness version and program as a segwit address.
///
/// The result is decoded again before it is returned; a mismatch yields
/// [`Error::RoundTripMismatch`] instead of a corrupt address.
pub fn encode(hrp: &str, version: u8, program: &[u8]) -> Result<String, Error> {
    validate(version, program.len())?;

    let witness = WitnessProgram { version, program: program.to_vec() };
    let address = bech32::encode(hrp, &witness.to_base32())?;
    check_address_length(address.len())?;

    match decode(hrp, &address) {
        Ok(ref decoded) if *decoded == witness => Ok(address),
        res => {
            log::error!("segwit address {} failed its round trip: {:?}", address, res);
            Err(Error::RoundTripMismatch)
        }
    }
}

/// Builds the `scriptPubKey` for a witness program: `OP_0` or
/// `OP_1`..`OP_16`, then the program length, then the program.
pub fn script_pubkey(witness: &WitnessProgram) -> Vec<u8> {
    let (version, program) = (witness.version, &witness.program);

    let mut script = Vec::with_capacity(2 + program.len());
    script.push(if version == 0 { OP_0 } else { OP_1_BASE + version });
    // At most 40 bytes, checked by `WitnessProgram::new`.
    script.push(program.len() as u8);
    script.extend_from_slice(program);
    script
}
