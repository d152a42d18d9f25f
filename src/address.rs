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

//! # Addresses
//!

use std::error;
use std::fmt;
use std::str::FromStr;

use bitcoin::hashes::Hash;
use bitcoin::{Script, ScriptBuf, WPubkeyHash, WScriptHash};
#[cfg(feature = "serde")]
use serde;

use crate::bech32::SEP;
use crate::error::write_err;
use crate::segwit::{self, WitnessProgram};

/// Address parsing error
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AddressError {
    /// The address is not a valid segwit address for its network.
    Segwit(segwit::Error),
    /// The human-readable part does not belong to any known network.
    UnknownHrp(String),
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AddressError::Segwit(ref e) => write_err!(f, "invalid segwit address"; e),
            AddressError::UnknownHrp(ref hrp) => {
                write!(f, "unknown human-readable part: {:?}", hrp)
            }
        }
    }
}

impl error::Error for AddressError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            AddressError::Segwit(ref e) => Some(e),
            AddressError::UnknownHrp(_) => None,
        }
    }
}

#[doc(hidden)]
impl From<segwit::Error> for AddressError {
    fn from(e: segwit::Error) -> AddressError {
        AddressError::Segwit(e)
    }
}

/// The parameters to derive addresses.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddressParams {
    /// The bech32 HRP for segwit addresses.
    pub bech_hrp: &'static str,
}

impl AddressParams {
    /// The Bitcoin mainnet address parameters.
    pub const BITCOIN: AddressParams = AddressParams { bech_hrp: "bc" };

    /// The Bitcoin testnet (and signet) address parameters.
    pub const TESTNET: AddressParams = AddressParams { bech_hrp: "tb" };

    /// The Bitcoin regtest address parameters.
    pub const REGTEST: AddressParams = AddressParams { bech_hrp: "bcrt" };
}

/// A segwit address on a particular network.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address {
    params: &'static AddressParams,
    program: WitnessProgram,
}

impl Address {
    /// Creates an address for a witness program.
    ///
    /// Fails if the program does not fit a segwit address with this
    /// network's human-readable part.
    pub fn new(program: WitnessProgram, params: &'static AddressParams) -> Result<Address, AddressError> {
        segwit::encode(params.bech_hrp, program.version(), program.program())?;
        Ok(Address { params, program })
    }

    /// Create a witness pay to public key hash address.
    pub fn p2wpkh(hash: &WPubkeyHash, params: &'static AddressParams) -> Result<Address, AddressError> {
        let program = WitnessProgram::new(0, hash.to_byte_array().to_vec())?;
        Address::new(program, params)
    }

    /// Create a witness pay to script hash address.
    pub fn p2wsh(hash: &WScriptHash, params: &'static AddressParams) -> Result<Address, AddressError> {
        let program = WitnessProgram::new(0, hash.to_byte_array().to_vec())?;
        Address::new(program, params)
    }

    /// Create a witness pay to script hash address committing to `script`.
    pub fn p2wsh_from_script(script: &Script, params: &'static AddressParams) -> Result<Address, AddressError> {
        Address::p2wsh(&WScriptHash::hash(script.as_bytes()), params)
    }

    /// Get an [Address] from an output script.
    pub fn from_script(script: &Script, params: &'static AddressParams) -> Option<Address> {
        let program = WitnessProgram::from_script_pubkey(script.as_bytes()).ok()?;
        Address::new(program, params).ok()
    }

    /// Generates a script pubkey spending to this address
    pub fn script_pubkey(&self) -> ScriptBuf {
        ScriptBuf::from_bytes(self.program.script_pubkey())
    }

    /// The network parameters of this address.
    pub fn params(&self) -> &'static AddressParams {
        self.params
    }

    /// The witness program this address pays to.
    pub fn witness_program(&self) -> &WitnessProgram {
        &self.program
    }

    /// Parse the address using the given parameters.
    /// When using the built-in parameters, you can use [FromStr].
    pub fn parse_with_params(s: &str, params: &'static AddressParams) -> Result<Address, AddressError> {
        let program = segwit::decode(params.bech_hrp, s)?;
        Ok(Address { params, program })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        self.program.encode_to_fmt(fmt, self.params.bech_hrp)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, fmt)
    }
}

/// Extract the bech32 prefix.
/// Returns the same slice when no prefix is found.
fn find_prefix(bech32: &str) -> &str {
    // Split at the last occurrence of the separator character '1'.
    match bech32.rfind(SEP) {
        None => bech32,
        Some(sep) => bech32.split_at(sep).0,
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Address, AddressError> {
        let nets = [&AddressParams::BITCOIN, &AddressParams::TESTNET, &AddressParams::REGTEST];

        let prefix = find_prefix(s);
        for &net in nets.iter() {
            if prefix.eq_ignore_ascii_case(net.bech_hrp) {
                return Address::parse_with_params(s, net);
            }
        }

        Err(AddressError::UnknownHrp(prefix.to_ascii_lowercase()))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Address {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use std::fmt::Formatter;

        struct Visitor;
        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = Address;

            fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                formatter.write_str("a segwit address")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Address::from_str(v).map_err(E::custom)
            }

            fn visit_borrowed_str<E>(self, v: &'de str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                self.visit_str(v)
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                self.visit_str(&v)
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
