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

//! Agreement with the `bech32` and `bitcoin` crates.

extern crate bech32;
extern crate bitcoin;
extern crate hex_conservative;
extern crate segwit_addr;

use std::str::FromStr;

use bech32::{Bech32, Bech32m, Fe32, Hrp};
use hex_conservative::FromHex;
use segwit_addr::bech32 as ours;
use segwit_addr::{segwit, Address, AddressParams, ToBase32};

const PROGRAMS: [&str; 4] = [
    "751e76e8199196d454941c45d1b3a323f1433bd6",
    "1863143c14c5166804bd19203356da136c985678cd4d27a1b8c6329604903262",
    "000000c4a5cad46221b2a187905e5266362b99d5e91c6ce24d165dab93e86433",
    "0000000000000000000000000000000000000000",
];

#[test]
fn v0_addresses_agree_with_bech32_crate() {
    for hex in &PROGRAMS {
        let program = Vec::<u8>::from_hex(hex).unwrap();
        for &hrp in &["bc", "tb", "bcrt"] {
            let theirs = bech32::segwit::encode_v0(Hrp::parse(hrp).unwrap(), &program).unwrap();
            assert_eq!(segwit::encode(hrp, 0, &program).unwrap(), theirs);

            let prog = segwit::decode(hrp, &theirs).unwrap();
            assert_eq!(prog.program(), &program[..]);
        }
    }
}

#[test]
fn plain_strings_agree_with_bech32_crate() {
    let hrp = Hrp::parse("test").unwrap();
    let payloads: [&[u8]; 3] = [b"", b"hello", &[0xff; 40]];
    for payload in &payloads {
        let b32 = payload.to_base32();

        let theirs = bech32::encode::<Bech32>(hrp, payload).unwrap();
        assert_eq!(ours::encode("test", &b32).unwrap(), theirs);

        let theirs = bech32::encode::<Bech32m>(hrp, payload).unwrap();
        assert_eq!(ours::encode_with_variant("test", &b32, ours::Variant::Bech32m).unwrap(), theirs);
        let (_, data, variant) = ours::decode_with_variant(&theirs).unwrap();
        assert_eq!(data, b32);
        assert_eq!(variant, ours::Variant::Bech32m);
    }
}

#[test]
fn v1_checksums_differ_from_bech32_crate() {
    let program = [0x17u8; 32];

    // The bech32 crate follows BIP-350 for v1 and up.
    let theirs = bech32::segwit::encode(bech32::hrp::BC, Fe32::P, &program).unwrap();
    let mine = segwit::encode("bc", 1, &program).unwrap();
    assert_ne!(theirs, mine);

    assert!(segwit::decode("bc", &theirs).is_err());
    assert!(bech32::segwit::decode(&mine).is_err());
    // The data characters agree; only the checksum does not.
    assert_eq!(theirs[..theirs.len() - 6], mine[..mine.len() - 6]);
}

#[test]
fn v0_scripts_agree_with_bitcoin_crate() {
    let vectors = [
        ("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4", bitcoin::Network::Bitcoin),
        ("tb1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3q0sl5k7", bitcoin::Network::Testnet),
        ("bcrt1qw508d6qejxtdg4y5r3zarvary0c5xw7kygt080", bitcoin::Network::Regtest),
    ];

    for &(s, network) in &vectors {
        let theirs = bitcoin::Address::from_str(s).unwrap().require_network(network).unwrap();
        let mine = Address::from_str(s).unwrap();

        assert_eq!(mine.script_pubkey(), theirs.script_pubkey());
        assert_eq!(mine.to_string(), theirs.to_string());

        let back = bitcoin::Address::from_script(&mine.script_pubkey(), network).unwrap();
        assert_eq!(back, theirs);
    }
}

#[test]
fn p2wpkh_script_is_recognized_by_bitcoin_crate() {
    let hash = bitcoin::WPubkeyHash::from_str("751e76e8199196d454941c45d1b3a323f1433bd6").unwrap();
    let addr = Address::p2wpkh(&hash, &AddressParams::BITCOIN).unwrap();

    let script = addr.script_pubkey();
    assert!(script.is_p2wpkh());
    assert!(script.is_witness_program());
    assert_eq!(addr.to_string(), "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
}
