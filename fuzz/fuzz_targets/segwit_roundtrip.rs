
extern crate segwit_addr;

use segwit_addr::{bech32, segwit, Address};

fn do_test(data: &[u8]) {
    let s = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return,
    };

    if let Ok((hrp, b32, variant)) = bech32::decode_with_variant(s) {
        let reser = bech32::encode_with_variant(&hrp, &b32, variant).unwrap();
        assert_eq!(s.to_ascii_lowercase(), reser);
    }

    for hrp in &["bc", "tb", "bcrt"] {
        if let Ok(prog) = segwit::decode(hrp, s) {
            let reser = segwit::encode(hrp, prog.version(), prog.program()).unwrap();
            assert_eq!(s.to_ascii_lowercase(), reser);
        }
    }

    if let Ok(addr) = s.parse::<Address>() {
        assert_eq!(Address::from_script(&addr.script_pubkey(), addr.params()), Some(addr));
    }
}

#[cfg(feature = "afl")]
extern crate afl;
#[cfg(feature = "afl")]
fn main() {
    afl::read_stdio_bytes(|data| {
        do_test(&data);
    });
}

#[cfg(feature = "honggfuzz")]
#[macro_use] extern crate honggfuzz;
#[cfg(feature = "honggfuzz")]
fn main() {
    loop {
        fuzz!(|data| {
            do_test(data);
        });
    }
}
