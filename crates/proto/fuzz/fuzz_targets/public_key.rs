//! Fuzz target for public key and signature blob decoding.
//!
//! Run with:
//! ```bash
//! cd crates/proto
//! cargo +nightly fuzz run public_key -- -max_total_time=300
//! ```

#![no_main]
use keel_proto::ssh::names::AlgorithmName;
use keel_proto::ssh::publickey::PublicKey;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the split between key blob and signature blob
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let split = (split as usize).min(rest.len());
    let (key_blob, sig_blob) = rest.split_at(rest.len() - split);

    let Ok(key) = PublicKey::from_wire_bytes(key_blob) else {
        return;
    };

    let encoded = key.to_wire_bytes();
    assert_eq!(encoded, key_blob, "accepted key must re-encode byte-exact");
    let reparsed = PublicKey::from_wire_bytes(&encoded).expect("re-encoded key must parse");
    assert_eq!(key, reparsed);

    let _ = key.verify(AlgorithmName::ALL, b"fuzz", sig_blob);
});
