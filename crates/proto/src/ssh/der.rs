//! Minimal DER writer for ECDSA signatures
//!
//! SSH carries ECDSA `(r, s)` as two mpints while the verification primitive
//! takes the X.509 form:
//!
//! ```text
//! Ecdsa-Sig-Value ::= SEQUENCE {
//!     r INTEGER,
//!     s INTEGER }
//! ```

use num_bigint::{BigInt, Sign};

const TAG_INTEGER: u8 = 0x02;
const TAG_SEQUENCE: u8 = 0x30;

/// Encodes `(r, s)` as a DER `SEQUENCE` of two `INTEGER`s.
pub fn encode_ecdsa_signature(r: &BigInt, s: &BigInt) -> Vec<u8> {
    let mut body = Vec::with_capacity(2 * 70);
    write_integer(&mut body, r);
    write_integer(&mut body, s);

    let mut out = Vec::with_capacity(body.len() + 4);
    write_tlv(&mut out, TAG_SEQUENCE, &body);
    out
}

fn write_integer(out: &mut Vec<u8>, value: &BigInt) {
    // DER INTEGER content is minimal two's complement with at least one byte
    let content = match value.sign() {
        Sign::NoSign => vec![0x00],
        _ => value.to_signed_bytes_be(),
    };
    write_tlv(out, TAG_INTEGER, &content);
}

fn write_tlv(out: &mut Vec<u8>, tag: u8, content: &[u8]) {
    out.push(tag);
    write_length(out, content.len());
    out.extend_from_slice(content);
}

fn write_length(out: &mut Vec<u8>, len: usize) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }

    let bytes = len.to_be_bytes();
    let skip = bytes.iter().take_while(|b| **b == 0).count();
    out.push(0x80 | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
}
