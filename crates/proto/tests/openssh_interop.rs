//! OpenSSH interoperability tests.
//!
//! The fixtures were produced by OpenSSH tools:
//!
//! ```bash
//! ssh-keygen -t ecdsa -b 256 -C keel@test -f openssh_ecdsa_p256
//! ssh-keygen -Y sign -f openssh_ecdsa_p256 -n file message.txt
//! ssh-keygen -l -f openssh_ecdsa_p256.pub
//! ```
//!
//! (likewise for P-384, P-521, Ed25519 and 2048-bit RSA, which `ssh-keygen`
//! signs with `rsa-sha2-512`). Signatures use the SSHSIG envelope; the
//! inner `signature` field is an ordinary SSH signature blob.

mod common;

use common::{fixture, parse_openssh_pub, SshSig};
use keel_proto::ssh::algorithm::{EcdsaCurve, KeyAlgorithm};
use keel_proto::ssh::names::AlgorithmName;
use keel_proto::ssh::publickey::PublicKey;

struct Fixture {
    name: &'static str,
    key_algorithm: KeyAlgorithm,
    signature_algorithm: AlgorithmName,
    bits: usize,
    /// `ssh-keygen -l` output
    fingerprint: &'static str,
}

const FIXTURES: &[Fixture] = &[
    Fixture {
        name: "openssh_ecdsa_p256",
        key_algorithm: KeyAlgorithm::Ecdsa(EcdsaCurve::NistP256),
        signature_algorithm: AlgorithmName::ECDSA_SHA2_NISTP256,
        bits: 256,
        fingerprint: "SHA256:+dA1UvXtdsoYjnd5Ld0DRaWvUtkrcYHGLH7kJp76eRU",
    },
    Fixture {
        name: "openssh_ecdsa_p384",
        key_algorithm: KeyAlgorithm::Ecdsa(EcdsaCurve::NistP384),
        signature_algorithm: AlgorithmName::ECDSA_SHA2_NISTP384,
        bits: 384,
        fingerprint: "SHA256:/vGuyMw1YDaQlGptC911aRp5NNq8zOqrOGT9uMYFCbM",
    },
    Fixture {
        name: "openssh_ecdsa_p521",
        key_algorithm: KeyAlgorithm::Ecdsa(EcdsaCurve::NistP521),
        signature_algorithm: AlgorithmName::ECDSA_SHA2_NISTP521,
        bits: 521,
        fingerprint: "SHA256:ALLCQxz8BUKAQu4kpzlMdo6+/xUkIc7wfhOHAnhSxMw",
    },
    Fixture {
        name: "openssh_ed25519",
        key_algorithm: KeyAlgorithm::Ed25519,
        signature_algorithm: AlgorithmName::SSH_ED25519,
        bits: 256,
        fingerprint: "SHA256:67JzhNF+fhBHyrOnBJ8W/bKVQ14a9EFSiPMwus7LZrM",
    },
    Fixture {
        name: "openssh_rsa",
        key_algorithm: KeyAlgorithm::Rsa,
        signature_algorithm: AlgorithmName::RSA_SHA2_512,
        bits: 2048,
        fingerprint: "SHA256:QAqSWwHW17nEjoJLow76+yBHJgU8YRKxTX40LTr4Zgk",
    },
];

fn load(f: &Fixture) -> (Vec<u8>, SshSig) {
    let blob = parse_openssh_pub(&fixture(&format!("{}.pub", f.name)));
    let sig = SshSig::parse(&fixture(&format!("{}.sig", f.name)));
    (blob, sig)
}

#[test]
fn test_parse_openssh_public_keys() {
    for f in FIXTURES {
        let (blob, _) = load(f);
        let key = PublicKey::from_wire_bytes(&blob).unwrap();

        assert_eq!(key.key_algorithm(), f.key_algorithm, "{}", f.name);
        assert_eq!(key.algorithm(), f.key_algorithm.name());
        assert_eq!(key.bits(), f.bits, "{}", f.name);
    }
}

#[test]
fn test_reencode_is_byte_exact() {
    for f in FIXTURES {
        let (blob, _) = load(f);
        let key = PublicKey::from_wire_bytes(&blob).unwrap();
        assert_eq!(key.to_wire_bytes(), blob, "{}", f.name);
    }
}

#[test]
fn test_fingerprints_match_ssh_keygen() {
    for f in FIXTURES {
        let (blob, _) = load(f);
        let key = PublicKey::from_wire_bytes(&blob).unwrap();
        assert_eq!(key.fingerprint_sha256(), f.fingerprint, "{}", f.name);
    }
}

#[test]
fn test_verify_ssh_keygen_signatures() {
    common::init_tracing();
    let message = fixture("message.txt");

    for f in FIXTURES {
        let (blob, sig) = load(f);
        let key = PublicKey::from_wire_bytes(&blob).unwrap();
        assert_eq!(sig.public_key, blob, "{}", f.name);
        assert_eq!(sig.namespace, b"file");

        let signed = sig.signed_data(message.as_bytes());
        assert!(
            key.verify(&[f.signature_algorithm], &signed, &sig.signature),
            "{}",
            f.name
        );
        assert_eq!(
            key.try_verify(&[f.signature_algorithm], &signed, &sig.signature),
            Ok(true)
        );
    }
}

#[test]
fn test_ssh_keygen_signatures_respect_allowed_set() {
    let message = fixture("message.txt");

    for f in FIXTURES {
        let (blob, sig) = load(f);
        let key = PublicKey::from_wire_bytes(&blob).unwrap();
        let signed = sig.signed_data(message.as_bytes());

        let others: Vec<AlgorithmName> = AlgorithmName::ALL
            .iter()
            .copied()
            .filter(|name| *name != f.signature_algorithm)
            .collect();
        assert!(!key.verify(&others, &signed, &sig.signature), "{}", f.name);
    }
}

#[test]
fn test_ssh_keygen_signatures_over_tampered_message() {
    let mut message = fixture("message.txt").into_bytes();
    message[4] ^= 0x20;

    for f in FIXTURES {
        let (blob, sig) = load(f);
        let key = PublicKey::from_wire_bytes(&blob).unwrap();
        let signed = sig.signed_data(&message);
        assert!(
            !key.verify(&[f.signature_algorithm], &signed, &sig.signature),
            "{}",
            f.name
        );
    }
}

#[test]
fn test_signatures_do_not_verify_under_other_keys() {
    let message = fixture("message.txt");
    let loaded: Vec<(Vec<u8>, SshSig)> = FIXTURES.iter().map(load).collect();

    for (i, (blob, _)) in loaded.iter().enumerate() {
        let key = PublicKey::from_wire_bytes(blob).unwrap();
        for (j, (_, sig)) in loaded.iter().enumerate() {
            if i == j {
                continue;
            }
            let signed = sig.signed_data(message.as_bytes());
            assert!(!key.verify(AlgorithmName::ALL, &signed, &sig.signature));
        }
    }
}
