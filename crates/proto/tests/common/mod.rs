//! Shared helpers for integration tests.

#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use keel_proto::ssh::names::AlgorithmName;
use keel_proto::ssh::wire::{WireReader, WireWriter};
use num_bigint::BigUint;
use rsa::pkcs8::DecodePrivateKey;
use rsa::traits::PublicKeyParts;
use sha2::{Digest, Sha512};
use std::path::PathBuf;

/// Reads a file from `tests/fixtures`.
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

/// Wraps an inner signature blob as `string name || string blob`.
pub fn signature_blob(name: AlgorithmName, inner: &[u8]) -> Vec<u8> {
    let mut w = WireWriter::new();
    w.write_name(name);
    w.write_string(inner);
    w.into_vec()
}

/// ECDSA inner blob `mpint r || mpint s`.
pub fn ecdsa_inner(r: &[u8], s: &[u8]) -> Vec<u8> {
    let mut w = WireWriter::new();
    w.write_unsigned_mpint(&BigUint::from_bytes_be(r));
    w.write_unsigned_mpint(&BigUint::from_bytes_be(s));
    w.into_vec()
}

/// Decodes the base64 key blob of an OpenSSH `.pub` line.
pub fn parse_openssh_pub(line: &str) -> Vec<u8> {
    let field = line
        .split_whitespace()
        .nth(1)
        .expect("public key line has a base64 field");
    STANDARD.decode(field).expect("valid base64")
}

/// Decoded `SSH SIGNATURE` envelope (PROTOCOL.sshsig).
#[derive(Debug)]
pub struct SshSig {
    pub public_key: Vec<u8>,
    pub namespace: Vec<u8>,
    pub hash_algorithm: Vec<u8>,
    pub signature: Vec<u8>,
}

impl SshSig {
    /// Parses an armored signature as written by `ssh-keygen -Y sign`.
    pub fn parse(armored: &str) -> SshSig {
        let body: String = armored
            .lines()
            .filter(|line| !line.starts_with("-----"))
            .collect();
        let blob = STANDARD.decode(body).expect("valid base64");

        let mut reader = WireReader::new(&blob);
        assert_eq!(reader.read_bytes(6).unwrap(), b"SSHSIG");
        assert_eq!(reader.read_u32().unwrap(), 1);
        let public_key = reader.read_string_as_bytes().unwrap().to_vec();
        let namespace = reader.read_string_as_bytes().unwrap().to_vec();
        let _reserved = reader.read_string_as_bytes().unwrap();
        let hash_algorithm = reader.read_string_as_bytes().unwrap().to_vec();
        let signature = reader.read_string_as_bytes().unwrap().to_vec();
        reader.read_end().unwrap();

        SshSig {
            public_key,
            namespace,
            hash_algorithm,
            signature,
        }
    }

    /// The byte string the signer actually signed.
    pub fn signed_data(&self, message: &[u8]) -> Vec<u8> {
        assert_eq!(self.hash_algorithm, b"sha512");

        let mut w = WireWriter::new();
        w.write_raw(b"SSHSIG");
        w.write_string(&self.namespace);
        w.write_string(b"");
        w.write_string(&self.hash_algorithm);
        w.write_string(&Sha512::digest(message));
        w.into_vec()
    }
}

/// Loads a PKCS#8 RSA private key fixture.
pub fn rsa_private_key(name: &str) -> rsa::RsaPrivateKey {
    rsa::RsaPrivateKey::from_pkcs8_pem(&fixture(name)).expect("valid RSA fixture")
}

/// `ssh-rsa` wire blob for an RSA key.
pub fn rsa_key_blob(key: &rsa::RsaPublicKey) -> Vec<u8> {
    let mut w = WireWriter::new();
    w.write_name(AlgorithmName::SSH_RSA);
    w.write_unsigned_mpint(&BigUint::from_bytes_be(&key.e().to_bytes_be()));
    w.write_unsigned_mpint(&BigUint::from_bytes_be(&key.n().to_bytes_be()));
    w.into_vec()
}

/// A DSA key with one SHA-1 signature over [`DSA_MESSAGE`].
pub struct DsaVector {
    pub p: &'static str,
    pub q: &'static str,
    pub g: &'static str,
    pub y: &'static str,
    pub r: &'static str,
    pub s: &'static str,
}

pub const DSA_MESSAGE: &[u8] = b"keel dsa test vector";

pub const DSA_VECTORS: [DsaVector; 2] = [
    DsaVector {
        p: "fb9c7f231d3d7cd3a69c88e825123e8ce97afb97041c08ae692e81f7cd18f367f8296a9da9e4f70a71b1fa9225cbda469d99dfa11e75ab590a6afeb819f2e31343cc69f5290710632aacc4b15502f91bb10f08548a2b9b055bf97bca6fe3f48040544787b9181416c8e3ad99890b8ef13783bc54d75cc0c7a7da57f2e0279237",
        q: "f5aba3bedbb57d3fdb56615395718737481c9019",
        g: "d6c5fe3846fcdbe1952f5931e5e6e4ee3a5670294cf625ce984391a8f0423a4b8736280083c1f5f20e0f6f1eff140d61ee2922b55263b7360bfac8bbc4ff3d104d5ae4b617540936287cf20e04bcc16711c0d95c4bfd68a35f6eac39b28a053f466252e13568d3d535f1d2a55d782424abb843c79fe78c0ea50b51d64e10b643",
        y: "12c0a22fe70773a845d4f258139c238649b2f2b1551123e2c3576a009483d6d91d12dc318efc61d63c6b09d2836f239c813fe68adba59ca5e25b5dd59873a3484782672cacb07ada21bdefa32f3b379040b6b4789fd0e704bbdd064af0e51af60c307f8c8da5fcfc77b54b545c66559b45fed435e07f7c9336a3d734dd0d43fd",
        r: "40fd5434c6c18b6d3f713de34ee724a72f0f3bea",
        s: "9a034b63ab3e56945b4fc29830bdac8170700365",
    },
    DsaVector {
        p: "d43bea9ad2b238f96dcf2a02f56eaa3de023264b05566eddfbbe3644a822c44ee472130926ab71b541292bd9e83c958eb912a67872b8b1d90cfaa54b6c0539d53f982ef022d5eed1e7695333f05e6fd52b7ee30716d73d31b54dbb20a90730d4a1eac40c391d049ce41b57352960eb65a67cd2e62e8e4b7418d482d5c6ee1ae1",
        q: "f3734fa46db89232c4936b94499029110cbdf429",
        g: "4b277c1a194706faaf1a8d4ee920bc133f11db9e578765aa7e424a9503d2694e93b92e991a6549807c0947a61d069bba38b1df46ce336b5163b040b388a3e8fa2e2f00d855424b135a8491a209e85c7a3f801d7ae34cbbaaeaba5c338f1a5378779bd911a78ca2203eda70ece12d22a7dc1e46bfaeb3ebbac3c589662fdcdc9c",
        y: "7ebe8cc559f82ce226b23b55bf6e98abb30fd31094f726bcf37b759e6a54a83e7e6c2cc089eb78ea56c00e14f0466c3dfd3e0e6526ffd15d0e52f1441d9e0835450f0c1fd5a7385f7f12c3c9cb65332201d4005e8ce9c4d6af7a417dc2131eff1f53014859dfa1102106a6b49b7362acfc4a626a9d7abb7e3a6456a9cc392687",
        r: "15f11cc3dcc4ff61527745cd6d4ab0cd3bd6ec37",
        s: "f146b41075ef5ceda8a689f6ef697b62a0f61764",
    },
];

fn hex_uint(s: &str) -> BigUint {
    BigUint::from_bytes_be(&hex::decode(s).expect("valid hex"))
}

impl DsaVector {
    /// `ssh-dss` wire blob.
    pub fn key_blob(&self) -> Vec<u8> {
        let mut w = WireWriter::new();
        w.write_name(AlgorithmName::SSH_DSS);
        for part in [self.p, self.q, self.g, self.y] {
            w.write_unsigned_mpint(&hex_uint(part));
        }
        w.into_vec()
    }

    /// 40-byte `r || s` inner blob.
    pub fn inner_signature(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(40);
        for part in [self.r, self.s] {
            let bytes = hex::decode(part).expect("valid hex");
            out.resize(out.len() + 20 - bytes.len(), 0);
            out.extend_from_slice(&bytes);
        }
        out
    }
}

/// Installs a test subscriber so `debug!` output shows with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
