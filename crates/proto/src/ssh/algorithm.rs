//! SSH public key algorithm registry
//!
//! Static mapping from wire algorithm names to the parameters needed to
//! decode and verify them: key family, curve, hash function and the rule
//! used to decode the inner signature blob.
//!
//! # Supported Algorithms
//!
//! | Signature name        | Key type              | Hash            | Signature blob            |
//! |-----------------------|-----------------------|-----------------|---------------------------|
//! | `ecdsa-sha2-nistp256` | `ecdsa-sha2-nistp256` | SHA-256         | mpint r, mpint s          |
//! | `ecdsa-sha2-nistp384` | `ecdsa-sha2-nistp384` | SHA-384         | mpint r, mpint s          |
//! | `ecdsa-sha2-nistp521` | `ecdsa-sha2-nistp521` | SHA-512         | mpint r, mpint s          |
//! | `rsa-sha2-256`        | `ssh-rsa`             | SHA-256         | PKCS#1 v1.5               |
//! | `rsa-sha2-512`        | `ssh-rsa`             | SHA-512         | PKCS#1 v1.5               |
//! | `ssh-rsa`             | `ssh-rsa`             | SHA-1           | PKCS#1 v1.5               |
//! | `ssh-dss`             | `ssh-dss`             | SHA-1           | 20-byte r, 20-byte s      |
//! | `ssh-ed25519`         | `ssh-ed25519`         | built into EdDSA| 64 bytes                  |
//!
//! # Example
//!
//! ```rust
//! use keel_proto::ssh::algorithm::{KeyAlgorithm, SignatureAlgorithm, HashAlgorithm};
//! use keel_proto::ssh::names::AlgorithmName;
//!
//! let alg = SignatureAlgorithm::from_name(AlgorithmName::RSA_SHA2_512).unwrap();
//! assert_eq!(alg.key_algorithm(), KeyAlgorithm::Rsa);
//! assert_eq!(alg.hash(), Some(HashAlgorithm::Sha512));
//! ```

use crate::ssh::names::AlgorithmName;
use keel_platform::{KeelError, KeelResult};

/// Hash function bound to a signature algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-1 (legacy `ssh-rsa` and `ssh-dss` only)
    Sha1,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

/// NIST curve used by an ECDSA key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcdsaCurve {
    /// NIST P-256 (secp256r1)
    NistP256,
    /// NIST P-384 (secp384r1)
    NistP384,
    /// NIST P-521 (secp521r1)
    NistP521,
}

impl EcdsaCurve {
    /// Curve identifier carried inside the key blob (RFC 5656 Section 6.1).
    pub fn identifier(&self) -> AlgorithmName {
        match self {
            EcdsaCurve::NistP256 => AlgorithmName::NISTP256,
            EcdsaCurve::NistP384 => AlgorithmName::NISTP384,
            EcdsaCurve::NistP521 => AlgorithmName::NISTP521,
        }
    }

    /// Key type name for keys on this curve.
    pub fn key_name(&self) -> AlgorithmName {
        match self {
            EcdsaCurve::NistP256 => AlgorithmName::ECDSA_SHA2_NISTP256,
            EcdsaCurve::NistP384 => AlgorithmName::ECDSA_SHA2_NISTP384,
            EcdsaCurve::NistP521 => AlgorithmName::ECDSA_SHA2_NISTP521,
        }
    }

    /// Size in bytes of one affine coordinate.
    pub fn coordinate_size(&self) -> usize {
        match self {
            EcdsaCurve::NistP256 => 32,
            EcdsaCurve::NistP384 => 48,
            EcdsaCurve::NistP521 => 66,
        }
    }

    /// Field size in bits.
    pub fn bits(&self) -> usize {
        match self {
            EcdsaCurve::NistP256 => 256,
            EcdsaCurve::NistP384 => 384,
            EcdsaCurve::NistP521 => 521,
        }
    }

    /// Hash used for signatures on this curve (RFC 5656 Section 6.2.1).
    pub fn hash(&self) -> HashAlgorithm {
        match self {
            EcdsaCurve::NistP256 => HashAlgorithm::Sha256,
            EcdsaCurve::NistP384 => HashAlgorithm::Sha384,
            EcdsaCurve::NistP521 => HashAlgorithm::Sha512,
        }
    }

    /// Checks that an uncompressed SEC1 encoding is a valid point on this curve.
    pub fn validate_point(&self, sec1: &[u8]) -> KeelResult<()> {
        let valid = match self {
            EcdsaCurve::NistP256 => p256::ecdsa::VerifyingKey::from_sec1_bytes(sec1).is_ok(),
            EcdsaCurve::NistP384 => p384::ecdsa::VerifyingKey::from_sec1_bytes(sec1).is_ok(),
            EcdsaCurve::NistP521 => p521::ecdsa::VerifyingKey::from_sec1_bytes(sec1).is_ok(),
        };

        if valid {
            Ok(())
        } else {
            Err(KeelError::Protocol(format!(
                "EC point is not on curve {}",
                self.identifier()
            )))
        }
    }
}

/// Public key type, as named by the leading string of a key blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    /// `ssh-rsa`
    Rsa,
    /// `ssh-dss`
    Dsa,
    /// `ecdsa-sha2-nistp*`
    Ecdsa(EcdsaCurve),
    /// `ssh-ed25519`
    Ed25519,
}

impl KeyAlgorithm {
    /// Get the key type name as it appears on the wire
    pub fn name(&self) -> AlgorithmName {
        match self {
            KeyAlgorithm::Rsa => AlgorithmName::SSH_RSA,
            KeyAlgorithm::Dsa => AlgorithmName::SSH_DSS,
            KeyAlgorithm::Ecdsa(curve) => curve.key_name(),
            KeyAlgorithm::Ed25519 => AlgorithmName::SSH_ED25519,
        }
    }

    /// Parse key type from name
    pub fn from_name(name: AlgorithmName) -> Option<Self> {
        match name {
            AlgorithmName::SSH_RSA => Some(KeyAlgorithm::Rsa),
            AlgorithmName::SSH_DSS => Some(KeyAlgorithm::Dsa),
            AlgorithmName::ECDSA_SHA2_NISTP256 => Some(KeyAlgorithm::Ecdsa(EcdsaCurve::NistP256)),
            AlgorithmName::ECDSA_SHA2_NISTP384 => Some(KeyAlgorithm::Ecdsa(EcdsaCurve::NistP384)),
            AlgorithmName::ECDSA_SHA2_NISTP521 => Some(KeyAlgorithm::Ecdsa(EcdsaCurve::NistP521)),
            AlgorithmName::SSH_ED25519 => Some(KeyAlgorithm::Ed25519),
            _ => None,
        }
    }

    /// Signature algorithms that a key of this type may produce.
    pub fn signature_algorithms(&self) -> &'static [SignatureAlgorithm] {
        match self {
            KeyAlgorithm::Rsa => &[
                SignatureAlgorithm::RsaSha2_256,
                SignatureAlgorithm::RsaSha2_512,
                SignatureAlgorithm::SshRsa,
            ],
            KeyAlgorithm::Dsa => &[SignatureAlgorithm::SshDss],
            KeyAlgorithm::Ecdsa(EcdsaCurve::NistP256) => &[SignatureAlgorithm::EcdsaSha2Nistp256],
            KeyAlgorithm::Ecdsa(EcdsaCurve::NistP384) => &[SignatureAlgorithm::EcdsaSha2Nistp384],
            KeyAlgorithm::Ecdsa(EcdsaCurve::NistP521) => &[SignatureAlgorithm::EcdsaSha2Nistp521],
            KeyAlgorithm::Ed25519 => &[SignatureAlgorithm::SshEd25519],
        }
    }
}

/// How the inner signature blob is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureEncoding {
    /// Raw PKCS#1 v1.5 signature, modulus-sized (RFC 8332)
    Pkcs1v15,
    /// 40 bytes: 160-bit r followed by 160-bit s (RFC 4253 Section 6.6)
    DsaFixed,
    /// mpint r followed by mpint s, re-encoded to DER (RFC 5656 Section 3.1.2)
    EcdsaMpintPair,
    /// 64-byte EdDSA signature (RFC 8709 Section 6)
    Ed25519Fixed,
}

/// Signature algorithm identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    /// ssh-ed25519 - EdDSA signature using Ed25519
    SshEd25519,
    /// rsa-sha2-256 - RSA signature with SHA-256
    RsaSha2_256,
    /// rsa-sha2-512 - RSA signature with SHA-512
    RsaSha2_512,
    /// ssh-rsa - Legacy RSA with SHA-1
    SshRsa,
    /// ssh-dss - Legacy DSA with SHA-1
    SshDss,
    /// ecdsa-sha2-nistp256 - ECDSA signature using P-256 curve
    EcdsaSha2Nistp256,
    /// ecdsa-sha2-nistp384 - ECDSA signature using P-384 curve
    EcdsaSha2Nistp384,
    /// ecdsa-sha2-nistp521 - ECDSA signature using P-521 curve
    EcdsaSha2Nistp521,
}

impl SignatureAlgorithm {
    /// Every registered signature algorithm.
    pub const ALL: [SignatureAlgorithm; 8] = [
        SignatureAlgorithm::SshEd25519,
        SignatureAlgorithm::RsaSha2_256,
        SignatureAlgorithm::RsaSha2_512,
        SignatureAlgorithm::SshRsa,
        SignatureAlgorithm::SshDss,
        SignatureAlgorithm::EcdsaSha2Nistp256,
        SignatureAlgorithm::EcdsaSha2Nistp384,
        SignatureAlgorithm::EcdsaSha2Nistp521,
    ];

    /// Get the algorithm name as it appears in a signature blob
    pub fn name(&self) -> AlgorithmName {
        match self {
            SignatureAlgorithm::SshEd25519 => AlgorithmName::SSH_ED25519,
            SignatureAlgorithm::RsaSha2_256 => AlgorithmName::RSA_SHA2_256,
            SignatureAlgorithm::RsaSha2_512 => AlgorithmName::RSA_SHA2_512,
            SignatureAlgorithm::SshRsa => AlgorithmName::SSH_RSA,
            SignatureAlgorithm::SshDss => AlgorithmName::SSH_DSS,
            SignatureAlgorithm::EcdsaSha2Nistp256 => AlgorithmName::ECDSA_SHA2_NISTP256,
            SignatureAlgorithm::EcdsaSha2Nistp384 => AlgorithmName::ECDSA_SHA2_NISTP384,
            SignatureAlgorithm::EcdsaSha2Nistp521 => AlgorithmName::ECDSA_SHA2_NISTP521,
        }
    }

    /// Parse algorithm from name
    pub fn from_name(name: AlgorithmName) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| alg.name() == name)
    }

    /// Key type that produces this signature algorithm.
    pub fn key_algorithm(&self) -> KeyAlgorithm {
        match self {
            SignatureAlgorithm::SshEd25519 => KeyAlgorithm::Ed25519,
            SignatureAlgorithm::RsaSha2_256
            | SignatureAlgorithm::RsaSha2_512
            | SignatureAlgorithm::SshRsa => KeyAlgorithm::Rsa,
            SignatureAlgorithm::SshDss => KeyAlgorithm::Dsa,
            SignatureAlgorithm::EcdsaSha2Nistp256 => KeyAlgorithm::Ecdsa(EcdsaCurve::NistP256),
            SignatureAlgorithm::EcdsaSha2Nistp384 => KeyAlgorithm::Ecdsa(EcdsaCurve::NistP384),
            SignatureAlgorithm::EcdsaSha2Nistp521 => KeyAlgorithm::Ecdsa(EcdsaCurve::NistP521),
        }
    }

    /// Hash applied to the message, `None` when the primitive hashes internally.
    pub fn hash(&self) -> Option<HashAlgorithm> {
        match self {
            SignatureAlgorithm::SshEd25519 => None,
            SignatureAlgorithm::RsaSha2_256 => Some(HashAlgorithm::Sha256),
            SignatureAlgorithm::RsaSha2_512 => Some(HashAlgorithm::Sha512),
            SignatureAlgorithm::SshRsa | SignatureAlgorithm::SshDss => Some(HashAlgorithm::Sha1),
            SignatureAlgorithm::EcdsaSha2Nistp256 => Some(HashAlgorithm::Sha256),
            SignatureAlgorithm::EcdsaSha2Nistp384 => Some(HashAlgorithm::Sha384),
            SignatureAlgorithm::EcdsaSha2Nistp521 => Some(HashAlgorithm::Sha512),
        }
    }

    /// Layout of the inner signature blob.
    pub fn encoding(&self) -> SignatureEncoding {
        match self.key_algorithm() {
            KeyAlgorithm::Rsa => SignatureEncoding::Pkcs1v15,
            KeyAlgorithm::Dsa => SignatureEncoding::DsaFixed,
            KeyAlgorithm::Ecdsa(_) => SignatureEncoding::EcdsaMpintPair,
            KeyAlgorithm::Ed25519 => SignatureEncoding::Ed25519Fixed,
        }
    }
}
