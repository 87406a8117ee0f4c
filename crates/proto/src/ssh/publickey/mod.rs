//! SSH public keys and signature verification
//!
//! [`PublicKey`] is a closed set of key families decoded from the SSH wire
//! format (RFC 4253 Section 6.6). A decoded key is immutable and can verify
//! any number of signatures, from any number of threads.
//!
//! Verification parses the signature blob in two scoped passes:
//!
//! ```text
//! string    signature algorithm name     (outer reader)
//! string    signature blob               (inner reader, family specific)
//! ```
//!
//! The signature algorithm name must be in the caller's allowed set **and**
//! be an algorithm this key's type produces. Both checks run before any
//! cryptographic primitive is touched.
//!
//! # Example
//!
//! ```rust
//! use keel_proto::ssh::names::AlgorithmName;
//! use keel_proto::ssh::publickey::PublicKey;
//!
//! # fn example(key_blob: &[u8], message: &[u8], signature: &[u8]) -> keel_platform::KeelResult<()> {
//! let key = PublicKey::from_wire_bytes(key_blob)?;
//!
//! let allowed = [AlgorithmName::RSA_SHA2_512, AlgorithmName::SSH_ED25519];
//! if key.verify(&allowed, message, signature) {
//!     println!("signature by {}", key.fingerprint_sha256());
//! }
//! # Ok(())
//! # }
//! ```

pub mod dsa;
pub mod ecdsa;
pub mod ed25519;
pub mod rsa;

pub use self::dsa::DsaPublicKey;
pub use self::ecdsa::EcdsaPublicKey;
pub use self::ed25519::Ed25519PublicKey;
pub use self::rsa::RsaPublicKey;

use crate::ssh::algorithm::{KeyAlgorithm, SignatureAlgorithm};
use crate::ssh::config::VerifierConfig;
use crate::ssh::names::AlgorithmName;
use crate::ssh::wire::{WireReader, WireWriter};
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use keel_platform::{KeelError, KeelResult};
use sha2::{Digest, Sha256};
use tracing::{debug, trace};

/// Capability shared by every key family.
pub(crate) trait KeyFamily {
    /// Key type of this key.
    fn key_algorithm(&self) -> KeyAlgorithm;

    /// Modulus or curve size in bits.
    fn bits(&self) -> usize;

    /// Writes the fields following the key type name.
    fn encode(&self, writer: &mut WireWriter);

    /// Verifies the inner signature blob.
    ///
    /// `algorithm` has already passed the allowed-set and key-type gates.
    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        blob: &[u8],
        message: &[u8],
        config: &VerifierConfig,
    ) -> KeelResult<bool>;
}

/// A decoded SSH public key.
#[derive(Clone, PartialEq, Eq)]
pub enum PublicKey {
    /// `ssh-rsa`
    Rsa(RsaPublicKey),
    /// `ssh-dss`
    Dsa(DsaPublicKey),
    /// `ecdsa-sha2-nistp256`, `ecdsa-sha2-nistp384`, `ecdsa-sha2-nistp521`
    Ecdsa(EcdsaPublicKey),
    /// `ssh-ed25519`
    Ed25519(Ed25519PublicKey),
}

impl PublicKey {
    /// Decodes a public key blob.
    ///
    /// The whole blob must be consumed. Fails with
    /// [`KeelError::UnsupportedAlgorithm`] for unknown key types and
    /// [`KeelError::Protocol`] for malformed data.
    pub fn from_wire_bytes(bytes: &[u8]) -> KeelResult<PublicKey> {
        Self::decode(bytes).map_err(|e| {
            debug!(error = %e, "Rejected public key blob");
            e
        })
    }

    fn decode(bytes: &[u8]) -> KeelResult<PublicKey> {
        let mut reader = WireReader::new(bytes);
        let name = reader.read_name()?;
        let algorithm = KeyAlgorithm::from_name(name).ok_or_else(|| {
            KeelError::UnsupportedAlgorithm(format!("{} is not a key type", name))
        })?;

        let key = match algorithm {
            KeyAlgorithm::Rsa => PublicKey::Rsa(RsaPublicKey::decode(reader)?),
            KeyAlgorithm::Dsa => PublicKey::Dsa(DsaPublicKey::decode(reader)?),
            KeyAlgorithm::Ecdsa(curve) => PublicKey::Ecdsa(EcdsaPublicKey::decode(curve, reader)?),
            KeyAlgorithm::Ed25519 => PublicKey::Ed25519(Ed25519PublicKey::decode(reader)?),
        };

        trace!(algorithm = %name, bits = key.bits(), "Decoded public key");
        Ok(key)
    }

    fn family(&self) -> &dyn KeyFamily {
        match self {
            PublicKey::Rsa(key) => key,
            PublicKey::Dsa(key) => key,
            PublicKey::Ecdsa(key) => key,
            PublicKey::Ed25519(key) => key,
        }
    }

    /// Key type name, as it leads the wire blob.
    pub fn algorithm(&self) -> AlgorithmName {
        self.key_algorithm().name()
    }

    /// Key type.
    pub fn key_algorithm(&self) -> KeyAlgorithm {
        self.family().key_algorithm()
    }

    /// Modulus size for RSA and DSA, field size for elliptic curves.
    pub fn bits(&self) -> usize {
        self.family().bits()
    }

    /// Re-encodes the key in canonical wire form.
    pub fn to_wire_bytes(&self) -> Vec<u8> {
        let mut writer = WireWriter::new();
        writer.write_name(self.algorithm());
        self.family().encode(&mut writer);
        writer.into_vec()
    }

    /// OpenSSH style fingerprint: `SHA256:` followed by unpadded base64.
    pub fn fingerprint_sha256(&self) -> String {
        let digest = Sha256::digest(self.to_wire_bytes());
        format!("SHA256:{}", STANDARD_NO_PAD.encode(digest))
    }

    /// Verifies `signature` over `message` with the default policy.
    ///
    /// Returns `false` for invalid signatures and for any malformed or
    /// disallowed signature blob.
    pub fn verify(&self, allowed: &[AlgorithmName], message: &[u8], signature: &[u8]) -> bool {
        self.verify_with_config(allowed, message, signature, &VerifierConfig::default())
    }

    /// Like [`verify`](Self::verify) with an explicit policy.
    pub fn verify_with_config(
        &self,
        allowed: &[AlgorithmName],
        message: &[u8],
        signature: &[u8],
        config: &VerifierConfig,
    ) -> bool {
        match self.try_verify_with_config(allowed, message, signature, config) {
            Ok(true) => {
                trace!(algorithm = %self.algorithm(), "Signature verified");
                true
            }
            Ok(false) => {
                debug!(
                    algorithm = %self.algorithm(),
                    fingerprint = %self.fingerprint_sha256(),
                    "Signature rejected by primitive"
                );
                false
            }
            Err(e) => {
                debug!(
                    algorithm = %self.algorithm(),
                    fingerprint = %self.fingerprint_sha256(),
                    error = %e,
                    "Signature rejected"
                );
                false
            }
        }
    }

    /// Verifies with the default policy, reporting why a blob was rejected.
    ///
    /// `Ok(false)` means the blob was well formed and allowed but the
    /// signature does not verify.
    pub fn try_verify(
        &self,
        allowed: &[AlgorithmName],
        message: &[u8],
        signature: &[u8],
    ) -> KeelResult<bool> {
        self.try_verify_with_config(allowed, message, signature, &VerifierConfig::default())
    }

    /// Like [`try_verify`](Self::try_verify) with an explicit policy.
    pub fn try_verify_with_config(
        &self,
        allowed: &[AlgorithmName],
        message: &[u8],
        signature: &[u8],
        config: &VerifierConfig,
    ) -> KeelResult<bool> {
        config.validate()?;

        let family: Vec<AlgorithmName> = self
            .key_algorithm()
            .signature_algorithms()
            .iter()
            .map(SignatureAlgorithm::name)
            .collect();

        let mut outer = WireReader::new(signature);
        let name = outer.read_name_allowed(&family, allowed)?;
        let algorithm = SignatureAlgorithm::from_name(name)
            .ok_or_else(|| KeelError::UnsupportedAlgorithm(name.to_string()))?;
        let blob = outer.read_string_as_bytes()?;
        outer.read_end()?;

        self.family().verify_signature(algorithm, blob, message, config)
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicKey")
            .field("algorithm", &self.algorithm().as_str())
            .field("bits", &self.bits())
            .field("fingerprint", &self.fingerprint_sha256())
            .finish_non_exhaustive()
    }
}

impl From<RsaPublicKey> for PublicKey {
    fn from(key: RsaPublicKey) -> Self {
        PublicKey::Rsa(key)
    }
}

impl From<DsaPublicKey> for PublicKey {
    fn from(key: DsaPublicKey) -> Self {
        PublicKey::Dsa(key)
    }
}

impl From<EcdsaPublicKey> for PublicKey {
    fn from(key: EcdsaPublicKey) -> Self {
        PublicKey::Ecdsa(key)
    }
}

impl From<Ed25519PublicKey> for PublicKey {
    fn from(key: Ed25519PublicKey) -> Self {
        PublicKey::Ed25519(key)
    }
}
