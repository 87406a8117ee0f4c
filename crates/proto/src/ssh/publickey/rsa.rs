//! `ssh-rsa` public keys (RFC 4253 Section 6.6, RFC 8332)
//!
//! ```text
//! string    "ssh-rsa"
//! mpint     e
//! mpint     n
//! ```
//!
//! One key type verifies three signature algorithms: `rsa-sha2-512`,
//! `rsa-sha2-256` and the legacy SHA-1 `ssh-rsa`.

use super::KeyFamily;
use crate::ssh::algorithm::{HashAlgorithm, KeyAlgorithm, SignatureAlgorithm};
use crate::ssh::config::{VerifierConfig, LEGACY_RSA_MIN_MODULUS_BITS};
use crate::ssh::wire::{WireReader, WireWriter};
use keel_platform::{KeelError, KeelResult};
use num_bigint::BigUint;
use ring::signature::{
    RsaParameters, RsaPublicKeyComponents, RSA_PKCS1_1024_8192_SHA1_FOR_LEGACY_USE_ONLY,
    RSA_PKCS1_1024_8192_SHA256_FOR_LEGACY_USE_ONLY, RSA_PKCS1_1024_8192_SHA512_FOR_LEGACY_USE_ONLY,
    RSA_PKCS1_2048_8192_SHA1_FOR_LEGACY_USE_ONLY, RSA_PKCS1_2048_8192_SHA256,
    RSA_PKCS1_2048_8192_SHA512,
};

/// RSA public key: exponent and modulus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    e: BigUint,
    n: BigUint,
}

impl RsaPublicKey {
    /// Builds a key from its components.
    pub fn new(e: BigUint, n: BigUint) -> KeelResult<Self> {
        if !n.bit(0) {
            return Err(KeelError::Security("RSA modulus must be odd".to_string()));
        }
        if e < BigUint::from(3u32) || !e.bit(0) {
            return Err(KeelError::Security(
                "RSA public exponent must be odd and at least 3".to_string(),
            ));
        }
        Ok(Self { e, n })
    }

    pub(crate) fn decode(mut reader: WireReader<'_>) -> KeelResult<Self> {
        let e = reader.read_positive_mpint()?;
        let n = reader.read_positive_mpint()?;
        reader.read_end()?;
        Self::new(e, n)
    }

    /// Public exponent.
    pub fn exponent(&self) -> &BigUint {
        &self.e
    }

    /// Modulus.
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    fn modulus_len(&self) -> usize {
        ((self.n.bits() + 7) / 8) as usize
    }

    fn parameters(
        hash: HashAlgorithm,
        config: &VerifierConfig,
    ) -> KeelResult<&'static RsaParameters> {
        let legacy = config.rsa_min_modulus_bits == LEGACY_RSA_MIN_MODULUS_BITS;
        match (hash, legacy) {
            (HashAlgorithm::Sha1, false) => Ok(&RSA_PKCS1_2048_8192_SHA1_FOR_LEGACY_USE_ONLY),
            (HashAlgorithm::Sha1, true) => Ok(&RSA_PKCS1_1024_8192_SHA1_FOR_LEGACY_USE_ONLY),
            (HashAlgorithm::Sha256, false) => Ok(&RSA_PKCS1_2048_8192_SHA256),
            (HashAlgorithm::Sha256, true) => Ok(&RSA_PKCS1_1024_8192_SHA256_FOR_LEGACY_USE_ONLY),
            (HashAlgorithm::Sha512, false) => Ok(&RSA_PKCS1_2048_8192_SHA512),
            (HashAlgorithm::Sha512, true) => Ok(&RSA_PKCS1_1024_8192_SHA512_FOR_LEGACY_USE_ONLY),
            (other, _) => Err(KeelError::UnsupportedAlgorithm(format!(
                "RSA with {:?}",
                other
            ))),
        }
    }
}

impl KeyFamily for RsaPublicKey {
    fn key_algorithm(&self) -> KeyAlgorithm {
        KeyAlgorithm::Rsa
    }

    fn bits(&self) -> usize {
        self.n.bits() as usize
    }

    fn encode(&self, writer: &mut WireWriter) {
        writer.write_unsigned_mpint(&self.e);
        writer.write_unsigned_mpint(&self.n);
    }

    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        blob: &[u8],
        message: &[u8],
        config: &VerifierConfig,
    ) -> KeelResult<bool> {
        let hash = algorithm.hash().ok_or_else(|| {
            KeelError::UnsupportedAlgorithm(format!("{} is not an RSA signature", algorithm.name()))
        })?;

        let bits = self.bits();
        if bits < config.rsa_min_modulus_bits {
            return Err(KeelError::Security(format!(
                "RSA modulus of {} bits is below the {} bit minimum",
                bits, config.rsa_min_modulus_bits
            )));
        }

        let modulus_len = self.modulus_len();
        if blob.len() > modulus_len {
            return Err(KeelError::Protocol(format!(
                "RSA signature is {} bytes, modulus is {} bytes",
                blob.len(),
                modulus_len
            )));
        }

        // Some signers strip leading zero bytes from the signature
        let mut signature = vec![0u8; modulus_len - blob.len()];
        signature.extend_from_slice(blob);

        let n = self.n.to_bytes_be();
        let e = self.e.to_bytes_be();
        let key = RsaPublicKeyComponents { n: &n, e: &e };

        Ok(key
            .verify(Self::parameters(hash, config)?, message, &signature)
            .is_ok())
    }
}
