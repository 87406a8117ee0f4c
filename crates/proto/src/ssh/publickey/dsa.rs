//! `ssh-dss` public keys (RFC 4253 Section 6.6)
//!
//! ```text
//! string    "ssh-dss"
//! mpint     p
//! mpint     q
//! mpint     g
//! mpint     y
//! ```
//!
//! Signatures are SHA-1 DSA with `r` and `s` packed as two unsigned 160-bit
//! integers in a single 40-byte blob.

use super::KeyFamily;
use crate::ssh::algorithm::{KeyAlgorithm, SignatureAlgorithm};
use crate::ssh::config::VerifierConfig;
use crate::ssh::wire::{WireReader, WireWriter};
use keel_platform::{KeelError, KeelResult};
use num_bigint::BigUint;
use sha1::{Digest, Sha1};
use signature::DigestVerifier;

/// Bit length of the DSA subgroup order `q`.
pub const Q_BITS: u64 = 160;

const SCALAR_LEN: usize = (Q_BITS / 8) as usize;

/// DSA public key: domain parameters and public value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaPublicKey {
    p: BigUint,
    q: BigUint,
    g: BigUint,
    y: BigUint,
}

fn to_dsa(value: &BigUint) -> dsa::BigUint {
    dsa::BigUint::from_bytes_be(&value.to_bytes_be())
}

impl DsaPublicKey {
    /// Builds a key from its components.
    pub fn new(p: BigUint, q: BigUint, g: BigUint, y: BigUint) -> KeelResult<Self> {
        if q.bits() != Q_BITS {
            return Err(KeelError::Security(format!(
                "DSA q must be {} bits, got {}",
                Q_BITS,
                q.bits()
            )));
        }

        let key = Self { p, q, g, y };
        key.verifying_key().map(|_| key)
    }

    pub(crate) fn decode(mut reader: WireReader<'_>) -> KeelResult<Self> {
        let p = reader.read_positive_mpint()?;
        let q = reader.read_positive_mpint()?;
        let g = reader.read_positive_mpint()?;
        let y = reader.read_positive_mpint()?;
        reader.read_end()?;
        Self::new(p, q, g, y)
    }

    /// Prime modulus.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Subgroup order.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Generator.
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Public value.
    pub fn y(&self) -> &BigUint {
        &self.y
    }

    fn verifying_key(&self) -> KeelResult<dsa::VerifyingKey> {
        let components =
            dsa::Components::from_components(to_dsa(&self.p), to_dsa(&self.q), to_dsa(&self.g))
                .map_err(|_| KeelError::Security("Invalid DSA domain parameters".to_string()))?;

        dsa::VerifyingKey::from_components(components, to_dsa(&self.y))
            .map_err(|_| KeelError::Security("Invalid DSA public value".to_string()))
    }
}

impl KeyFamily for DsaPublicKey {
    fn key_algorithm(&self) -> KeyAlgorithm {
        KeyAlgorithm::Dsa
    }

    fn bits(&self) -> usize {
        self.p.bits() as usize
    }

    fn encode(&self, writer: &mut WireWriter) {
        writer.write_unsigned_mpint(&self.p);
        writer.write_unsigned_mpint(&self.q);
        writer.write_unsigned_mpint(&self.g);
        writer.write_unsigned_mpint(&self.y);
    }

    fn verify_signature(
        &self,
        _algorithm: SignatureAlgorithm,
        blob: &[u8],
        message: &[u8],
        _config: &VerifierConfig,
    ) -> KeelResult<bool> {
        if blob.len() != 2 * SCALAR_LEN {
            return Err(KeelError::Protocol(format!(
                "DSA signature must be {} bytes, got {}",
                2 * SCALAR_LEN,
                blob.len()
            )));
        }

        let (r, s) = blob.split_at(SCALAR_LEN);
        let signature = dsa::Signature::from_components(
            dsa::BigUint::from_bytes_be(r),
            dsa::BigUint::from_bytes_be(s),
        )
        .map_err(|_| KeelError::Protocol("DSA signature has a zero component".to_string()))?;

        let key = self.verifying_key()?;
        Ok(key
            .verify_digest(Sha1::new_with_prefix(message), &signature)
            .is_ok())
    }
}
