//! `ecdsa-sha2-*` public keys (RFC 5656)
//!
//! ```text
//! string    "ecdsa-sha2-[identifier]"
//! string    [identifier]
//! string    Q
//! ```
//!
//! The signature blob nests a second structure:
//!
//! ```text
//! string    "ecdsa-sha2-[identifier]"
//! string    ecdsa_signature_blob
//!
//! ecdsa_signature_blob:
//! mpint     r
//! mpint     s
//! ```

use super::KeyFamily;
use crate::ssh::algorithm::{EcdsaCurve, KeyAlgorithm, SignatureAlgorithm};
use crate::ssh::config::VerifierConfig;
use crate::ssh::der;
use crate::ssh::wire::{check_point, WireReader, WireWriter};
use keel_platform::{KeelError, KeelResult};
use num_bigint::BigInt;
use signature::Verifier;

/// ECDSA public key on a NIST curve.
#[derive(Clone, PartialEq, Eq)]
pub struct EcdsaPublicKey {
    curve: EcdsaCurve,
    /// Validated uncompressed SEC1 point
    point: Vec<u8>,
}

impl EcdsaPublicKey {
    /// Builds a key from an uncompressed SEC1 point.
    pub fn from_sec1(curve: EcdsaCurve, point: &[u8]) -> KeelResult<Self> {
        check_point(curve, point)?;
        Ok(Self {
            curve,
            point: point.to_vec(),
        })
    }

    pub(crate) fn decode(curve: EcdsaCurve, mut reader: WireReader<'_>) -> KeelResult<Self> {
        reader.read_name_expected(curve.identifier())?;
        let point = reader.read_string_as_point(curve)?.to_vec();
        reader.read_end()?;
        Ok(Self { curve, point })
    }

    /// Curve of this key.
    pub fn curve(&self) -> EcdsaCurve {
        self.curve
    }

    /// Uncompressed SEC1 encoding `0x04 || X || Y`.
    pub fn point(&self) -> &[u8] {
        &self.point
    }

    /// Affine X coordinate.
    pub fn x(&self) -> &[u8] {
        let size = self.curve.coordinate_size();
        &self.point[1..1 + size]
    }

    /// Affine Y coordinate.
    pub fn y(&self) -> &[u8] {
        let size = self.curve.coordinate_size();
        &self.point[1 + size..]
    }

    fn decode_signature(blob: &[u8]) -> KeelResult<Vec<u8>> {
        let mut reader = WireReader::new(blob);
        let r = BigInt::from(reader.read_positive_mpint()?);
        let s = BigInt::from(reader.read_positive_mpint()?);
        reader.read_end()?;
        Ok(der::encode_ecdsa_signature(&r, &s))
    }
}

impl std::fmt::Debug for EcdsaPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcdsaPublicKey")
            .field("curve", &self.curve)
            .field("point", &hex::encode(&self.point))
            .finish()
    }
}

fn primitive_error<E>(what: &'static str) -> impl FnOnce(E) -> KeelError {
    move |_| KeelError::Protocol(what.to_string())
}

impl KeyFamily for EcdsaPublicKey {
    fn key_algorithm(&self) -> KeyAlgorithm {
        KeyAlgorithm::Ecdsa(self.curve)
    }

    fn bits(&self) -> usize {
        self.curve.bits()
    }

    fn encode(&self, writer: &mut WireWriter) {
        writer.write_name(self.curve.identifier());
        writer.write_string(&self.point);
    }

    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        blob: &[u8],
        message: &[u8],
        _config: &VerifierConfig,
    ) -> KeelResult<bool> {
        if algorithm.key_algorithm() != self.key_algorithm() {
            return Err(KeelError::Security(format!(
                "{} signature presented for {} key",
                algorithm.name(),
                self.curve.key_name()
            )));
        }

        let der = Self::decode_signature(blob)?;

        // Key handles are scoped to this call
        let valid = match self.curve {
            EcdsaCurve::NistP256 => {
                let key = p256::ecdsa::VerifyingKey::from_sec1_bytes(&self.point)
                    .map_err(primitive_error("Invalid P-256 point"))?;
                let sig = p256::ecdsa::Signature::from_der(&der)
                    .map_err(primitive_error("Invalid P-256 signature"))?;
                key.verify(message, &sig).is_ok()
            }
            EcdsaCurve::NistP384 => {
                let key = p384::ecdsa::VerifyingKey::from_sec1_bytes(&self.point)
                    .map_err(primitive_error("Invalid P-384 point"))?;
                let sig = p384::ecdsa::Signature::from_der(&der)
                    .map_err(primitive_error("Invalid P-384 signature"))?;
                key.verify(message, &sig).is_ok()
            }
            EcdsaCurve::NistP521 => {
                let key = p521::ecdsa::VerifyingKey::from_sec1_bytes(&self.point)
                    .map_err(primitive_error("Invalid P-521 point"))?;
                let sig = p521::ecdsa::Signature::from_der(&der)
                    .map_err(primitive_error("Invalid P-521 signature"))?;
                key.verify(message, &sig).is_ok()
            }
        };

        Ok(valid)
    }
}
