//! `ssh-ed25519` public keys (RFC 8709)
//!
//! ```text
//! string    "ssh-ed25519"
//! string    key (32 bytes)
//! ```

use super::KeyFamily;
use crate::ssh::algorithm::{KeyAlgorithm, SignatureAlgorithm};
use crate::ssh::config::VerifierConfig;
use crate::ssh::wire::{WireReader, WireWriter};
use ed25519_dalek::{Signature, Verifier, VerifyingKey, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use keel_platform::{KeelError, KeelResult};

/// Ed25519 public key.
#[derive(Clone, PartialEq, Eq)]
pub struct Ed25519PublicKey {
    key: [u8; PUBLIC_KEY_LENGTH],
}

impl Ed25519PublicKey {
    /// Builds a key from its 32-byte compressed encoding.
    pub fn from_bytes(bytes: &[u8]) -> KeelResult<Self> {
        let key: [u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            KeelError::Protocol(format!(
                "Ed25519 public key must be {} bytes, got {}",
                PUBLIC_KEY_LENGTH,
                bytes.len()
            ))
        })?;

        VerifyingKey::from_bytes(&key)
            .map_err(|e| KeelError::Protocol(format!("Invalid Ed25519 public key: {}", e)))?;

        Ok(Self { key })
    }

    pub(crate) fn decode(mut reader: WireReader<'_>) -> KeelResult<Self> {
        let bytes = reader.read_string_as_bytes()?;
        reader.read_end()?;
        Self::from_bytes(bytes)
    }

    /// Compressed key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519PublicKey")
            .field("public_key", &hex::encode(self.key))
            .finish()
    }
}

impl KeyFamily for Ed25519PublicKey {
    fn key_algorithm(&self) -> KeyAlgorithm {
        KeyAlgorithm::Ed25519
    }

    fn bits(&self) -> usize {
        256
    }

    fn encode(&self, writer: &mut WireWriter) {
        writer.write_string(&self.key);
    }

    fn verify_signature(
        &self,
        _algorithm: SignatureAlgorithm,
        blob: &[u8],
        message: &[u8],
        config: &VerifierConfig,
    ) -> KeelResult<bool> {
        let sig_bytes: [u8; SIGNATURE_LENGTH] = blob.try_into().map_err(|_| {
            KeelError::Protocol(format!(
                "Ed25519 signature must be {} bytes, got {}",
                SIGNATURE_LENGTH,
                blob.len()
            ))
        })?;
        let signature = Signature::from_bytes(&sig_bytes);

        let key = VerifyingKey::from_bytes(&self.key)
            .map_err(|e| KeelError::Protocol(format!("Invalid Ed25519 public key: {}", e)))?;

        let result = if config.ed25519_strict {
            key.verify_strict(message, &signature)
        } else {
            key.verify(message, &signature)
        };
        Ok(result.is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};
    use rand::RngCore;

    fn signing_key() -> SigningKey {
        let mut secret = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut secret);
        SigningKey::from_bytes(&secret)
    }

    #[test]
    fn test_from_bytes_length() {
        assert!(Ed25519PublicKey::from_bytes(&[0u8; 31]).is_err());
        assert!(Ed25519PublicKey::from_bytes(&[0u8; 33]).is_err());
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let key = signing_key();
        let mut w = WireWriter::new();
        w.write_string(key.verifying_key().as_bytes());
        let bytes = w.as_bytes().to_vec();
        assert!(Ed25519PublicKey::decode(WireReader::new(&bytes)).is_ok());

        w.write_raw(&[0]);
        let bytes = w.into_vec();
        assert!(Ed25519PublicKey::decode(WireReader::new(&bytes)).is_err());
    }

    #[test]
    fn test_verify_signature() {
        let signing = signing_key();
        let key = Ed25519PublicKey::from_bytes(signing.verifying_key().as_bytes()).unwrap();
        let signature = signing.sign(b"hello");

        let config = VerifierConfig::default();
        let strict = VerifierConfig {
            ed25519_strict: true,
            ..VerifierConfig::default()
        };
        for config in [&config, &strict] {
            assert!(key
                .verify_signature(
                    SignatureAlgorithm::SshEd25519,
                    &signature.to_bytes(),
                    b"hello",
                    config
                )
                .unwrap());
            assert!(!key
                .verify_signature(
                    SignatureAlgorithm::SshEd25519,
                    &signature.to_bytes(),
                    b"hellO",
                    config
                )
                .unwrap());
        }
    }

    #[test]
    fn test_signature_length() {
        let signing = signing_key();
        let key = Ed25519PublicKey::from_bytes(signing.verifying_key().as_bytes()).unwrap();
        let err = key
            .verify_signature(
                SignatureAlgorithm::SshEd25519,
                &[0u8; 63],
                b"hello",
                &VerifierConfig::default(),
            )
            .unwrap_err();
        assert!(err.is_decode_error());
    }
}
