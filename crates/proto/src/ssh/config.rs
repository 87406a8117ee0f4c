//! Signature verification policy.

use keel_platform::{KeelError, KeelResult};

/// RSA modulus floor used by [`VerifierConfig::default`].
pub const DEFAULT_RSA_MIN_MODULUS_BITS: usize = 2048;

/// RSA modulus floor used by [`VerifierConfig::legacy`].
pub const LEGACY_RSA_MIN_MODULUS_BITS: usize = 1024;

/// Verification policy knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Smallest RSA modulus accepted, in bits (default: 2048).
    ///
    /// Only 2048 and 1024 are valid; the primitive backing RSA verification
    /// knows no other floors.
    pub rsa_min_modulus_bits: usize,

    /// Use the strict Ed25519 equation, rejecting small-order keys and
    /// non-canonical `R` components (default: false).
    pub ed25519_strict: bool,
}

impl VerifierConfig {
    /// Creates the default verification policy.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keel_proto::ssh::config::VerifierConfig;
    ///
    /// let config = VerifierConfig::new();
    /// assert_eq!(config.rsa_min_modulus_bits, 2048);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new() -> Self {
        Self {
            rsa_min_modulus_bits: DEFAULT_RSA_MIN_MODULUS_BITS,
            ed25519_strict: false,
        }
    }

    /// Policy for peers still using 1024-bit RSA keys.
    pub fn legacy() -> Self {
        Self {
            rsa_min_modulus_bits: LEGACY_RSA_MIN_MODULUS_BITS,
            ..Self::new()
        }
    }

    /// Checks that the policy can be enforced.
    pub fn validate(&self) -> KeelResult<()> {
        match self.rsa_min_modulus_bits {
            DEFAULT_RSA_MIN_MODULUS_BITS | LEGACY_RSA_MIN_MODULUS_BITS => Ok(()),
            bits => Err(KeelError::Config(format!(
                "rsa_min_modulus_bits must be {} or {}, got {}",
                DEFAULT_RSA_MIN_MODULUS_BITS, LEGACY_RSA_MIN_MODULUS_BITS, bits
            ))),
        }
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self::new()
    }
}
