//! Interned SSH algorithm names.
//!
//! Every algorithm identifier that can appear in a public key or signature
//! blob is a process-wide constant [`AlgorithmName`]. Names read off the wire
//! are matched against this table; two names are equal exactly when their
//! byte strings are equal.
//!
//! # Example
//!
//! ```rust
//! use keel_proto::ssh::names::AlgorithmName;
//!
//! let name = AlgorithmName::from_bytes(b"ecdsa-sha2-nistp256").unwrap();
//! assert_eq!(name, AlgorithmName::ECDSA_SHA2_NISTP256);
//! assert_eq!(name.as_str(), "ecdsa-sha2-nistp256");
//! assert!(AlgorithmName::from_bytes(b"ecdsa-sha2-nistp257").is_none());
//! ```

use std::fmt;

/// An interned algorithm identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlgorithmName(&'static str);

impl AlgorithmName {
    /// `ssh-ed25519` (RFC 8709)
    pub const SSH_ED25519: AlgorithmName = AlgorithmName("ssh-ed25519");
    /// `ssh-rsa` key type and legacy SHA-1 signature (RFC 4253)
    pub const SSH_RSA: AlgorithmName = AlgorithmName("ssh-rsa");
    /// `rsa-sha2-256` signature (RFC 8332)
    pub const RSA_SHA2_256: AlgorithmName = AlgorithmName("rsa-sha2-256");
    /// `rsa-sha2-512` signature (RFC 8332)
    pub const RSA_SHA2_512: AlgorithmName = AlgorithmName("rsa-sha2-512");
    /// `ssh-dss` (RFC 4253)
    pub const SSH_DSS: AlgorithmName = AlgorithmName("ssh-dss");
    /// `ecdsa-sha2-nistp256` (RFC 5656)
    pub const ECDSA_SHA2_NISTP256: AlgorithmName = AlgorithmName("ecdsa-sha2-nistp256");
    /// `ecdsa-sha2-nistp384` (RFC 5656)
    pub const ECDSA_SHA2_NISTP384: AlgorithmName = AlgorithmName("ecdsa-sha2-nistp384");
    /// `ecdsa-sha2-nistp521` (RFC 5656)
    pub const ECDSA_SHA2_NISTP521: AlgorithmName = AlgorithmName("ecdsa-sha2-nistp521");
    /// `nistp256` curve identifier
    pub const NISTP256: AlgorithmName = AlgorithmName("nistp256");
    /// `nistp384` curve identifier
    pub const NISTP384: AlgorithmName = AlgorithmName("nistp384");
    /// `nistp521` curve identifier
    pub const NISTP521: AlgorithmName = AlgorithmName("nistp521");

    /// All interned names.
    pub const ALL: &'static [AlgorithmName] = &[
        Self::SSH_ED25519,
        Self::SSH_RSA,
        Self::RSA_SHA2_256,
        Self::RSA_SHA2_512,
        Self::SSH_DSS,
        Self::ECDSA_SHA2_NISTP256,
        Self::ECDSA_SHA2_NISTP384,
        Self::ECDSA_SHA2_NISTP521,
        Self::NISTP256,
        Self::NISTP384,
        Self::NISTP521,
    ];

    /// Looks up the interned name for a raw wire identifier.
    pub fn from_bytes(bytes: &[u8]) -> Option<AlgorithmName> {
        Self::ALL
            .iter()
            .copied()
            .find(|name| name.0.as_bytes() == bytes)
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Returns the identifier as wire bytes.
    pub fn as_bytes(&self) -> &'static [u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for AlgorithmName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Debug for AlgorithmName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AlgorithmName({:?})", self.0)
    }
}

impl AsRef<str> for AlgorithmName {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl std::str::FromStr for AlgorithmName {
    type Err = keel_platform::KeelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
            .ok_or_else(|| keel_platform::KeelError::UnsupportedAlgorithm(s.to_string()))
    }
}
