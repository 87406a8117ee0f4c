//! Error types for Keel

use std::fmt;

/// Unified error type for all Keel operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeelError {
    /// Malformed, truncated or over-long wire data
    Protocol(String),

    /// Well-formed algorithm name that is not implemented
    UnsupportedAlgorithm(String),

    /// Security policy violation (algorithm mismatch, invalid key material)
    Security(String),

    /// Configuration error
    Config(String),
}

impl KeelError {
    /// Returns `true` if the error was caused by undecodable input.
    ///
    /// Callers treat both decode errors and policy errors as a rejection;
    /// this only distinguishes the two for diagnostics.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            KeelError::Protocol(_) | KeelError::UnsupportedAlgorithm(_)
        )
    }
}

impl fmt::Display for KeelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeelError::Protocol(msg) => write!(f, "Protocol error: {}", msg),
            KeelError::UnsupportedAlgorithm(name) => {
                write!(f, "Unsupported algorithm: {}", name)
            }
            KeelError::Security(msg) => write!(f, "Security error: {}", msg),
            KeelError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for KeelError {}

/// Result type for Keel operations
pub type KeelResult<T> = Result<T, KeelError>;
