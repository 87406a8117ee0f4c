//! SSH public key decoding and signature verification for Keel.
//!
//! This crate turns untrusted SSH wire data into typed public keys and
//! checks signatures made with them:
//!
//! - **RSA** - `ssh-rsa` keys with `rsa-sha2-512`, `rsa-sha2-256` and `ssh-rsa` signatures
//! - **DSA** - `ssh-dss`
//! - **ECDSA** - `ecdsa-sha2-nistp256`, `ecdsa-sha2-nistp384`, `ecdsa-sha2-nistp521`
//! - **EdDSA** - `ssh-ed25519`
//!
//! # Features
//!
//! - `ssh` (default) - SSH public key support
//!
//! # Example
//!
//! ```rust
//! use keel_proto::ssh::{AlgorithmName, PublicKey};
//!
//! // ssh-ed25519 blob with a truncated key
//! let blob = [
//!     0, 0, 0, 11, b's', b's', b'h', b'-', b'e', b'd', b'2', b'5', b'5', b'1', b'9',
//!     0, 0, 0, 1, 0x42,
//! ];
//! let err = PublicKey::from_wire_bytes(&blob).unwrap_err();
//! assert!(err.is_decode_error());
//! ```
//!
//! # Security
//!
//! - Every structure is parsed with an exact-consumption check; trailing bytes are errors
//! - Signature algorithm names are gated against the caller's allowed set and the key type
//! - All cryptographic operations use vetted libraries (`ring`, RustCrypto, `dalek`)
//! - Decode failures during verification always mean "not verified"
//!
//! # References
//!
//! - [RFC 4251](https://datatracker.ietf.org/doc/html/rfc4251) - SSH Protocol Architecture
//! - [RFC 4253](https://datatracker.ietf.org/doc/html/rfc4253) - SSH Transport Layer Protocol
//! - [RFC 5656](https://datatracker.ietf.org/doc/html/rfc5656) - Elliptic Curve Algorithm Integration in SSH
//! - [RFC 8332](https://datatracker.ietf.org/doc/html/rfc8332) - Use of RSA Keys with SHA-256 and SHA-512
//! - [RFC 8709](https://datatracker.ietf.org/doc/html/rfc8709) - Ed25519 and Ed448 Public Key Algorithms for SSH

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

#[cfg(feature = "ssh")]
pub mod ssh;
