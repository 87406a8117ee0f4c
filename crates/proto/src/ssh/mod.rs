//! SSH public key algorithms.
//!
//! # Architecture
//!
//! Leaves first:
//!
//! 1. **Names** ([`names`]) - Interned algorithm identifiers
//! 2. **Registry** ([`algorithm`]) - Curves, hashes and signature encodings per algorithm
//! 3. **Wire Codec** ([`wire`], [`der`]) - RFC 4251 data types and the ECDSA DER re-encoding
//! 4. **Keys** ([`publickey`]) - Key decoding and signature verification
//!
//! Policy knobs live in [`config`].
//!
//! # Security Considerations
//!
//! - **Input Validation**: Length prefixes are checked against the remaining input before use
//! - **Exact Consumption**: Keys, outer signature blobs and inner signature blobs each end with a `read_end` check
//! - **Algorithm Agreement**: A signature must name an allowed algorithm that belongs to the key type
//! - **No Unsafe Code**: Pure Rust implementation without `unsafe`
//!
//! # References
//!
//! - [RFC 4251](https://datatracker.ietf.org/doc/html/rfc4251) - SSH Protocol Architecture
//! - [RFC 4253](https://datatracker.ietf.org/doc/html/rfc4253) - SSH Transport Layer Protocol
//! - [RFC 5656](https://datatracker.ietf.org/doc/html/rfc5656) - Elliptic Curve Algorithm Integration in SSH

pub mod algorithm;
pub mod config;
pub mod der;
pub mod names;
pub mod publickey;
pub mod wire;

// Re-export main types
pub use algorithm::{EcdsaCurve, HashAlgorithm, KeyAlgorithm, SignatureAlgorithm, SignatureEncoding};
pub use config::VerifierConfig;
pub use names::AlgorithmName;
pub use publickey::{DsaPublicKey, EcdsaPublicKey, Ed25519PublicKey, PublicKey, RsaPublicKey};
pub use wire::{WireReader, WireWriter};
