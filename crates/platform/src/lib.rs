//! # Keel Platform
//!
//! Core platform types shared by the Keel SSH key verification crates.
//!
//! This crate provides the unified error type (`KeelError`, `KeelResult`).
//!
//! # Examples
//!
//! ```
//! use keel_platform::{KeelError, KeelResult};
//!
//! fn decode_length(buf: &[u8]) -> KeelResult<u32> {
//!     let bytes: [u8; 4] = buf
//!         .get(..4)
//!         .and_then(|b| b.try_into().ok())
//!         .ok_or_else(|| KeelError::Protocol("truncated length".to_string()))?;
//!     Ok(u32::from_be_bytes(bytes))
//! }
//!
//! # fn main() -> KeelResult<()> {
//! assert_eq!(decode_length(&[0, 0, 0, 7])?, 7);
//! assert!(decode_length(&[0, 0]).is_err());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod error;

pub use error::{KeelError, KeelResult};

/// Platform version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
