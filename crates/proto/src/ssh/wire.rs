//! SSH binary data representations (RFC 4251 Section 5)
//!
//! [`WireReader`] is a forward-only cursor over a borrowed buffer. Every read
//! either consumes exactly the bytes it declares or fails. A failed read is
//! fatal for the whole parse unit; callers discard it rather than resume.
//!
//! [`WireWriter`] produces the same encodings and is used to re-encode keys.
//!
//! # Example
//!
//! ```rust
//! use keel_proto::ssh::wire::{WireReader, WireWriter};
//! use num_bigint::BigInt;
//!
//! let mut writer = WireWriter::new();
//! writer.write_mpint(&BigInt::from(128));
//! assert_eq!(writer.as_bytes(), &[0, 0, 0, 2, 0x00, 0x80]);
//!
//! let bytes = writer.into_vec();
//! let mut reader = WireReader::new(&bytes);
//! assert_eq!(reader.read_mpint().unwrap(), BigInt::from(128));
//! reader.read_end().unwrap();
//! ```

use crate::ssh::algorithm::EcdsaCurve;
use crate::ssh::names::AlgorithmName;
use bytes::{BufMut, BytesMut};
use keel_platform::{KeelError, KeelResult};
use num_bigint::{BigInt, BigUint, Sign};

/// Longest mpint accepted: a 16384-bit magnitude plus one sign byte.
pub const MAX_MPINT_LEN: usize = 2049;

/// Longest algorithm name allowed by RFC 4251 Section 6.
pub const MAX_NAME_LEN: usize = 64;

/// Uncompressed point tag (SEC1 Section 2.3.3).
const POINT_UNCOMPRESSED: u8 = 0x04;

/// Forward-only reader over SSH wire data.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> WireReader<'a> {
    /// Creates a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Reads exactly `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> KeelResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(KeelError::Protocol(format!(
                "Data truncated: expected {} bytes at offset {}, {} remain",
                len,
                self.offset,
                self.remaining()
            )));
        }

        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// Reads a big-endian `uint32`.
    pub fn read_u32(&mut self) -> KeelResult<u32> {
        let bytes = self.read_bytes(4).map_err(|_| {
            KeelError::Protocol(format!("Cannot read length at offset {}", self.offset))
        })?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads a `string`: a `uint32` length followed by that many bytes.
    pub fn read_string_as_bytes(&mut self) -> KeelResult<&'a [u8]> {
        let start = self.offset;
        let len = self.read_u32()? as usize;
        self.read_bytes(len).map_err(|e| {
            self.offset = start;
            e
        })
    }

    /// Reads a `name` and matches it against the interned name table.
    ///
    /// Malformed names (empty, too long, not printable US-ASCII) are
    /// protocol errors. A well-formed name that is not in the table is
    /// reported as [`KeelError::UnsupportedAlgorithm`].
    pub fn read_name(&mut self) -> KeelResult<AlgorithmName> {
        let raw = self.read_string_as_bytes()?;

        if raw.is_empty() || raw.len() > MAX_NAME_LEN {
            return Err(KeelError::Protocol(format!(
                "Invalid algorithm name length: {}",
                raw.len()
            )));
        }
        if !raw.iter().all(|b| (0x21..=0x7e).contains(b) && *b != b',') {
            return Err(KeelError::Protocol(
                "Algorithm name contains invalid characters".to_string(),
            ));
        }

        AlgorithmName::from_bytes(raw).ok_or_else(|| {
            KeelError::UnsupportedAlgorithm(String::from_utf8_lossy(raw).into_owned())
        })
    }

    /// Reads a `name` that must equal `expected`.
    pub fn read_name_expected(&mut self, expected: AlgorithmName) -> KeelResult<AlgorithmName> {
        let name = self.read_name()?;
        if name != expected {
            return Err(KeelError::Protocol(format!(
                "Expected algorithm {}, got {}",
                expected, name
            )));
        }
        Ok(name)
    }

    /// Reads a `name` that must be in `allowed` and in `expected`.
    ///
    /// `allowed` is the caller's negotiated set; `expected` is the set the
    /// surrounding structure admits. A name outside either is rejected.
    pub fn read_name_allowed(
        &mut self,
        expected: &[AlgorithmName],
        allowed: &[AlgorithmName],
    ) -> KeelResult<AlgorithmName> {
        let name = self.read_name()?;
        if !allowed.contains(&name) {
            return Err(KeelError::Security(format!(
                "Algorithm {} is not in the allowed set",
                name
            )));
        }
        if !expected.contains(&name) {
            return Err(KeelError::Security(format!(
                "Algorithm {} does not match the key type",
                name
            )));
        }
        Ok(name)
    }

    /// Reads a `string` holding an uncompressed point on `curve`.
    ///
    /// Returns the SEC1 encoding `0x04 || X || Y` after checking the tag,
    /// the exact length and that the point lies on the curve.
    pub fn read_string_as_point(&mut self, curve: EcdsaCurve) -> KeelResult<&'a [u8]> {
        let point = self.read_string_as_bytes()?;
        check_point(curve, point)?;
        Ok(point)
    }

    /// Reads an `mpint`: two's complement, big-endian, minimal length.
    ///
    /// Zero is the empty string. A leading `0x00` is only valid when the
    /// next byte has its high bit set, and a leading `0xff` only when the
    /// next byte has it clear.
    pub fn read_mpint(&mut self) -> KeelResult<BigInt> {
        let bytes = self.read_string_as_bytes()?;

        if bytes.len() > MAX_MPINT_LEN {
            return Err(KeelError::Protocol(format!(
                "mpint too long: {} bytes",
                bytes.len()
            )));
        }

        match bytes {
            [0x00] => {
                return Err(KeelError::Protocol(
                    "mpint zero must be encoded as an empty string".to_string(),
                ))
            }
            [0x00, next, ..] if next & 0x80 == 0 => {
                return Err(KeelError::Protocol(
                    "mpint has superfluous leading zero byte".to_string(),
                ))
            }
            [0xff, next, ..] if next & 0x80 != 0 => {
                return Err(KeelError::Protocol(
                    "mpint has superfluous leading 0xff byte".to_string(),
                ))
            }
            _ => {}
        }

        Ok(BigInt::from_signed_bytes_be(bytes))
    }

    /// Reads an `mpint` that must be strictly positive.
    pub fn read_positive_mpint(&mut self) -> KeelResult<BigUint> {
        let value = self.read_mpint()?;
        match value.sign() {
            Sign::Plus => Ok(value.magnitude().clone()),
            Sign::Minus => Err(KeelError::Protocol("mpint must not be negative".to_string())),
            Sign::NoSign => Err(KeelError::Protocol("mpint must not be zero".to_string())),
        }
    }

    /// Fails unless every byte has been consumed.
    pub fn read_end(&self) -> KeelResult<()> {
        if self.offset != self.data.len() {
            return Err(KeelError::Protocol(format!(
                "Unexpected {} trailing bytes at offset {}",
                self.remaining(),
                self.offset
            )));
        }
        Ok(())
    }
}

/// Checks an uncompressed SEC1 point: tag, exact length, on-curve.
pub fn check_point(curve: EcdsaCurve, point: &[u8]) -> KeelResult<()> {
    match point.first() {
        Some(&POINT_UNCOMPRESSED) => {}
        Some(tag) => {
            return Err(KeelError::Protocol(format!(
                "Unsupported EC point encoding tag: 0x{:02x}",
                tag
            )))
        }
        None => return Err(KeelError::Protocol("Empty EC point".to_string())),
    }

    let expected = 1 + 2 * curve.coordinate_size();
    if point.len() != expected {
        return Err(KeelError::Protocol(format!(
            "Invalid EC point length for {}: expected {}, got {}",
            curve.identifier(),
            expected,
            point.len()
        )));
    }

    curve.validate_point(point)
}

/// Encodes an integer as mpint payload bytes (no length prefix).
pub fn mpint_bytes(value: &BigInt) -> Vec<u8> {
    if value.sign() == Sign::NoSign {
        return Vec::new();
    }
    value.to_signed_bytes_be()
}

fn string_length(len: usize) -> u32 {
    u32::try_from(len)
        .unwrap_or_else(|_| panic!("string of {} bytes does not fit a uint32 length", len))
}

/// Writer for SSH wire data.
#[derive(Debug, Clone, Default)]
pub struct WireWriter {
    buf: BytesMut,
}

impl WireWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a big-endian `uint32`.
    pub fn write_u32(&mut self, value: u32) {
        self.buf.put_u32(value);
    }

    /// Writes raw bytes with no length prefix.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// Writes a `string`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is longer than `u32::MAX`, which no SSH key or
    /// signature field can be.
    pub fn write_string(&mut self, bytes: &[u8]) {
        self.buf.put_u32(string_length(bytes.len()));
        self.buf.put_slice(bytes);
    }

    /// Writes a `name`.
    pub fn write_name(&mut self, name: AlgorithmName) {
        self.write_string(name.as_bytes());
    }

    /// Writes an `mpint`.
    pub fn write_mpint(&mut self, value: &BigInt) {
        self.write_string(&mpint_bytes(value));
    }

    /// Writes a non-negative `mpint`.
    pub fn write_unsigned_mpint(&mut self, value: &BigUint) {
        self.write_mpint(&BigInt::from_biguint(Sign::Plus, value.clone()));
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the writer.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}
