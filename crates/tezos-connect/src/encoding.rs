//! Binary encoding primitives shared by operations and Micheline
//!
//! Integers use the zarith layout: little-endian groups of 7 bits with the
//! high bit flagging a continuation. Signed values keep the sign in bit 6 of
//! the first byte, which therefore only carries 6 bits of magnitude.

use num_bigint::BigUint;
use thiserror::Error;

use crate::types::BigInt;

/// Encoding error
#[derive(Debug, Error)]
pub enum Error {
    /// Variable length field does not fit its length prefix
    #[error("field of {len} bytes exceeds the maximum of {max}")]
    TooLarge {
        /// Actual length
        len: usize,
        /// Maximum length allowed by the prefix
        max: usize,
    },
    /// Negative value where a natural number is required
    #[error("negative value `{0}` cannot be encoded as a natural number")]
    Negative(BigInt),
}

/// Append a natural number in zarith form
pub fn write_nat(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Append an arbitrary precision natural number in zarith form
pub fn write_big_nat(out: &mut Vec<u8>, value: &BigInt) -> Result<(), Error> {
    if value.is_negative() {
        return Err(Error::Negative(value.clone()));
    }

    write_groups(out, value.magnitude().clone());
    Ok(())
}

/// Append an arbitrary precision signed integer in zarith form
pub fn write_big_int(out: &mut Vec<u8>, value: &BigInt) {
    let mut rest = value.magnitude().clone();

    let mut first = low_bits(&rest, 0x3f);
    if value.is_negative() {
        first |= 0x40;
    }
    rest >>= 6u32;
    if rest.bits() == 0 {
        out.push(first);
        return;
    }
    out.push(first | 0x80);

    write_groups(out, rest);
}

/// Seven bit groups of `rest`, least significant first
fn write_groups(out: &mut Vec<u8>, mut rest: BigUint) {
    loop {
        let byte = low_bits(&rest, 0x7f);
        rest >>= 7u32;
        if rest.bits() == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

fn low_bits(value: &BigUint, mask: u8) -> u8 {
    let low = value.iter_u32_digits().next().unwrap_or(0);
    (low & u32::from(mask)) as u8
}

/// Append a blob prefixed with its length as big-endian `u32`
pub fn write_dynamic(out: &mut Vec<u8>, bytes: &[u8]) -> Result<(), Error> {
    let len = u32::try_from(bytes.len()).map_err(|_| Error::TooLarge {
        len: bytes.len(),
        max: u32::MAX as usize,
    })?;
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(bytes);
    Ok(())
}

/// Append a blob prefixed with its length as a single byte
pub fn write_short_dynamic(out: &mut Vec<u8>, bytes: &[u8]) -> Result<(), Error> {
    let len = u8::try_from(bytes.len()).map_err(|_| Error::TooLarge {
        len: bytes.len(),
        max: u8::MAX as usize,
    })?;
    out.push(len);
    out.extend_from_slice(bytes);
    Ok(())
}
