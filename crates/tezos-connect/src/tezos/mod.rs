//! Tezos base58check primitives
//!
//! Addresses, public keys and block hashes share one textual layout: a
//! version prefix followed by the payload, checksummed with double SHA-256
//! and base58 encoded. The prefix bytes are chosen so every value of a kind
//! renders with the same leading characters (`tz1`, `KT1`, `edpk`, `B`, ...).

mod address;
mod hash;
mod key;

use bitcoin::base58;
use thiserror::Error;

pub use address::{Address, AddressKind};
pub use hash::BlockHash;
pub use key::{KeyKind, PublicKey};

/// Base58check value parse error
#[derive(Debug, Error)]
pub enum Error {
    /// Not valid base58 or bad checksum
    #[error("invalid base58check encoding: {0}")]
    Base58(#[from] base58::Error),
    /// Payload does not start with a known prefix
    #[error("unknown prefix for `{0}`")]
    UnknownPrefix(String),
    /// Payload has the wrong size for its prefix
    #[error("invalid payload length: expected {expected}, found {found}")]
    InvalidLength {
        /// Expected payload length
        expected: usize,
        /// Actual payload length
        found: usize,
    },
    /// Value is valid but not usable here
    #[error("{0}")]
    Unsupported(String),
}

/// Decode `s` and strip `prefix`, checking the payload length
pub(crate) fn decode_prefixed(s: &str, prefix: &[u8], len: usize) -> Result<Vec<u8>, Error> {
    let data = base58::decode_check(s)?;
    let payload = data
        .strip_prefix(prefix)
        .ok_or_else(|| Error::UnknownPrefix(s.to_string()))?;

    if payload.len() != len {
        return Err(Error::InvalidLength {
            expected: len,
            found: payload.len(),
        });
    }

    Ok(payload.to_vec())
}

/// Encode `payload` behind `prefix`
pub(crate) fn encode_prefixed(prefix: &[u8], payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(prefix.len() + payload.len());
    data.extend_from_slice(prefix);
    data.extend_from_slice(payload);
    base58::encode_check(&data)
}
