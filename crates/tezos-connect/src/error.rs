//! Errors

use thiserror::Error;

use crate::rpc::RpcError;
use crate::signatory::LookupError;
use crate::types::ErrorReason;
use crate::{micheline, operation, tezos};

/// Transaction preparation error
#[derive(Debug, Error)]
pub enum Error {
    /// A call argument is not valid Micheline call parameters
    #[error("failed to decode param {index}: {source}")]
    DecodeParam {
        /// Position of the argument in the request
        index: usize,
        /// Decoding error
        source: micheline::Error,
    },
    /// Source address cannot be used as a signer
    #[error("invalid from address `{address}`: {source}")]
    InvalidFromAddress {
        /// Address as given
        address: String,
        /// Parse error
        source: tezos::Error,
    },
    /// Destination address cannot be parsed
    #[error("invalid to address `{address}`: {source}")]
    InvalidToAddress {
        /// Address as given
        address: String,
        /// Parse error
        source: tezos::Error,
    },
    /// Account state could not be read from the chain
    #[error("failed to query chain: {0}")]
    ChainQuery(#[from] RpcError),
    /// Custody service did not return a usable key
    #[error("failed to look up public key: {0}")]
    KeyLookup(#[from] LookupError),
    /// Operation cannot be serialized
    #[error("failed to encode operation: {0}")]
    Encoding(#[from] operation::Error),
}

impl Error {
    /// Classification reported to the host
    pub fn reason(&self) -> ErrorReason {
        ErrorReason::InvalidInputs
    }
}

/// Result type for transaction preparation
pub type Result<T, E = Error> = std::result::Result<T, E>;
