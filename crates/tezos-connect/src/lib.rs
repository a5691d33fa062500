//! Tezos transaction preparation connector
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

pub mod config;
pub mod connector;
pub mod encoding;
pub mod error;
pub mod micheline;
pub mod operation;
pub mod params;
pub mod rpc;
pub mod signatory;
pub mod tezos;
pub mod types;

pub use config::ConnectorConfig;
pub use connector::{prepare_input_params, TezosConnector};
pub use error::{Error, Result};
pub use params::{network_params_by_name, NetworkParams};
pub use rpc::{BlockId, ChainClient, ContractInfo, HttpRpcClient, RpcError};
pub use signatory::{LookupError, SignatoryClient};
pub use types::{BigInt, ErrorReason, TransactionPrepareRequest, TransactionPrepareResponse};
