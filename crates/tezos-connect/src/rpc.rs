//! Chain node access

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use tezos_connect_http_client::{HttpClient, HttpError};
use thiserror::Error;
use tracing::instrument;

use crate::tezos::{Address, BlockHash};
use crate::types::BigInt;

/// Chain node query error
#[derive(Debug, Error)]
pub enum RpcError {
    /// Transport or status error
    #[error(transparent)]
    Http(#[from] HttpError),
    /// Node does not know the contract
    #[error("unknown contract `{0}`")]
    UnknownContract(String),
    /// Response does not have the expected shape
    #[error("invalid RPC response: {0}")]
    InvalidResponse(String),
}

/// Block reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockId {
    /// Current head
    #[default]
    Head,
    /// Block at a level
    Level(u64),
    /// Block with a hash
    Hash(BlockHash),
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Head => f.write_str("head"),
            BlockId::Level(level) => write!(f, "{}", level),
            BlockId::Hash(hash) => write!(f, "{}", hash),
        }
    }
}

/// Account state at a block
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContractInfo {
    /// Balance in mutez
    pub balance: BigInt,
    /// Delegate, if any
    #[serde(default)]
    pub delegate: Option<Address>,
    /// Counter of the last manager operation, zero for originated contracts
    #[serde(default, deserialize_with = "deserialize_counter")]
    pub counter: u64,
    /// Revealed public key, if any
    #[serde(default)]
    pub manager_key: Option<String>,
}

impl ContractInfo {
    /// Whether the account has published its public key
    pub fn is_revealed(&self) -> bool {
        self.manager_key.is_some()
    }
}

fn deserialize_counter<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let counter = BigInt::deserialize(deserializer)?;
    counter
        .to_u64()
        .ok_or_else(|| serde::de::Error::custom(format!("counter `{}` out of range", counter)))
}

/// Chain node queries needed to prepare an operation
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Hash of a block
    async fn get_block_hash(&self, block: BlockId) -> Result<BlockHash, RpcError>;

    /// Account state, including counter and reveal status, at a block
    async fn get_contract_ext(
        &self,
        address: &Address,
        block: BlockId,
    ) -> Result<ContractInfo, RpcError>;
}

/// [`ChainClient`] talking to an Octez node over HTTP
#[derive(Debug, Clone)]
pub struct HttpRpcClient {
    base_url: String,
    http_client: HttpClient,
}

impl HttpRpcClient {
    /// Client for the node at `base_url`
    pub fn new(base_url: impl Into<String>, http_client: HttpClient) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    fn block_url(&self, block: BlockId) -> String {
        format!("{}/chains/main/blocks/{}", self.base_url, block)
    }
}

#[async_trait]
impl ChainClient for HttpRpcClient {
    #[instrument(skip(self))]
    async fn get_block_hash(&self, block: BlockId) -> Result<BlockHash, RpcError> {
        let url = format!("{}/hash", self.block_url(block));
        Ok(self.http_client.fetch(&url).await?)
    }

    #[instrument(skip(self))]
    async fn get_contract_ext(
        &self,
        address: &Address,
        block: BlockId,
    ) -> Result<ContractInfo, RpcError> {
        let url = format!("{}/context/contracts/{}", self.block_url(block), address);
        let mut info: ContractInfo = match self.http_client.fetch(&url).await {
            Ok(info) => info,
            Err(err) if err.status() == Some(404) => {
                return Err(RpcError::UnknownContract(address.to_string()))
            }
            Err(err) => return Err(err.into()),
        };

        if address.is_implicit() {
            let manager_key: Option<String> = self
                .http_client
                .fetch(&format!("{}/manager_key", url))
                .await?;
            info.manager_key = manager_key;
        }

        tracing::debug!(
            "Contract {} at {}: counter {}, revealed {}",
            address,
            block,
            info.counter,
            info.is_revealed()
        );

        Ok(info)
    }
}
