//! Connector configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::params::{network_params_by_name, NetworkParams};

/// Default Octez node RPC endpoint
pub const DEFAULT_RPC_URL: &str = "http://localhost:8732";
/// Default custody service endpoint
pub const DEFAULT_SIGNATORY_URL: &str = "http://localhost:6732";

/// Connector settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// Network whose protocol parameters are applied
    pub network_name: String,
    /// Chain node RPC base url
    pub rpc_url: String,
    /// Custody service base url
    pub signatory_url: String,
    /// Timeout applied to every outbound request
    pub request_timeout_secs: Option<u64>,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            network_name: "mainnet".to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            signatory_url: DEFAULT_SIGNATORY_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ConnectorConfig {
    /// Protocol parameters of the configured network
    pub fn network_params(&self) -> &'static NetworkParams {
        network_params_by_name(&self.network_name)
    }

    /// Request timeout, if any
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
