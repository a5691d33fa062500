//! Environment variable overrides

use std::env;

use tezos_connect::ConnectorConfig;

use crate::config::Settings;

pub const ENV_NETWORK_NAME: &str = "TEZOS_CONNECT_NETWORK_NAME";
pub const ENV_RPC_URL: &str = "TEZOS_CONNECT_RPC_URL";
pub const ENV_SIGNATORY_URL: &str = "TEZOS_CONNECT_SIGNATORY_URL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "TEZOS_CONNECT_REQUEST_TIMEOUT_SECS";

impl Settings {
    pub fn from_env(mut self) -> Self {
        self.connector = self.connector.from_env();
        self
    }
}

trait FromEnv {
    fn from_env(self) -> Self;
}

impl FromEnv for ConnectorConfig {
    fn from_env(mut self) -> Self {
        if let Ok(network_name) = env::var(ENV_NETWORK_NAME) {
            self.network_name = network_name;
        }

        if let Ok(rpc_url) = env::var(ENV_RPC_URL) {
            self.rpc_url = rpc_url;
        }

        if let Ok(signatory_url) = env::var(ENV_SIGNATORY_URL) {
            self.signatory_url = signatory_url;
        }

        if let Ok(timeout_str) = env::var(ENV_REQUEST_TIMEOUT_SECS) {
            match timeout_str.parse::<u64>() {
                Ok(timeout) => self.request_timeout_secs = Some(timeout),
                Err(_) => tracing::warn!(
                    "Ignoring {}: `{}` is not a number of seconds",
                    ENV_REQUEST_TIMEOUT_SECS,
                    timeout_str
                ),
            }
        }

        self
    }
}
