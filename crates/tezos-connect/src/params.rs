//! Network protocol parameter presets

use serde::Serialize;

use crate::operation::Limits;

/// Gas consumed by a reveal
pub const REVEAL_GAS_LIMIT: u64 = 1_000;
/// Fee attached to a reveal, in mutez
pub const REVEAL_FEE: u64 = 1_000;
/// Storage a reveal may burn
pub const REVEAL_STORAGE_LIMIT: u64 = 0;

/// Protocol constants of one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkParams {
    /// Network name
    pub network: &'static str,
    /// Chain id
    pub chain_id: &'static str,
    /// Minimal block delay in seconds
    pub minimal_block_delay: u64,
    /// Storage burn per byte, in mutez
    pub cost_per_byte: u64,
    /// Bytes burnt by an origination
    pub origination_size: u64,
    /// Gas limit ceiling of one operation
    pub hard_gas_limit_per_operation: u64,
    /// Gas limit ceiling of one block
    pub hard_gas_limit_per_block: u64,
    /// Storage limit ceiling of one operation
    pub hard_storage_limit_per_operation: u64,
    /// Largest operation accepted by the mempool
    pub max_operation_data_length: u64,
    /// Base fee of the default baker fee policy, in mutez
    pub minimal_fees: u64,
    /// Fee per gas unit of the default baker fee policy, in nanotez
    pub minimal_nanotez_per_gas_unit: u64,
    /// Fee per operation byte of the default baker fee policy, in nanotez
    pub minimal_nanotez_per_byte: u64,
}

/// Mainnet, also used for unknown network names
pub const MAINNET: NetworkParams = NetworkParams {
    network: "mainnet",
    chain_id: "NetXdQprcVkpaWU",
    minimal_block_delay: 15,
    cost_per_byte: 250,
    origination_size: 257,
    hard_gas_limit_per_operation: 1_040_000,
    hard_gas_limit_per_block: 2_600_000,
    hard_storage_limit_per_operation: 60_000,
    max_operation_data_length: 32 * 1024,
    minimal_fees: 100,
    minimal_nanotez_per_gas_unit: 100,
    minimal_nanotez_per_byte: 1_000,
};

/// Ghostnet test network
pub const GHOSTNET: NetworkParams = NetworkParams {
    network: "ghostnet",
    chain_id: "NetXnHfVqm9iesp",
    minimal_block_delay: 8,
    ..MAINNET
};

/// Nairobinet test network
pub const NAIROBINET: NetworkParams = NetworkParams {
    network: "nairobinet",
    chain_id: "NetXyuzvDo2Ugzb",
    minimal_block_delay: 8,
    ..MAINNET
};

/// Parameters for a network name, matched case insensitively
///
/// Unknown names fall back to [`MAINNET`].
pub fn network_params_by_name(name: &str) -> &'static NetworkParams {
    match name.to_lowercase().as_str() {
        "ghostnet" => &GHOSTNET,
        "nairobinet" => &NAIROBINET,
        _ => &MAINNET,
    }
}

impl NetworkParams {
    /// Smallest fee the default baker policy accepts
    ///
    /// Each nanotez term is rounded up to the next mutez.
    pub fn min_fee(&self, gas_limit: u64, size: u64) -> u64 {
        let gas_fee = (self.minimal_nanotez_per_gas_unit * gas_limit).div_ceil(1000);
        let size_fee = (self.minimal_nanotez_per_byte * size).div_ceil(1000);
        self.minimal_fees + gas_fee + size_fee
    }

    /// Gas limit clamped to the per operation ceiling
    pub fn clamp_gas(&self, gas_limit: u64) -> u64 {
        gas_limit.min(self.hard_gas_limit_per_operation)
    }

    /// Storage limit clamped to the per operation ceiling
    pub fn clamp_storage(&self, storage_limit: u64) -> u64 {
        storage_limit.min(self.hard_storage_limit_per_operation)
    }

    /// Limits attached to an injected reveal
    pub fn reveal_limits(&self) -> Limits {
        Limits {
            fee: REVEAL_FEE,
            gas_limit: self.clamp_gas(REVEAL_GAS_LIMIT),
            storage_limit: self.clamp_storage(REVEAL_STORAGE_LIMIT),
        }
    }
}
