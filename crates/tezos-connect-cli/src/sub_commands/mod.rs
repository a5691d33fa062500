pub mod network_params;
pub mod prepare;
