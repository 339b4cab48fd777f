//! Network presets for the nodes the token is deployed on.

use serde::{Deserialize, Serialize};

/// Known networks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Local Ganache instance (the Hardhat project's `ganache` network)
    #[default]
    Ganache,
    /// Local Hardhat node
    Hardhat,
    Sepolia,
}

/// Connection parameters for one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub network_type: NetworkType,
    /// Chain ID
    pub chain_id: u64,
    /// JSON-RPC endpoint
    pub rpc_url: String,
}

impl NetworkConfig {
    /// Ganache defaults, matching the Hardhat project's network config.
    pub fn ganache() -> Self {
        Self {
            network_type: NetworkType::Ganache,
            chain_id: 1337,
            rpc_url: "http://127.0.0.1:7545".to_string(),
        }
    }

    /// Hardhat node defaults.
    pub fn hardhat() -> Self {
        Self {
            network_type: NetworkType::Hardhat,
            chain_id: 31337,
            rpc_url: "http://127.0.0.1:8545".to_string(),
        }
    }

    /// Ethereum Sepolia testnet.
    pub fn sepolia() -> Self {
        Self {
            network_type: NetworkType::Sepolia,
            chain_id: 11155111,
            rpc_url: "https://ethereum-sepolia-rpc.publicnode.com".to_string(),
        }
    }

    /// Create configuration from network type.
    pub fn from_network_type(network_type: NetworkType) -> Self {
        match network_type {
            NetworkType::Ganache => Self::ganache(),
            NetworkType::Hardhat => Self::hardhat(),
            NetworkType::Sepolia => Self::sepolia(),
        }
    }
}

/// Builder for custom network configurations.
#[derive(Debug, Clone)]
pub struct NetworkConfigBuilder {
    config: NetworkConfig,
}

impl NetworkConfigBuilder {
    /// Start from a preset.
    pub fn new(network_type: NetworkType) -> Self {
        Self {
            config: NetworkConfig::from_network_type(network_type),
        }
    }

    /// Override the RPC endpoint.
    pub fn rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.config.rpc_url = rpc_url.into();
        self
    }

    /// Override the chain ID, e.g. for a Ganache instance started with `--chain.chainId`.
    pub const fn chain_id(mut self, chain_id: u64) -> Self {
        self.config.chain_id = chain_id;
        self
    }

    /// Build the network configuration.
    pub fn build(self) -> NetworkConfig {
        self.config
    }
}
