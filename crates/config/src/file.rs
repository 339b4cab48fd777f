//! TOML configuration file.

use crate::network::{NetworkConfig, NetworkConfigBuilder, NetworkType};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Token client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Network preset
    #[serde(default)]
    pub network: NetworkType,

    /// RPC endpoint url, overrides the preset
    #[serde(default)]
    pub rpc_url: Option<String>,

    /// Chain ID, overrides the preset
    #[serde(default)]
    pub chain_id: Option<u64>,

    /// Deployed token contract address
    pub contract_address: Address,

    /// `from` address of simulated calls; the contract itself when unset
    #[serde(default)]
    pub caller: Option<Address>,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Network preset with this file's overrides applied.
    pub fn network_config(&self) -> NetworkConfig {
        let mut builder = NetworkConfigBuilder::new(self.network);
        if let Some(rpc_url) = &self.rpc_url {
            builder = builder.rpc_url(rpc_url.as_str());
        }
        if let Some(chain_id) = self.chain_id {
            builder = builder.chain_id(chain_id);
        }
        builder.build()
    }
}
