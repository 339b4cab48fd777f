//! Configuration types for the RebeccaCoin tools.
//!
//! This crate provides:
//! - Network presets (Ganache, Hardhat, Sepolia)
//! - Configuration file loading

pub mod file;
pub mod network;

pub use file::{Config, ConfigError};
pub use network::{NetworkConfig, NetworkConfigBuilder, NetworkType};
