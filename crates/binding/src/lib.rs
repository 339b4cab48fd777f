//! Contract bindings for the RebeccaCoin token.
//!
//! - [`rebecca_coin_contract`]: the compiled JSON ABI, generated by `abigen`
//! - [`token`]: the static interface generated with alloy's `sol!` macro

pub mod rebecca_coin_contract;
pub mod token;

pub use rebecca_coin_contract::{contract_abi, CONTRACT_ABI};
pub use token::{IRebeccaCoin, Permit};
