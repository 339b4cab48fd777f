//! RebeccaCoin token client.
//!
//! Packs calls with the contract's JSON ABI, runs them through an alloy
//! [`Provider`](alloy_provider::Provider) and unpacks the results into native types.
//!
//! - [`client`]: simulated calls (`eth_call` against the latest block)
//! - [`send`]: signed transaction submission
//! - [`permit`]: EIP-2612 permit signing

pub mod client;
pub mod error;
pub mod permit;
pub mod send;

pub use client::{FromOutput, TokenClient};
pub use error::TokenError;
pub use permit::PermitSignature;
pub use send::TxOutcome;

use alloy_primitives::{Address, U256};
use std::future::Future;

/// ERC20 surface of the token.
///
/// `transfer`, `transfer_from` and `approve` are dry runs: they report what the
/// contract would return for the configured caller without changing state. Use
/// the `send_*` methods of [`TokenClient`] to submit them.
pub trait Erc20: Send + Sync {
    /// `function name() external view returns (string)`
    fn name(&self) -> impl Future<Output = Result<String, TokenError>> + Send;

    /// `function symbol() external view returns (string)`
    fn symbol(&self) -> impl Future<Output = Result<String, TokenError>> + Send;

    /// `function decimals() external view returns (uint8)`
    fn decimals(&self) -> impl Future<Output = Result<u8, TokenError>> + Send;

    /// `function totalSupply() external view returns (uint256)`
    fn total_supply(&self) -> impl Future<Output = Result<U256, TokenError>> + Send;

    /// `function balanceOf(address account) external view returns (uint256)`
    fn balance_of(&self, account: Address)
        -> impl Future<Output = Result<U256, TokenError>> + Send;

    /// `function transfer(address to, uint256 value) external returns (bool)`
    fn transfer(
        &self,
        to: Address,
        amount: U256,
    ) -> impl Future<Output = Result<bool, TokenError>> + Send;

    /// `function transferFrom(address from, address to, uint256 value) external returns (bool)`
    fn transfer_from(
        &self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> impl Future<Output = Result<bool, TokenError>> + Send;

    /// `function approve(address spender, uint256 value) external returns (bool)`
    fn approve(
        &self,
        spender: Address,
        amount: U256,
    ) -> impl Future<Output = Result<bool, TokenError>> + Send;

    /// `function allowance(address owner, address spender) external view returns (uint256)`
    fn allowance(
        &self,
        owner: Address,
        spender: Address,
    ) -> impl Future<Output = Result<U256, TokenError>> + Send;
}
