//! Signed transaction submission.
//!
//! These need a provider that can sign, e.g. one built with
//! `client::create_wallet_provider`. The provider fills nonce, gas and fees.

use crate::{permit::PermitSignature, TokenClient, TokenError};
use alloy_dyn_abi::DynSolValue;
use alloy_network::ReceiptResponse;
use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::TransactionRequest;
use tracing::{debug, info, warn};

/// Result of a mined token transaction.
///
/// Only successful receipts produce one; a reverted receipt is
/// [`TokenError::TransactionReverted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOutcome {
    /// Transaction hash
    pub tx_hash: TxHash,
    /// Block number where transaction was included
    pub block_number: Option<u64>,
    /// Gas used
    pub gas_used: u64,
}

/// Outcome of a mined transaction; a failed status is an error.
pub(crate) fn receipt_outcome<R: ReceiptResponse>(
    method: &'static str,
    receipt: &R,
) -> Result<TxOutcome, TokenError> {
    if !receipt.status() {
        warn!(method, tx_hash = %receipt.transaction_hash(), "Token transaction reverted");
        return Err(TokenError::TransactionReverted {
            method,
            tx_hash: receipt.transaction_hash(),
        });
    }

    info!(
        method,
        tx_hash = %receipt.transaction_hash(),
        block_number = receipt.block_number(),
        gas_used = receipt.gas_used(),
        "Token transaction mined"
    );

    Ok(TxOutcome {
        tx_hash: receipt.transaction_hash(),
        block_number: receipt.block_number(),
        gas_used: receipt.gas_used(),
    })
}

impl<P> TokenClient<P>
where
    P: Provider,
{
    /// Submit `method` as a transaction and wait for its receipt.
    ///
    /// A mined transaction that reverted is reported as
    /// [`TokenError::TransactionReverted`].
    pub async fn send(
        &self,
        method: &'static str,
        args: &[DynSolValue],
    ) -> Result<TxOutcome, TokenError> {
        let data = self.encode_call(method, args)?;
        let request = TransactionRequest::default()
            .to(self.address())
            .input(data.into());

        let pending = self
            .provider()
            .send_transaction(request)
            .await
            .map_err(|source| TokenError::Send { method, source })?;
        debug!(method, tx_hash = %pending.tx_hash(), "Transaction sent");

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|source| TokenError::Receipt { method, source })?;

        receipt_outcome(method, &receipt)
    }

    /// Transfer `amount` from the signing account to `to`.
    pub async fn send_transfer(&self, to: Address, amount: U256) -> Result<TxOutcome, TokenError> {
        self.send(
            "transfer",
            &[DynSolValue::Address(to), DynSolValue::Uint(amount, 256)],
        )
        .await
    }

    /// Allow `spender` to move up to `amount` of the signing account's tokens.
    pub async fn send_approve(
        &self,
        spender: Address,
        amount: U256,
    ) -> Result<TxOutcome, TokenError> {
        self.send(
            "approve",
            &[DynSolValue::Address(spender), DynSolValue::Uint(amount, 256)],
        )
        .await
    }

    /// Move `amount` from `from` to `to` using the signing account's allowance.
    pub async fn send_transfer_from(
        &self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<TxOutcome, TokenError> {
        self.send(
            "transferFrom",
            &[
                DynSolValue::Address(from),
                DynSolValue::Address(to),
                DynSolValue::Uint(amount, 256),
            ],
        )
        .await
    }

    /// Mint new tokens; the signer must be allowed by the access manager.
    pub async fn send_mint(&self, to: Address, amount: U256) -> Result<TxOutcome, TokenError> {
        self.send(
            "mint",
            &[DynSolValue::Address(to), DynSolValue::Uint(amount, 256)],
        )
        .await
    }

    /// Submit a signed permit. Anyone may relay it.
    pub async fn send_permit(&self, permit: &PermitSignature) -> Result<TxOutcome, TokenError> {
        self.send("permit", &permit.call_args()).await
    }

    /// Hand the contract over to another access manager.
    pub async fn send_set_authority(&self, authority: Address) -> Result<TxOutcome, TokenError> {
        self.send("setAuthority", &[DynSolValue::Address(authority)])
            .await
    }
}
