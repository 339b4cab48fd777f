use alloy_primitives::TxHash;
use alloy_provider::PendingTransactionError;
use alloy_sol_types::SolInterface;
use alloy_transport::TransportError;
use binding::IRebeccaCoin::IRebeccaCoinErrors;
use thiserror::Error;

/// Token client error, one variant per step of a contract interaction.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("failed to parse contract ABI: {0}")]
    AbiParse(#[from] serde_json::Error),

    #[error("invalid contract address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("method {0} is not in the contract ABI")]
    UnknownMethod(&'static str),

    #[error("failed to pack {method} message: {source}")]
    Pack {
        method: &'static str,
        #[source]
        source: alloy_dyn_abi::Error,
    },

    #[error("failed to get block number: {0}")]
    BlockNumber(#[source] TransportError),

    #[error("failed to get chain id: {0}")]
    ChainId(#[source] TransportError),

    #[error("failed to call contract {method}: {source}")]
    Call {
        method: &'static str,
        #[source]
        source: TransportError,
    },

    /// The call reverted with one of the contract's custom errors.
    #[error("{method} reverted: {error:?}")]
    Reverted {
        method: &'static str,
        error: IRebeccaCoinErrors,
    },

    #[error("failed to unpack {method}: {source}")]
    Unpack {
        method: &'static str,
        #[source]
        source: alloy_dyn_abi::Error,
    },

    #[error("unexpected {method} output: {reason}")]
    UnexpectedOutput { method: &'static str, reason: String },

    #[error("failed to send {method} transaction: {source}")]
    Send {
        method: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("failed to get {method} receipt: {source}")]
    Receipt {
        method: &'static str,
        #[source]
        source: PendingTransactionError,
    },

    #[error("{method} transaction {tx_hash} reverted")]
    TransactionReverted { method: &'static str, tx_hash: TxHash },

    #[error("failed to sign permit: {0}")]
    Sign(#[source] alloy_signer::Error),
}

/// Decode the custom error carried by a reverted call, if any.
pub(crate) fn decode_revert(err: &TransportError) -> Option<IRebeccaCoinErrors> {
    let data = err.as_error_resp()?.as_revert_data()?;
    IRebeccaCoinErrors::abi_decode(&data).ok()
}
