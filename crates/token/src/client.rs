use crate::{
    error::{decode_revert, TokenError},
    Erc20,
};
use alloy_dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy_json_abi::{Function, JsonAbi};
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{BlockId, TransactionRequest};
use binding::CONTRACT_ABI;
use tracing::{debug, warn};

/// Client for one deployed RebeccaCoin contract.
///
/// Reads are `eth_call`s pinned to the chain head fetched just before the call.
/// The ABI is parsed once at construction and never checked against the
/// deployed code: a mismatch surfaces as a pack or unpack error.
#[derive(Debug, Clone)]
pub struct TokenClient<P> {
    provider: P,
    address: Address,
    caller: Address,
    abi: JsonAbi,
}

impl<P> TokenClient<P> {
    /// Client for the contract at `address`, using the generated RebeccaCoin ABI.
    pub fn new(provider: P, address: Address) -> Result<Self, TokenError> {
        Self::with_abi(provider, address, CONTRACT_ABI)
    }

    /// Client using a caller-supplied JSON ABI.
    pub fn with_abi(provider: P, address: Address, abi_json: &str) -> Result<Self, TokenError> {
        let abi: JsonAbi = serde_json::from_str(abi_json)?;

        Ok(Self {
            provider,
            address,
            caller: address,
            abi,
        })
    }

    /// Client for a contract given as a hex address string.
    pub fn from_hex(provider: P, address: &str) -> Result<Self, TokenError> {
        let parsed = address
            .parse::<Address>()
            .map_err(|e| TokenError::InvalidAddress {
                address: address.to_string(),
                reason: e.to_string(),
            })?;

        Self::new(provider, parsed)
    }

    /// Use `caller` as the `from` address of simulated calls.
    ///
    /// Defaults to the contract address itself.
    #[must_use]
    pub fn with_caller(mut self, caller: Address) -> Self {
        self.caller = caller;
        self
    }

    pub const fn address(&self) -> Address {
        self.address
    }

    pub const fn caller(&self) -> Address {
        self.caller
    }

    pub const fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    pub const fn provider(&self) -> &P {
        &self.provider
    }

    fn function(&self, method: &'static str) -> Result<&Function, TokenError> {
        self.abi
            .function(method)
            .and_then(|overloads| overloads.first())
            .ok_or(TokenError::UnknownMethod(method))
    }

    /// Selector plus ABI-encoded arguments for `method`.
    pub fn encode_call(
        &self,
        method: &'static str,
        args: &[DynSolValue],
    ) -> Result<Bytes, TokenError> {
        self.function(method)?
            .abi_encode_input(args)
            .map(Bytes::from)
            .map_err(|source| TokenError::Pack { method, source })
    }

    /// Decode the raw return data of `method`.
    pub fn decode_output(
        &self,
        method: &'static str,
        data: &[u8],
    ) -> Result<Vec<DynSolValue>, TokenError> {
        self.function(method)?
            .abi_decode_output(data)
            .map_err(|source| TokenError::Unpack { method, source })
    }

    /// Decode the single return value of `method` into a native type.
    pub fn unpack<T: FromOutput>(&self, method: &'static str, data: &[u8]) -> Result<T, TokenError> {
        let mut values = self.decode_output(method, data)?;
        if values.len() != 1 {
            return Err(TokenError::UnexpectedOutput {
                method,
                reason: format!("expected one value, got {}", values.len()),
            });
        }

        let value = values.remove(0);
        T::from_output(&value).ok_or_else(|| TokenError::UnexpectedOutput {
            method,
            reason: format!("cannot convert {value:?}"),
        })
    }
}

impl<P> TokenClient<P>
where
    P: Provider,
{
    /// Simulate `method` against the latest block and return the raw output.
    pub async fn call(
        &self,
        method: &'static str,
        args: &[DynSolValue],
    ) -> Result<Bytes, TokenError> {
        let data = self.encode_call(method, args)?;

        let request = TransactionRequest::default()
            .from(self.caller)
            .to(self.address)
            .input(data.into());

        let block_number = self
            .provider
            .get_block_number()
            .await
            .map_err(TokenError::BlockNumber)?;

        debug!(
            method,
            contract = %self.address,
            caller = %self.caller,
            block_number,
            "Calling contract"
        );

        self.provider
            .call(request)
            .block(BlockId::number(block_number))
            .await
            .map_err(|source| match decode_revert(&source) {
                Some(error) => {
                    warn!(method, ?error, "Contract call reverted");
                    TokenError::Reverted { method, error }
                }
                None => TokenError::Call { method, source },
            })
    }

    async fn read<T: FromOutput>(
        &self,
        method: &'static str,
        args: &[DynSolValue],
    ) -> Result<T, TokenError> {
        let output = self.call(method, args).await?;
        self.unpack(method, &output)
    }

    /// Current EIP-2612 nonce of `owner`.
    pub async fn nonces(&self, owner: Address) -> Result<U256, TokenError> {
        self.read("nonces", &[DynSolValue::Address(owner)]).await
    }

    /// EIP-712 domain separator used to verify permits.
    pub async fn domain_separator(&self) -> Result<B256, TokenError> {
        self.read("DOMAIN_SEPARATOR", &[]).await
    }

    /// Access manager contract governing restricted functions such as `mint`.
    pub async fn authority(&self) -> Result<Address, TokenError> {
        self.read("authority", &[]).await
    }
}

impl<P> Erc20 for TokenClient<P>
where
    P: Provider,
{
    async fn name(&self) -> Result<String, TokenError> {
        self.read("name", &[]).await
    }

    async fn symbol(&self) -> Result<String, TokenError> {
        self.read("symbol", &[]).await
    }

    async fn decimals(&self) -> Result<u8, TokenError> {
        self.read("decimals", &[]).await
    }

    async fn total_supply(&self) -> Result<U256, TokenError> {
        self.read("totalSupply", &[]).await
    }

    async fn balance_of(&self, account: Address) -> Result<U256, TokenError> {
        self.read("balanceOf", &[DynSolValue::Address(account)])
            .await
    }

    async fn transfer(&self, to: Address, amount: U256) -> Result<bool, TokenError> {
        self.read(
            "transfer",
            &[DynSolValue::Address(to), DynSolValue::Uint(amount, 256)],
        )
        .await
    }

    async fn transfer_from(
        &self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<bool, TokenError> {
        self.read(
            "transferFrom",
            &[
                DynSolValue::Address(from),
                DynSolValue::Address(to),
                DynSolValue::Uint(amount, 256),
            ],
        )
        .await
    }

    async fn approve(&self, spender: Address, amount: U256) -> Result<bool, TokenError> {
        self.read(
            "approve",
            &[DynSolValue::Address(spender), DynSolValue::Uint(amount, 256)],
        )
        .await
    }

    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, TokenError> {
        self.read(
            "allowance",
            &[DynSolValue::Address(owner), DynSolValue::Address(spender)],
        )
        .await
    }
}

/// Native types a single decoded return value converts into.
pub trait FromOutput: Sized {
    fn from_output(value: &DynSolValue) -> Option<Self>;
}

impl FromOutput for String {
    fn from_output(value: &DynSolValue) -> Option<Self> {
        value.as_str().map(ToOwned::to_owned)
    }
}

impl FromOutput for U256 {
    fn from_output(value: &DynSolValue) -> Option<Self> {
        value.as_uint().map(|(value, _)| value)
    }
}

impl FromOutput for u8 {
    fn from_output(value: &DynSolValue) -> Option<Self> {
        value
            .as_uint()
            .and_then(|(value, _)| Self::try_from(value).ok())
    }
}

impl FromOutput for bool {
    fn from_output(value: &DynSolValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromOutput for Address {
    fn from_output(value: &DynSolValue) -> Option<Self> {
        value.as_address()
    }
}

impl FromOutput for B256 {
    fn from_output(value: &DynSolValue) -> Option<Self> {
        match value {
            DynSolValue::FixedBytes(word, 32) => Some(*word),
            _ => None,
        }
    }
}
