//! Command-line front end for a deployed RebeccaCoin contract.

use alloy_primitives::{utils::format_units, Address, U256};
use alloy_provider::Provider;
use clap::Subcommand;
use config::Config;
use std::fmt;
use token::{Erc20, TokenClient, TokenError, TxOutcome};

/// Token metadata shown by `token info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: U256,
}

impl fmt::Display for TokenInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}), {} decimals, total supply {}",
            self.name,
            self.symbol,
            self.decimals,
            format_amount(self.total_supply, self.decimals)
        )
    }
}

/// Format a raw token amount with the token's decimals.
pub fn format_amount(amount: U256, decimals: u8) -> String {
    format_units(amount, decimals).unwrap_or_else(|_| amount.to_string())
}

pub async fn token_info<T: Erc20>(token: &T) -> Result<TokenInfo, TokenError> {
    Ok(TokenInfo {
        name: token.name().await?,
        symbol: token.symbol().await?,
        decimals: token.decimals().await?,
        total_supply: token.total_supply().await?,
    })
}

/// Token client for the contract named in `config`.
pub fn connect_token<P>(provider: P, config: &Config) -> Result<TokenClient<P>, TokenError> {
    let mut token = TokenClient::new(provider, config.contract_address)?;
    if let Some(caller) = config.caller {
        token = token.with_caller(caller);
    }

    Ok(token)
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Name, symbol, decimals and total supply
    Info,

    /// Balance of an account
    BalanceOf { account: Address },

    /// Amount `spender` may still move on behalf of `owner`
    Allowance { owner: Address, spender: Address },

    /// Current permit nonce of an account
    Nonces { owner: Address },

    /// Access manager of the contract
    Authority,

    /// Transfer tokens from the caller to `to`
    Transfer { to: Address, amount: U256 },

    /// Allow `spender` to move up to `amount` of the caller's tokens
    Approve { spender: Address, amount: U256 },

    /// Move tokens between accounts using the caller's allowance
    TransferFrom {
        from: Address,
        to: Address,
        amount: U256,
    },
}

impl Command {
    /// Whether the command changes contract state when submitted.
    pub const fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::Transfer { .. } | Self::Approve { .. } | Self::TransferFrom { .. }
        )
    }
}

/// Run `command` and describe the result.
///
/// Mutating commands are simulated unless `send` is set, in which case the
/// provider must be able to sign. Reads ignore `send`.
pub async fn execute<P: Provider>(
    token: &TokenClient<P>,
    command: &Command,
    send: bool,
) -> Result<String, TokenError> {
    let output = match *command {
        Command::Info => token_info(token).await?.to_string(),
        Command::BalanceOf { account } => {
            format!("balance of {account}: {}", token.balance_of(account).await?)
        }
        Command::Allowance { owner, spender } => format!(
            "allowance of {spender} over {owner}: {}",
            token.allowance(owner, spender).await?
        ),
        Command::Nonces { owner } => format!("nonce of {owner}: {}", token.nonces(owner).await?),
        Command::Authority => format!("authority: {}", token.authority().await?),
        Command::Transfer { to, amount } if send => {
            describe_outcome("transfer", &token.send_transfer(to, amount).await?)
        }
        Command::Transfer { to, amount } => {
            describe_dry_run("transfer", token.transfer(to, amount).await?)
        }
        Command::Approve { spender, amount } if send => {
            describe_outcome("approve", &token.send_approve(spender, amount).await?)
        }
        Command::Approve { spender, amount } => {
            describe_dry_run("approve", token.approve(spender, amount).await?)
        }
        Command::TransferFrom { from, to, amount } if send => describe_outcome(
            "transferFrom",
            &token.send_transfer_from(from, to, amount).await?,
        ),
        Command::TransferFrom { from, to, amount } => describe_dry_run(
            "transferFrom",
            token.transfer_from(from, to, amount).await?,
        ),
    };

    Ok(output)
}

fn describe_outcome(method: &str, outcome: &TxOutcome) -> String {
    let block = outcome
        .block_number
        .map_or_else(|| "pending block".to_string(), |n| format!("block {n}"));
    format!(
        "{method} mined in {block}: tx {}, gas used {}",
        outcome.tx_hash, outcome.gas_used
    )
}

fn describe_dry_run(method: &str, success: bool) -> String {
    format!("{method} would return {success} (simulated, not submitted)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, Bytes, U64};
    use alloy_provider::ProviderBuilder;
    use alloy_sol_types::SolValue;
    use alloy_transport::mock::Asserter;

    const TOKEN: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
    const HOLDER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    fn config() -> Config {
        toml::from_str(
            r#"
            network = "hardhat"
            contract_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
            caller = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
            "#,
        )
        .unwrap()
    }

    fn mocked_token() -> (TokenClient<impl Provider>, Asserter) {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new().connect_mocked_client(asserter.clone());
        (connect_token(provider, &config()).unwrap(), asserter)
    }

    fn push_call(asserter: &Asserter, output: Vec<u8>) {
        asserter.push_success(&U64::from(1));
        asserter.push_success(&Bytes::from(output));
    }

    #[test]
    fn test_format_amount() {
        assert!(format_amount(U256::from(1500), 3).starts_with("1.5"));
        assert!(format_amount(U256::from(25), 0).starts_with("25"));
    }

    #[test]
    fn test_connect_token_uses_config() {
        let (token, _) = mocked_token();
        assert_eq!(token.address(), TOKEN);
        assert_eq!(token.caller(), HOLDER);
    }

    #[test]
    fn test_mutating_commands() {
        let amount = U256::from(1);
        assert!(Command::Transfer { to: HOLDER, amount }.is_mutating());
        assert!(Command::Approve {
            spender: HOLDER,
            amount
        }
        .is_mutating());
        assert!(!Command::Info.is_mutating());
        assert!(!Command::BalanceOf { account: HOLDER }.is_mutating());
    }

    #[tokio::test]
    async fn test_info() {
        let (token, asserter) = mocked_token();
        push_call(&asserter, ("RebeccaCoin".to_string(),).abi_encode_params());
        push_call(&asserter, ("RBC".to_string(),).abi_encode_params());
        push_call(&asserter, (U256::from(18),).abi_encode_params());
        push_call(
            &asserter,
            (U256::from(1000u64) * U256::from(10u64).pow(U256::from(18)),).abi_encode_params(),
        );

        let output = execute(&token, &Command::Info, false).await.unwrap();

        assert!(
            output.starts_with("RebeccaCoin (RBC), 18 decimals, total supply 1000."),
            "{output}"
        );
    }

    #[tokio::test]
    async fn test_simulated_transfer() {
        let (token, asserter) = mocked_token();
        push_call(&asserter, (true,).abi_encode_params());

        let command = Command::Transfer {
            to: TOKEN,
            amount: U256::from(10),
        };
        let output = execute(&token, &command, false).await.unwrap();

        assert_eq!(output, "transfer would return true (simulated, not submitted)");
    }

    #[tokio::test]
    async fn test_read_error_propagates() {
        let (token, asserter) = mocked_token();
        asserter.push_failure_msg("connection refused");

        let err = execute(&token, &Command::Authority, false)
            .await
            .unwrap_err();

        assert!(matches!(err, TokenError::BlockNumber(_)));
    }
}
