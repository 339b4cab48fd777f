//! RebeccaCoin token contract bindings.
//!
//! ERC20 with EIP-2612 permit, owner mint and `AccessManaged` access control.

use alloy_sol_types::sol;

sol! {
    /// RebeccaCoin token interface
    #[sol(rpc)]
    #[derive(Debug, PartialEq, Eq)]
    #[allow(clippy::too_many_arguments)]
    interface IRebeccaCoin {
        /// Emitted when tokens are transferred
        event Transfer(address indexed from, address indexed to, uint256 value);

        /// Emitted when an allowance is set
        event Approval(address indexed owner, address indexed spender, uint256 value);

        /// Emitted when the access manager changes
        event AuthorityUpdated(address authority);

        event EIP712DomainChanged();

        error AccessManagedInvalidAuthority(address authority);
        error AccessManagedRequiredDelay(address caller, uint32 delay);
        error AccessManagedUnauthorized(address caller);
        error ECDSAInvalidSignature();
        error ECDSAInvalidSignatureLength(uint256 length);
        error ECDSAInvalidSignatureS(bytes32 s);
        error ERC20InsufficientAllowance(address spender, uint256 allowance, uint256 needed);
        error ERC20InsufficientBalance(address sender, uint256 balance, uint256 needed);
        error ERC20InvalidApprover(address approver);
        error ERC20InvalidReceiver(address receiver);
        error ERC20InvalidSender(address sender);
        error ERC20InvalidSpender(address spender);
        error ERC2612ExpiredSignature(uint256 deadline);
        error ERC2612InvalidSigner(address signer, address owner);
        error InvalidAccountNonce(address account, uint256 currentNonce);
        error InvalidShortString();
        error StringTooLong(string str);

        /// EIP-712 domain separator used by permit
        function DOMAIN_SEPARATOR() external view returns (bytes32);

        /// Get allowance granted by owner to spender
        function allowance(address owner, address spender) external view returns (uint256);

        /// Approve spender to spend tokens
        function approve(address spender, uint256 value) external returns (bool);

        /// Access manager governing restricted functions
        function authority() external view returns (address);

        /// Get token balance of an account
        function balanceOf(address account) external view returns (uint256);

        /// Get token decimals
        function decimals() external view returns (uint8);

        /// EIP-5267 domain description
        function eip712Domain() external view returns (
            bytes1 fields,
            string name,
            string version,
            uint256 chainId,
            address verifyingContract,
            bytes32 salt,
            uint256[] extensions
        );

        function isConsumingScheduledOp() external view returns (bytes4);

        /// Mint new tokens (restricted)
        function mint(address to, uint256 amount) external;

        /// Get token name
        function name() external view returns (string);

        /// Current permit nonce of an owner
        function nonces(address owner) external view returns (uint256);

        /// Approve spender through an off-chain owner signature
        function permit(
            address owner,
            address spender,
            uint256 value,
            uint256 deadline,
            uint8 v,
            bytes32 r,
            bytes32 s
        ) external;

        /// Move the contract to another access manager
        function setAuthority(address newAuthority) external;

        /// Get token symbol
        function symbol() external view returns (string);

        /// Get total supply
        function totalSupply() external view returns (uint256);

        /// Transfer tokens to recipient
        function transfer(address to, uint256 value) external returns (bool);

        /// Transfer tokens from sender to recipient (requires allowance)
        function transferFrom(address from, address to, uint256 value) external returns (bool);
    }

    /// EIP-2612 permit message
    #[derive(Debug, PartialEq, Eq)]
    struct Permit {
        address owner;
        address spender;
        uint256 value;
        uint256 nonce;
        uint256 deadline;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rebecca_coin_contract::contract_abi;
    use alloy_sol_types::{SolCall, SolError, SolStruct};

    #[test]
    fn test_interface_matches_embedded_abi() {
        let abi = contract_abi().unwrap();
        let selector = |name: &str| abi.function(name).unwrap()[0].selector();

        assert_eq!(selector("name"), IRebeccaCoin::nameCall::SELECTOR);
        assert_eq!(selector("balanceOf"), IRebeccaCoin::balanceOfCall::SELECTOR);
        assert_eq!(selector("allowance"), IRebeccaCoin::allowanceCall::SELECTOR);
        assert_eq!(selector("transferFrom"), IRebeccaCoin::transferFromCall::SELECTOR);
        assert_eq!(selector("permit"), IRebeccaCoin::permitCall::SELECTOR);
        assert_eq!(selector("mint"), IRebeccaCoin::mintCall::SELECTOR);
    }

    #[test]
    fn test_functions_without_return_values_parse() {
        let abi = contract_abi().unwrap();

        for name in ["mint", "permit", "setAuthority"] {
            let function = &abi.function(name).unwrap()[0];
            assert!(function.outputs.is_empty(), "{name}");
        }
        assert_eq!(
            abi.function("setAuthority").unwrap()[0].selector(),
            IRebeccaCoin::setAuthorityCall::SELECTOR
        );
    }

    #[test]
    fn test_error_selectors_match_embedded_abi() {
        let abi = contract_abi().unwrap();
        let selector = |name: &str| abi.error(name).unwrap()[0].selector();

        assert_eq!(
            selector("ERC20InsufficientBalance"),
            IRebeccaCoin::ERC20InsufficientBalance::SELECTOR
        );
        assert_eq!(
            selector("AccessManagedUnauthorized"),
            IRebeccaCoin::AccessManagedUnauthorized::SELECTOR
        );
    }

    #[test]
    fn test_permit_type_string() {
        assert_eq!(
            Permit::eip712_encode_type(),
            "Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)"
        );
    }
}
