//! EIP-2612 permit signing.

use crate::{Erc20, TokenClient, TokenError};
use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256, U256};
use alloy_provider::Provider;
use alloy_signer::{Signer, SignerSync};
use alloy_sol_types::{Eip712Domain, SolStruct};
use binding::Permit;
use std::borrow::Cow;
use tracing::debug;

/// Domain version of OpenZeppelin's `ERC20Permit`.
pub const PERMIT_VERSION: &str = "1";

/// A signed permit, ready to be relayed with `permit(...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermitSignature {
    pub owner: Address,
    pub spender: Address,
    pub value: U256,
    pub deadline: U256,
    /// Recovery id, 27 or 28
    pub v: u8,
    pub r: B256,
    pub s: B256,
}

impl PermitSignature {
    /// Arguments of `permit(owner, spender, value, deadline, v, r, s)`.
    pub fn call_args(&self) -> [DynSolValue; 7] {
        [
            DynSolValue::Address(self.owner),
            DynSolValue::Address(self.spender),
            DynSolValue::Uint(self.value, 256),
            DynSolValue::Uint(self.deadline, 256),
            DynSolValue::Uint(U256::from(self.v), 8),
            DynSolValue::FixedBytes(self.r, 32),
            DynSolValue::FixedBytes(self.s, 32),
        ]
    }
}

/// EIP-712 domain of the token at `token` on chain `chain_id`.
pub fn permit_domain(name: String, chain_id: u64, token: Address) -> Eip712Domain {
    Eip712Domain::new(
        Some(Cow::Owned(name)),
        Some(Cow::Borrowed(PERMIT_VERSION)),
        Some(U256::from(chain_id)),
        Some(token),
        None,
    )
}

/// EIP-712 digest the owner signs: `keccak256(0x1901 || domainSeparator || hashStruct(permit))`.
pub fn permit_signing_hash(domain: &Eip712Domain, permit: &Permit) -> B256 {
    permit.eip712_signing_hash(domain)
}

/// Sign `permit` for `domain`. The signer must be the permit owner.
pub fn sign_permit_with<S: SignerSync>(
    signer: &S,
    domain: &Eip712Domain,
    permit: &Permit,
) -> Result<PermitSignature, TokenError> {
    let hash = permit_signing_hash(domain, permit);
    let signature = signer.sign_hash_sync(&hash).map_err(TokenError::Sign)?;

    Ok(PermitSignature {
        owner: permit.owner,
        spender: permit.spender,
        value: permit.value,
        deadline: permit.deadline,
        v: 27 + u8::from(signature.v()),
        r: B256::from(signature.r().to_be_bytes::<32>()),
        s: B256::from(signature.s().to_be_bytes::<32>()),
    })
}

impl<P> TokenClient<P>
where
    P: Provider,
{
    /// Sign a permit letting `spender` move `value` of the signer's tokens until `deadline`.
    ///
    /// Reads the token name, the signer's current nonce and the chain id from the node.
    pub async fn sign_permit<S>(
        &self,
        signer: &S,
        spender: Address,
        value: U256,
        deadline: U256,
    ) -> Result<PermitSignature, TokenError>
    where
        S: Signer + SignerSync,
    {
        let owner = signer.address();
        let name = self.name().await?;
        let nonce = self.nonces(owner).await?;
        let chain_id = self
            .provider()
            .get_chain_id()
            .await
            .map_err(TokenError::ChainId)?;

        debug!(%owner, %spender, %nonce, chain_id, "Signing permit");

        let domain = permit_domain(name, chain_id, self.address());
        let permit = Permit {
            owner,
            spender,
            value,
            nonce,
            deadline,
        };

        sign_permit_with(signer, &domain, &permit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mocked_client, push_call, TOKEN};
    use alloy_primitives::{address, keccak256, Signature, U64};
    use alloy_signer_local::PrivateKeySigner;
    use alloy_sol_types::SolValue;

    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const SPENDER: Address = address!("70997970C51812dc3A04C010C9Cd00C92D0d7a34");

    fn recover(signature: &PermitSignature, domain: &Eip712Domain, nonce: U256) -> Address {
        let permit = Permit {
            owner: signature.owner,
            spender: signature.spender,
            value: signature.value,
            nonce,
            deadline: signature.deadline,
        };
        let parity = signature.v == 28;
        let signature = Signature::new(
            U256::from_be_bytes(signature.r.0),
            U256::from_be_bytes(signature.s.0),
            parity,
        );
        signature
            .recover_address_from_prehash(&permit_signing_hash(domain, &permit))
            .unwrap()
    }

    #[test]
    fn test_signing_hash_layout() {
        let domain = permit_domain("RebeccaCoin".to_string(), 1337, TOKEN);
        let permit = Permit {
            owner: address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            spender: SPENDER,
            value: U256::from(100),
            nonce: U256::ZERO,
            deadline: U256::MAX,
        };

        let mut digest = vec![0x19, 0x01];
        digest.extend_from_slice(domain.separator().as_slice());
        digest.extend_from_slice(permit.eip712_hash_struct().as_slice());

        assert_eq!(permit_signing_hash(&domain, &permit), keccak256(digest));
    }

    #[test]
    fn test_signature_recovers_owner() {
        let signer: PrivateKeySigner = DEV_KEY.parse().unwrap();
        let domain = permit_domain("RebeccaCoin".to_string(), 1337, TOKEN);
        let permit = Permit {
            owner: signer.address(),
            spender: SPENDER,
            value: U256::from(100),
            nonce: U256::from(2),
            deadline: U256::from(1_900_000_000u64),
        };

        let signature = sign_permit_with(&signer, &domain, &permit).unwrap();

        assert!(signature.v == 27 || signature.v == 28);
        assert_eq!(recover(&signature, &domain, U256::from(2)), signer.address());
        // A different nonce yields a different message.
        assert_ne!(recover(&signature, &domain, U256::from(3)), signer.address());
    }

    #[test]
    fn test_call_args_pack() {
        let (client, _) = mocked_client();
        let signature = PermitSignature {
            owner: address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            spender: SPENDER,
            value: U256::from(100),
            deadline: U256::MAX,
            v: 27,
            r: B256::repeat_byte(0x11),
            s: B256::repeat_byte(0x22),
        };

        let data = client.encode_call("permit", &signature.call_args()).unwrap();

        assert_eq!(data.len(), 4 + 7 * 32);
        assert_eq!(
            &data[..4],
            &keccak256("permit(address,address,uint256,uint256,uint8,bytes32,bytes32)")[..4]
        );
    }

    #[tokio::test]
    async fn test_sign_permit_reads_chain_state() {
        let (client, asserter) = mocked_client();
        let signer: PrivateKeySigner = DEV_KEY.parse().unwrap();

        push_call(&asserter, ("RebeccaCoin".to_string(),).abi_encode_params());
        push_call(&asserter, (U256::from(4),).abi_encode_params());
        asserter.push_success(&U64::from(1337));

        let signature = client
            .sign_permit(&signer, SPENDER, U256::from(10), U256::MAX)
            .await
            .unwrap();

        let domain = permit_domain("RebeccaCoin".to_string(), 1337, TOKEN);
        assert_eq!(signature.owner, signer.address());
        assert_eq!(recover(&signature, &domain, U256::from(4)), signer.address());
    }
}
