//! Hardhat build artifact model.
//!
//! Only the `abi` field is consumed by the generator, but the whole artifact is
//! parsed so that a truncated or foreign file is rejected up front.

use crate::GenerateError;
use alloy_json_abi::JsonAbi;
use alloy_primitives::{keccak256, Selector};
use serde::{ser::Error as _, Deserialize, Serialize};
use serde_json::{ser::PrettyFormatter, Value};
use std::{collections::BTreeMap, path::Path};

/// Compiled contract artifact as written by Hardhat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    /// Artifact format marker, e.g. `hh-sol-artifact-1`
    #[serde(rename = "_format")]
    pub format: String,
    pub contract_name: String,
    /// Path of the Solidity source, relative to the project root
    pub source_name: String,
    pub abi: Vec<AbiElement>,
    pub bytecode: String,
    pub deployed_bytecode: String,
    #[serde(default)]
    pub link_references: Value,
    #[serde(default)]
    pub deployed_link_references: Value,
}

/// Kind of an ABI member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbiKind {
    Function,
    Event,
    Error,
    Constructor,
    Fallback,
    Receive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    Nonpayable,
    Payable,
}

/// One member of a contract ABI.
///
/// Fields absent in the artifact stay absent when the element is written back,
/// and unknown fields are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anonymous: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<AbiParam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<AbiParam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<StateMutability>,
    #[serde(rename = "type")]
    pub kind: AbiKind,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Function, event or error parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiParam {
    /// Tuple members, only present when `ty` starts with `tuple`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<AbiParam>>,
    /// Event parameters only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_type: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl AbiParam {
    /// Canonical type as used in signatures; tuples expand to their components.
    pub fn canonical_type(&self) -> String {
        match (self.ty.strip_prefix("tuple"), &self.components) {
            (Some(suffix), Some(components)) => {
                format!("({}){suffix}", canonical_list(components))
            }
            _ => self.ty.clone(),
        }
    }
}

fn canonical_list(params: &[AbiParam]) -> String {
    params
        .iter()
        .map(AbiParam::canonical_type)
        .collect::<Vec<_>>()
        .join(",")
}

impl AbiElement {
    /// Canonical signature, e.g. `transfer(address,uint256)`.
    ///
    /// Returns `None` for unnamed members (constructor, fallback, receive).
    pub fn signature(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        let inputs = self.inputs.as_deref().unwrap_or_default();
        Some(format!("{name}({})", canonical_list(inputs)))
    }

    /// 4-byte selector of a function or error.
    pub fn selector(&self) -> Option<Selector> {
        match self.kind {
            AbiKind::Function | AbiKind::Error => self
                .signature()
                .map(|signature| Selector::from_slice(&keccak256(signature)[..4])),
            _ => None,
        }
    }
}

impl ContractArtifact {
    /// Callable functions declared in the ABI.
    pub fn functions(&self) -> impl Iterator<Item = &AbiElement> {
        self.abi
            .iter()
            .filter(|element| element.kind == AbiKind::Function)
    }
}

/// Read and parse an artifact file.
pub fn load_artifact(path: &Path) -> Result<ContractArtifact, GenerateError> {
    let contents = std::fs::read_to_string(path).map_err(|source| GenerateError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| GenerateError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize an ABI element list to tab-indented JSON.
///
/// The text is checked to parse as a [`JsonAbi`] before it is returned.
pub fn render_abi(abi: &[AbiElement]) -> Result<String, GenerateError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    abi.serialize(&mut serializer)
        .map_err(GenerateError::Serialize)?;

    let text = String::from_utf8(buf)
        .map_err(|e| GenerateError::Serialize(serde_json::Error::custom(e)))?;

    serde_json::from_str::<JsonAbi>(&text).map_err(GenerateError::Validate)?;

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn transfer_function() -> Value {
        json!({
            "inputs": [
                { "internalType": "address", "name": "to", "type": "address" },
                { "internalType": "uint256", "name": "value", "type": "uint256" }
            ],
            "name": "transfer",
            "outputs": [{ "internalType": "bool", "name": "", "type": "bool" }],
            "stateMutability": "nonpayable",
            "type": "function"
        })
    }

    #[test]
    fn test_function_signature_and_selector() {
        let element: AbiElement = serde_json::from_value(transfer_function()).unwrap();

        assert_eq!(
            element.signature().as_deref(),
            Some("transfer(address,uint256)")
        );
        assert_eq!(
            element.selector(),
            Some(Selector::from([0xa9, 0x05, 0x9c, 0xbb]))
        );
    }

    #[test]
    fn test_tuple_canonical_type() {
        let param: AbiParam = serde_json::from_value(json!({
            "components": [
                { "internalType": "uint256", "name": "nonce", "type": "uint256" },
                { "internalType": "bytes", "name": "data", "type": "bytes" }
            ],
            "internalType": "struct Tx[]",
            "name": "txs",
            "type": "tuple[]"
        }))
        .unwrap();

        assert_eq!(param.canonical_type(), "(uint256,bytes)[]");
    }

    #[test]
    fn test_constructor_has_no_selector() {
        let element: AbiElement = serde_json::from_value(json!({
            "inputs": [],
            "stateMutability": "nonpayable",
            "type": "constructor"
        }))
        .unwrap();

        assert_eq!(element.kind, AbiKind::Constructor);
        assert!(element.signature().is_none());
        assert!(element.selector().is_none());
    }

    #[test]
    fn test_render_abi_preserves_fields() {
        let abi = json!([
            transfer_function(),
            {
                "anonymous": false,
                "inputs": [
                    { "indexed": true, "internalType": "address", "name": "from", "type": "address" },
                    { "indexed": true, "internalType": "address", "name": "to", "type": "address" },
                    { "indexed": false, "internalType": "uint256", "name": "value", "type": "uint256" }
                ],
                "name": "Transfer",
                "type": "event"
            },
            { "stateMutability": "payable", "type": "receive" }
        ]);
        let elements: Vec<AbiElement> = serde_json::from_value(abi.clone()).unwrap();

        let text = render_abi(&elements).unwrap();

        assert!(text.starts_with("[\n\t{"));
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), abi);
    }

    #[test]
    fn test_render_abi_keeps_unknown_fields() {
        let abi = json!([{
            "constant": true,
            "inputs": [],
            "name": "totalSupply",
            "outputs": [{ "name": "", "type": "uint256" }],
            "payable": false,
            "stateMutability": "view",
            "type": "function"
        }]);
        let elements: Vec<AbiElement> = serde_json::from_value(abi.clone()).unwrap();

        let text = render_abi(&elements).unwrap();

        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), abi);
    }

    #[test]
    fn test_render_abi_keeps_unknown_param_fields() {
        let abi = json!([{
            "inputs": [
                {
                    "internalType": "address",
                    "name": "account",
                    "type": "address",
                    "description": "holder"
                }
            ],
            "name": "balanceOf",
            "outputs": [
                { "name": "", "type": "uint256", "x-unit": "wei" }
            ],
            "stateMutability": "view",
            "type": "function"
        }]);
        let elements: Vec<AbiElement> = serde_json::from_value(abi.clone()).unwrap();

        let inputs = elements[0].inputs.as_deref().unwrap();
        assert_eq!(inputs[0].extra["description"], json!("holder"));

        let text = render_abi(&elements).unwrap();

        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), abi);
    }

    #[test]
    fn test_load_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_artifact(&dir.path().join("Missing.json")).unwrap_err();

        assert!(matches!(err, GenerateError::Read { .. }));
    }
}
