//! ABI module generator.
//!
//! Reads a compiled contract artifact, extracts its ABI and writes a Rust module
//! embedding the ABI as a constant together with a parse accessor:
//! - [`artifact`]: artifact model and ABI rendering
//! - [`template`]: output module template

pub mod artifact;
pub mod template;

pub use artifact::{
    load_artifact, render_abi, AbiElement, AbiKind, AbiParam, ContractArtifact, StateMutability,
};
pub use template::TemplateData;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Artifact path of the RebeccaCoin contract in the Hardhat project.
pub const DEFAULT_ARTIFACT_PATH: &str = "./artifacts/contracts/RebeccaCoin.sol/RebeccaCoin.json";

/// Where the generated module lives in this workspace.
pub const DEFAULT_OUTPUT_PATH: &str = "crates/binding/src/rebecca_coin_contract.rs";

pub const DEFAULT_MODULE_NAME: &str = "rebecca_coin_contract";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("failed to open contract artifact {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to unmarshal contract artifact {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to marshal contract ABI: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("rendered ABI does not parse as a contract ABI: {0}")]
    Validate(#[source] serde_json::Error),

    #[error("output path {} has no file name", .0.display())]
    InvalidOutput(PathBuf),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Generator inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Compiled contract artifact to read
    pub artifact: PathBuf,
    /// Module file to write, overwritten if present
    pub output: PathBuf,
    pub module_name: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            artifact: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            module_name: DEFAULT_MODULE_NAME.to_string(),
        }
    }
}

/// Summary of a generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub contract_name: String,
    pub output: PathBuf,
    /// Number of ABI members embedded
    pub elements: usize,
}

/// Render the output module for an artifact without touching the filesystem.
pub fn render_module(
    artifact: &ContractArtifact,
    output: &Path,
    module_name: &str,
) -> Result<String, GenerateError> {
    let filename = output
        .file_name()
        .ok_or_else(|| GenerateError::InvalidOutput(output.to_path_buf()))?
        .to_string_lossy()
        .into_owned();

    let data = TemplateData {
        filename,
        module_name: module_name.to_string(),
        contract_name: artifact.contract_name.clone(),
        source_name: artifact.source_name.clone(),
        contract_abi: render_abi(&artifact.abi)?,
    };

    Ok(template::render(&data))
}

/// Load the artifact, render the module and write it out.
///
/// The module is rendered fully in memory first; a failure before the write
/// leaves any existing output file untouched and never creates a new one.
pub fn generate(options: &GenerateOptions) -> Result<Generated, GenerateError> {
    info!(artifact = %options.artifact.display(), "Loading contract artifact");
    let artifact = load_artifact(&options.artifact)?;

    for function in artifact.functions() {
        if let (Some(signature), Some(selector)) = (function.signature(), function.selector()) {
            debug!(%selector, %signature, "Embedding function");
        }
    }

    let module = render_module(&artifact, &options.output, &options.module_name)?;

    std::fs::write(&options.output, module).map_err(|source| GenerateError::Write {
        path: options.output.clone(),
        source,
    })?;

    info!(
        contract = %artifact.contract_name,
        elements = artifact.abi.len(),
        output = %options.output.display(),
        "Wrote contract ABI module"
    );

    Ok(Generated {
        contract_name: artifact.contract_name,
        output: options.output.clone(),
        elements: artifact.abi.len(),
    })
}
