//! Output module template.

const CONTRACT_TEMPLATE: &str = include_str!("../templates/contract.rs.tmpl");

/// Values substituted into the output template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateData {
    /// File name of the generated module
    pub filename: String,
    /// Module name the output is meant to be mounted as
    pub module_name: String,
    pub contract_name: String,
    pub source_name: String,
    /// Rendered ABI JSON text
    pub contract_abi: String,
}

/// Render the contract module template.
///
/// The ABI goes in last so that placeholder-looking text inside it is left alone.
pub fn render(data: &TemplateData) -> String {
    CONTRACT_TEMPLATE
        .replace("{{FILENAME}}", &data.filename)
        .replace("{{MODULE_NAME}}", &data.module_name)
        .replace("{{CONTRACT_NAME}}", &data.contract_name)
        .replace("{{SOURCE_NAME}}", &data.source_name)
        .replace("{{CONTRACT_ABI}}", &raw_string_literal(&data.contract_abi))
}

/// Wrap text in a raw string literal whose `#` fence the text cannot close.
pub fn raw_string_literal(text: &str) -> String {
    let mut hashes = 1;
    while text.contains(&format!("\"{}", "#".repeat(hashes))) {
        hashes += 1;
    }
    let fence = "#".repeat(hashes);

    format!("r{fence}\"{text}\"{fence}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(abi: &str) -> TemplateData {
        TemplateData {
            filename: "rebecca_coin_contract.rs".to_string(),
            module_name: "rebecca_coin_contract".to_string(),
            contract_name: "RebeccaCoin".to_string(),
            source_name: "contracts/RebeccaCoin.sol".to_string(),
            contract_abi: abi.to_string(),
        }
    }

    #[test]
    fn test_raw_string_literal_fence() {
        assert_eq!(raw_string_literal("[]"), "r#\"[]\"#");
        assert_eq!(raw_string_literal("\"#"), "r##\"\"#\"##");
        assert_eq!(raw_string_literal("\"##\"#"), "r###\"\"##\"#\"###");
    }

    #[test]
    fn test_render_fills_every_placeholder() {
        let output = render(&data("[]"));

        assert!(!output.contains("{{"));
        assert!(output.contains("`rebecca_coin_contract`"));
        assert!(output.contains("`contracts/RebeccaCoin.sol`"));
        assert!(output.contains("pub const CONTRACT_ABI: &str = r#\"[]\"#;"));
        assert!(output.contains("pub fn contract_abi()"));
    }

    #[test]
    fn test_render_leaves_abi_text_verbatim() {
        let abi = r#"[{"name":"{{CONTRACT_NAME}}","type":"error","inputs":[]}]"#;
        let output = render(&data(abi));

        assert!(output.contains(abi));
    }
}
