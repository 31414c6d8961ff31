use super::core::EndpointTable;
use super::types::TableFile;
use crate::handlers::HandlerRegistry;
use anyhow::{Context, Result};
use std::path::Path;

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
}

/// Parse a table document. YAML is a superset of JSON, so both syntaxes are
/// accepted.
pub fn parse_table(content: &str) -> Result<TableFile> {
    serde_yaml::from_str(content).context("Failed to parse endpoint table")
}

/// Load and compile an endpoint table from a YAML or JSON file.
pub fn load_table(path: &Path, registry: &HandlerRegistry) -> Result<EndpointTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read endpoint table {}", path.display()))?;
    let file: TableFile = if is_yaml(path) {
        parse_table(&content)?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse endpoint table {}", path.display()))?
    };
    let table = EndpointTable::compile(file.endpoints, registry)
        .with_context(|| format!("Invalid endpoint table {}", path.display()))?;
    Ok(table)
}

/// Compile a table from an in-memory document.
pub fn load_table_from_str(content: &str, registry: &HandlerRegistry) -> Result<EndpointTable> {
    let file = parse_table(content)?;
    Ok(EndpointTable::compile(file.endpoints, registry)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table_defaults_protected() {
        let file = parse_table(
            r#"
endpoints:
  - method: GET
    path: '^/ping$'
    kind: Base
    callback: ping
"#,
        )
        .unwrap_or_default();
        assert_eq!(file.endpoints.len(), 1);
        assert!(!file.endpoints[0].protected);
    }

    #[test]
    fn test_parse_table_accepts_aliases() {
        let file = parse_table(
            r#"{"endpoints": [{"method": "POST", "pattern": "^/x$", "handler": "Echo", "callback": "c", "protected": true}]}"#,
        )
        .unwrap_or_default();
        assert_eq!(file.endpoints[0].path, "^/x$");
        assert_eq!(file.endpoints[0].kind, "Echo");
        assert!(file.endpoints[0].protected);
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        let registry = HandlerRegistry::with_builtins();
        let err = load_table_from_str(
            "endpoints:\n  - {method: GET, path: '^/(unclosed$', kind: Base, callback: ping}\n",
            &registry,
        );
        assert!(err.is_err());
    }
}
