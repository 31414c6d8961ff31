//! # Runtime Configuration Module
//!
//! Environment-variable configuration for the dispatcher and the CLI.
//!
//! ## Environment Variables
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `BRRTAPI_TABLE` | Endpoint table file (YAML or JSON) | unset |
//! | `BRRTAPI_CATALOG` | Translation catalog file | unset |
//! | `BRRTAPI_LANG` | Language code used when rendering | empty (no translation) |
//! | `BRRTAPI_RENDER_FORMAT` | Message/error format (`plain`, `list`, `text`, ...) | `plain` |
//! | `BRRTAPI_DROP_EMPTY` | Drop empty `errors`/`secondary` from bodies | `true` |
//!
//! ## Usage
//!
//! ```rust
//! use brrtapi::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Rendering as {}", config.render_format);
//! ```

use crate::result::Format;
use std::env;
use std::path::PathBuf;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub table_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub lang: String,
    pub render_format: Format,
    pub drop_empty: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            table_path: None,
            catalog_path: None,
            lang: String::new(),
            render_format: Format::Plain,
            drop_empty: true,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            table_path: lookup("BRRTAPI_TABLE").map(PathBuf::from),
            catalog_path: lookup("BRRTAPI_CATALOG").map(PathBuf::from),
            lang: lookup("BRRTAPI_LANG").unwrap_or(defaults.lang),
            render_format: lookup("BRRTAPI_RENDER_FORMAT")
                .map(|v| Format::parse(&v))
                .unwrap_or(defaults.render_format),
            drop_empty: lookup("BRRTAPI_DROP_EMPTY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.drop_empty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_without_variables() {
        let config = RuntimeConfig::from_lookup(|_| None);
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn test_values_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("BRRTAPI_TABLE", "config/endpoints.yaml"),
            ("BRRTAPI_LANG", "de"),
            ("BRRTAPI_RENDER_FORMAT", "list"),
            ("BRRTAPI_DROP_EMPTY", "false"),
        ]
        .into_iter()
        .collect();
        let config = RuntimeConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.table_path, Some(PathBuf::from("config/endpoints.yaml")));
        assert_eq!(config.lang, "de");
        assert_eq!(config.render_format, Format::List);
        assert!(!config.drop_empty);
    }

    #[test]
    fn test_invalid_bool_falls_back() {
        let config = RuntimeConfig::from_lookup(|k| {
            (k == "BRRTAPI_DROP_EMPTY").then(|| "maybe".to_string())
        });
        assert!(config.drop_empty);
    }
}
