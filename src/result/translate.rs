use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Default translation category passed by the result renderers.
pub const DEFAULT_KIND: &str = "code";

/// Translation strategy injected into [`ApiResult`](super::ApiResult).
///
/// Implementations must be pure: the same input always yields the same
/// output and no shared mutable state is touched. When a text cannot be
/// translated the original text is returned unchanged.
pub trait Translator: Send + Sync {
    /// Translate `text` into `lang`.
    ///
    /// `kind` names the category of the text (`"code"` by default) and
    /// `src` its origin, for backends that keep separate catalogs.
    fn translate(&self, text: &str, lang: &str, kind: &str, src: &str) -> String;
}

/// Translator that returns every text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Translator for Passthrough {
    fn translate(&self, text: &str, _lang: &str, _kind: &str, _src: &str) -> String {
        text.to_string()
    }
}

/// Dictionary-backed translator keyed by language then source text.
///
/// Catalog files are YAML or JSON documents of the form
///
/// ```yaml
/// de:
///   "Access denied": "Zugriff verweigert"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct CatalogTranslator {
    catalogs: HashMap<String, HashMap<String, String>>,
}

impl CatalogTranslator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, lang: &str, text: &str, translation: &str) -> &mut Self {
        self.catalogs
            .entry(lang.to_string())
            .or_default()
            .insert(text.to_string(), translation.to_string());
        self
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse translation catalog")
    }

    /// Load a catalog file; `.json` files are parsed as JSON, anything else
    /// as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse catalog {}", path.display()))
        } else {
            Self::from_yaml_str(&content)
        }
    }

    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.catalogs.keys().map(String::as_str).collect();
        langs.sort_unstable();
        langs
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, text: &str, lang: &str, _kind: &str, _src: &str) -> String {
        self.catalogs
            .get(lang)
            .and_then(|catalog| catalog.get(text))
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_falls_back_to_source_text() {
        let mut catalog = CatalogTranslator::new();
        catalog.insert("de", "Hello", "Hallo");
        assert_eq!(catalog.translate("Hello", "de", DEFAULT_KIND, ""), "Hallo");
        assert_eq!(catalog.translate("Hello", "fr", DEFAULT_KIND, ""), "Hello");
        assert_eq!(catalog.translate("Bye", "de", DEFAULT_KIND, ""), "Bye");
    }

    #[test]
    fn test_catalog_from_yaml() {
        let catalog = CatalogTranslator::from_yaml_str("de:\n  Thanks: Danke\nfr:\n  Thanks: Merci\n")
            .unwrap_or_default();
        assert_eq!(catalog.languages(), vec!["de", "fr"]);
        assert_eq!(catalog.translate("Thanks", "fr", DEFAULT_KIND, ""), "Merci");
    }
}
