use crate::handlers::HandlerFactory;
use http::Method;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of the endpoint table, as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    /// HTTP verb; matched exactly (case-sensitive).
    pub method: String,
    /// Regular expression tested against the full raw request path.
    #[serde(alias = "pattern", alias = "path_pattern")]
    pub path: String,
    /// Handler kind, resolved through the handler registry.
    #[serde(alias = "handler")]
    pub kind: String,
    /// Operation the handler should run; opaque to the router.
    pub callback: String,
    /// Whether an external authorization gate must approve the request.
    #[serde(default)]
    pub protected: bool,
}

impl EndpointDescriptor {
    pub fn new(method: &str, path: &str, kind: &str, callback: &str, protected: bool) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            kind: kind.to_string(),
            callback: callback.to_string(),
            protected,
        }
    }
}

/// On-disk layout of an endpoint table file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableFile {
    #[serde(default)]
    pub endpoints: Vec<EndpointDescriptor>,
}

/// A descriptor compiled for matching: parsed method, compiled pattern and
/// the handler factory its kind resolved to (if the kind is supported).
#[derive(Clone)]
pub struct Endpoint {
    pub descriptor: EndpointDescriptor,
    pub method: Method,
    pub pattern: Regex,
    pub factory: Option<HandlerFactory>,
}

impl Endpoint {
    /// Exact method equality, then the pattern against the full path.
    #[inline]
    #[must_use]
    pub fn matches(&self, method: &Method, path: &str) -> bool {
        self.method == *method && self.pattern.is_match(path)
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.factory.is_some()
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("descriptor", &self.descriptor)
            .field("supported", &self.is_supported())
            .finish()
    }
}
