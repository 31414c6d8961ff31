use super::error::TableError;
use super::types::{Endpoint, EndpointDescriptor};
use crate::handlers::HandlerRegistry;
use http::Method;
use regex::Regex;
use tracing::{info, warn};

/// Ordered, compiled endpoint table.
///
/// Order is priority: the first endpoint whose method and pattern both match a
/// request wins, regardless of how specific later entries are.
#[derive(Debug, Clone, Default)]
pub struct EndpointTable {
    endpoints: Vec<Endpoint>,
}

impl EndpointTable {
    /// Table with no endpoints; every request stays unresolved.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile descriptors into matchers, resolving each handler kind against
    /// `registry` once.
    ///
    /// Invalid methods or patterns are errors. Unknown kinds are logged and
    /// kept as unsupported endpoints so they still shadow later entries.
    pub fn compile(
        descriptors: Vec<EndpointDescriptor>,
        registry: &HandlerRegistry,
    ) -> Result<Self, TableError> {
        let mut endpoints = Vec::with_capacity(descriptors.len());

        for (index, descriptor) in descriptors.into_iter().enumerate() {
            let method = Method::from_bytes(descriptor.method.as_bytes()).map_err(|_| {
                TableError::InvalidMethod {
                    index,
                    method: descriptor.method.clone(),
                }
            })?;
            let pattern = Regex::new(&descriptor.path).map_err(|e| TableError::InvalidPattern {
                index,
                pattern: descriptor.path.clone(),
                reason: e.to_string(),
            })?;

            let factory = registry.get(&descriptor.kind);
            if factory.is_none() {
                warn!(
                    index,
                    method = %descriptor.method,
                    path_pattern = %descriptor.path,
                    handler_kind = %descriptor.kind,
                    "Unsupported handler kind in endpoint table"
                );
            }

            endpoints.push(Endpoint {
                descriptor,
                method,
                pattern,
                factory,
            });
        }

        let routes_summary: Vec<String> = endpoints
            .iter()
            .take(10)
            .map(|e| format!("{} {}", e.descriptor.method, e.descriptor.path))
            .collect();
        info!(
            endpoints_count = endpoints.len(),
            routes_summary = ?routes_summary,
            "Endpoint table loaded"
        );

        Ok(Self { endpoints })
    }

    /// First endpoint matching `method` and `path`, in table order.
    #[must_use]
    pub fn first_match(&self, method: &Method, path: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.matches(method, path))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter()
    }

    /// Print all endpoints to stdout in priority order.
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.endpoints.len());
        for (i, e) in self.endpoints.iter().enumerate() {
            let d = &e.descriptor;
            println!(
                "[route {i}] {} {} -> {}::{}{}{}",
                d.method,
                d.path,
                d.kind,
                d.callback,
                if d.protected { " (protected)" } else { "" },
                if e.is_supported() { "" } else { " (unsupported kind)" },
            );
        }
    }
}
