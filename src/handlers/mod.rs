//! # Handlers Module
//!
//! Defines the capability contract every endpoint handler satisfies and the
//! registry that maps handler kinds (as named in the endpoint table) to the
//! factories that build them.
//!
//! ## Contract
//!
//! A handler is built from the [`RequestContext`] the router produced for the
//! request, exposes a display name, and fills an [`ApiResult`] when executed.
//! The context is handed to [`Handler::execute`] again so handlers can look up
//! segments and callback metadata without holding a back-reference.
//!
//! ## Built-in kinds
//!
//! - `Base` - [`BaseHandler`]: `ping`, `segments` and `describe` callbacks
//! - `Echo` - [`EchoHandler`]: echoes the request back as data
//!
//! ## Example
//!
//! ```rust
//! use brrtapi::handlers::{Handler, HandlerRegistry};
//! use brrtapi::result::ApiResult;
//! use brrtapi::router::RequestContext;
//!
//! struct Health;
//!
//! impl Handler for Health {
//!     fn name(&self) -> &str {
//!         "Health"
//!     }
//!
//!     fn execute(&mut self, _ctx: &RequestContext, result: &mut ApiResult) {
//!         result.set_valid_values("ok", false);
//!     }
//! }
//!
//! let mut registry = HandlerRegistry::with_builtins();
//! registry.register("Health", |_ctx| Box::new(Health));
//! assert!(registry.contains("Health"));
//! ```

mod base;
mod echo;

pub use base::BaseHandler;
pub use echo::EchoHandler;

use crate::result::ApiResult;
use crate::router::RequestContext;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Capability contract for endpoint handlers.
pub trait Handler: Send {
    /// Display name used in logs and descriptions.
    fn name(&self) -> &str;

    /// Run the handler's callback, recording the outcome in `result`.
    fn execute(&mut self, ctx: &RequestContext, result: &mut ApiResult);
}

/// Builds a handler from the router context of a resolved request.
pub type HandlerFactory = Arc<dyn Fn(&RequestContext) -> Box<dyn Handler> + Send + Sync>;

/// Mapping from handler kind to factory.
///
/// Kinds are resolved against the registry once, when an endpoint table is
/// compiled.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    factories: HashMap<String, HandlerFactory>,
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl HandlerRegistry {
    /// Empty registry; every kind is unsupported.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the `Base` and `Echo` kinds.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(BaseHandler::KIND, |ctx| Box::new(BaseHandler::new(ctx)));
        registry.register(EchoHandler::KIND, |ctx| Box::new(EchoHandler::new(ctx)));
        registry
    }

    /// Register (or replace) the factory for `kind`.
    pub fn register<F>(&mut self, kind: &str, factory: F) -> &mut Self
    where
        F: Fn(&RequestContext) -> Box<dyn Handler> + Send + Sync + 'static,
    {
        self.factories.insert(kind.to_string(), Arc::new(factory));
        self
    }

    #[must_use]
    pub fn get(&self, kind: &str) -> Option<HandlerFactory> {
        self.factories.get(kind).map(Arc::clone)
    }

    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Registered kinds, sorted.
    #[must_use]
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}
