//! Router core module - per-request endpoint resolution.

use crate::handlers::Handler;
use crate::result::{ApiResult, Translator};
use crate::table::EndpointTable;
use http::Method;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Maximum number of path segments before heap allocation.
/// Most API paths have ≤8 segments (e.g. `/v1/users/{id}/posts/{post}`).
pub const MAX_INLINE_SEGMENTS: usize = 8;

/// Path segments stored inline for the common case.
pub type SegmentVec = SmallVec<[String; MAX_INLINE_SEGMENTS]>;

/// Split a raw path on `/` without trimming or dropping empty segments.
///
/// `"/v1/items"` yields `["", "v1", "items"]` and `"a//b"` yields
/// `["a", "", "b"]`: empty segments keep their positions.
#[must_use]
pub fn split_segments(path: &str) -> SegmentVec {
    path.split('/').map(str::to_string).collect()
}

/// Per-request routing context.
///
/// Built once per inbound call and read-only afterwards. Resolution fields
/// (`handler_kind`, `callback_name`, `is_protected`) are `None` unless an
/// endpoint with a supported handler kind matched.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    path: String,
    segments: SegmentVec,
    handler_kind: Option<String>,
    callback: Option<String>,
    protected: Option<bool>,
}

impl RequestContext {
    /// Unresolved context for `method` and `path`.
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            segments: split_segments(path),
            handler_kind: None,
            callback: None,
            protected: None,
        }
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Every path segment, in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Segment at `index`, or `None` when out of range.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn handler_kind(&self) -> Option<&str> {
        self.handler_kind.as_deref()
    }

    #[must_use]
    pub fn callback_name(&self) -> Option<&str> {
        self.callback.as_deref()
    }

    /// `None` means no endpoint matched, which callers must treat
    /// differently from `Some(false)`.
    #[must_use]
    pub fn is_protected(&self) -> Option<bool> {
        self.protected
    }
}

/// Routing state of one request: Unresolved until an endpoint with a
/// supported handler kind matches, then Resolved for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteState {
    Unresolved,
    Resolved,
}

/// Resolves one inbound request against an [`EndpointTable`].
///
/// The router is terminal after construction: it owns the request context
/// and, when resolved, the instantiated handler.
///
/// # Example
///
/// ```rust
/// use brrtapi::handlers::HandlerRegistry;
/// use brrtapi::router::Router;
/// use brrtapi::table::{EndpointDescriptor, EndpointTable};
/// use http::Method;
///
/// let table = EndpointTable::compile(
///     vec![EndpointDescriptor::new("GET", r"^/v1/items/\d+$", "Base", "show", false)],
///     &HandlerRegistry::with_builtins(),
/// )
/// .unwrap();
///
/// let router = Router::new(&table, Method::GET, "/v1/items/42");
/// assert_eq!(router.callback_name(), Some("show"));
/// assert_eq!(router.is_protected(), Some(false));
/// assert_eq!(router.segment(2), Some("items"));
/// ```
pub struct Router {
    context: RequestContext,
    handler: Option<Box<dyn Handler>>,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("context", &self.context)
            .field("handler", &self.handler.as_ref().map(|h| h.name()))
            .finish()
    }
}

impl Router {
    /// Match `method` and `path` against `table` and instantiate the
    /// handler of the first matching endpoint.
    ///
    /// An unsupported handler kind on the matching endpoint is logged and
    /// leaves the router unresolved; later entries are not consulted.
    #[must_use]
    pub fn new(table: &EndpointTable, method: Method, path: &str) -> Self {
        let mut context = RequestContext::new(method, path);

        debug!(
            method = %context.method,
            path = %path,
            segments = context.segments.len(),
            "Route match attempt"
        );

        let match_start = Instant::now();
        let Some(endpoint) = table.first_match(&context.method, path) else {
            warn!(
                method = %context.method,
                path = %path,
                duration_us = match_start.elapsed().as_micros(),
                "No endpoint matched"
            );
            return Self {
                context,
                handler: None,
            };
        };
        let match_duration = match_start.elapsed();

        let descriptor = &endpoint.descriptor;
        let Some(factory) = endpoint.factory.as_ref() else {
            warn!(
                method = %context.method,
                path = %path,
                handler_kind = %descriptor.kind,
                callback = %descriptor.callback,
                "Matched endpoint has an unsupported handler kind"
            );
            return Self {
                context,
                handler: None,
            };
        };

        context.handler_kind = Some(descriptor.kind.clone());
        context.callback = Some(descriptor.callback.clone());
        context.protected = Some(descriptor.protected);

        if match_duration > Duration::from_millis(1) {
            warn!(
                method = %context.method,
                path = %path,
                path_pattern = %descriptor.path,
                duration_us = match_duration.as_micros(),
                "Slow endpoint matching detected"
            );
        } else {
            info!(
                method = %context.method,
                path = %path,
                path_pattern = %descriptor.path,
                handler_kind = %descriptor.kind,
                callback = %descriptor.callback,
                protected = descriptor.protected,
                duration_us = match_duration.as_micros(),
                "Endpoint matched"
            );
        }

        let handler = factory(&context);
        Self {
            context,
            handler: Some(handler),
        }
    }

    #[must_use]
    pub fn state(&self) -> RouteState {
        if self.handler.is_some() {
            RouteState::Resolved
        } else {
            RouteState::Unresolved
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.state() == RouteState::Resolved
    }

    #[must_use]
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// `None` when no endpoint matched.
    #[must_use]
    pub fn is_protected(&self) -> Option<bool> {
        self.context.is_protected()
    }

    /// All segments of the request path.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        self.context.segments()
    }

    /// One segment of the request path, `None` when out of range.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.context.segment(index)
    }

    #[must_use]
    pub fn callback_name(&self) -> Option<&str> {
        self.context.callback_name()
    }

    #[must_use]
    pub fn handler_kind(&self) -> Option<&str> {
        self.context.handler_kind()
    }

    #[must_use]
    pub fn handler(&self) -> Option<&dyn Handler> {
        self.handler.as_deref()
    }

    /// Run the resolved handler against a fresh result using `translator`.
    ///
    /// Returns `None` when the router is unresolved.
    pub fn execute(&mut self, translator: Arc<dyn Translator>) -> Option<ApiResult> {
        let handler = self.handler.as_mut()?;
        let mut result = ApiResult::with_translator(translator);
        handler.execute(&self.context, &mut result);
        debug!(
            handler = %handler.name(),
            status = result.status(),
            errors = result.error_count(),
            "Handler executed"
        );
        Some(result)
    }
}
