use crate::ids::RequestId;
use crate::result::{ApiResult, Args, Format, Passthrough, Translator};
use crate::router::{RequestContext, Router};
use crate::runtime_config::RuntimeConfig;
use crate::table::EndpointTable;
use arc_swap::ArcSwap;
use http::Method;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Secondary-data key a handler sets to override the response status code.
pub const HTTP_STATUS_KEY: &str = "http_status";

/// External authorization gate consulted for protected endpoints.
///
/// The dispatcher never decides access itself: protected endpoints are
/// denied unless a gate is installed and allows the request.
pub trait AccessGate: Send + Sync {
    fn allow(&self, ctx: &RequestContext) -> bool;
}

impl<F> AccessGate for F
where
    F: Fn(&RequestContext) -> bool + Send + Sync,
{
    fn allow(&self, ctx: &RequestContext) -> bool {
        self(ctx)
    }
}

/// How results are flattened into response bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: Format,
    /// Language code; empty disables translation.
    pub lang: String,
    pub drop_empty: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: Format::Plain,
            lang: String::new(),
            drop_empty: true,
        }
    }
}

impl RenderOptions {
    #[must_use]
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            format: config.render_format,
            lang: config.lang.clone(),
            drop_empty: config.drop_empty,
        }
    }
}

/// Response produced for one dispatched request.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub request_id: RequestId,
    /// HTTP status code (200, 403, 404, 422, ...)
    pub status: u16,
    /// Flattened result (see [`ApiResult::to_plain_structure`])
    pub body: Value,
}

/// Resolves, authorizes, executes and renders requests.
///
/// The endpoint table sits behind an [`ArcSwap`] so it can be replaced while
/// requests are in flight; each dispatch works on the table it loaded at the
/// start.
pub struct Dispatcher {
    table: ArcSwap<EndpointTable>,
    translator: Arc<dyn Translator>,
    gate: Option<Arc<dyn AccessGate>>,
    options: RenderOptions,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("endpoints", &self.table.load().len())
            .field("gate", &self.gate.is_some())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    #[must_use]
    pub fn new(table: EndpointTable) -> Self {
        Self {
            table: ArcSwap::from_pointee(table),
            translator: Arc::new(Passthrough),
            gate: None,
            options: RenderOptions::default(),
        }
    }

    #[must_use]
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    #[must_use]
    pub fn with_gate(mut self, gate: Arc<dyn AccessGate>) -> Self {
        self.gate = Some(gate);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Swap in a new endpoint table; in-flight dispatches keep the old one.
    pub fn reload(&self, table: EndpointTable) {
        info!(endpoints_count = table.len(), "Endpoint table reloaded");
        self.table.store(Arc::new(table));
    }

    #[must_use]
    pub fn table(&self) -> Arc<EndpointTable> {
        self.table.load_full()
    }

    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn dispatch(&self, method: Method, path: &str) -> ApiResponse {
        self.dispatch_with_id(RequestId::new(), method, path)
    }

    pub fn dispatch_with_id(&self, request_id: RequestId, method: Method, path: &str) -> ApiResponse {
        let table = self.table.load();
        let mut router = Router::new(&table, method, path);

        let (status, result) = match router.is_protected() {
            None => {
                let mut result = self.new_result();
                let mut args = Args::new();
                args.insert(":path".into(), json!(path));
                result.set_error_message("No endpoint matches :path", Some(args));
                (404, result)
            }
            Some(true) if !self.allowed(router.context()) => {
                warn!(
                    request_id = %request_id,
                    path = %path,
                    callback = ?router.callback_name(),
                    "Access denied to protected endpoint"
                );
                let mut result = self.new_result();
                result.set_error_message("Access denied", None);
                (403, result)
            }
            Some(_) => match router.execute(Arc::clone(&self.translator)) {
                Some(result) => (status_for(&result), result),
                None => {
                    let mut result = self.new_result();
                    result.set_error_message("Handler unavailable", None);
                    (500, result)
                }
            },
        };

        info!(
            request_id = %request_id,
            method = %router.context().method(),
            path = %path,
            handler_kind = ?router.handler_kind(),
            callback = ?router.callback_name(),
            status,
            "Request dispatched"
        );

        ApiResponse {
            request_id,
            status,
            body: result.to_plain_structure(
                self.options.format,
                &self.options.lang,
                self.options.drop_empty,
            ),
        }
    }

    fn new_result(&self) -> ApiResult {
        ApiResult::with_translator(Arc::clone(&self.translator))
    }

    fn allowed(&self, ctx: &RequestContext) -> bool {
        self.gate.as_ref().is_some_and(|gate| gate.allow(ctx))
    }
}

/// 200 for successful results, 422 for failed ones, unless the handler set a
/// valid `http_status` secondary value.
fn status_for(result: &ApiResult) -> u16 {
    let explicit = result
        .get_secondary_value(HTTP_STATUS_KEY)
        .and_then(Value::as_u64)
        .and_then(|code| u16::try_from(code).ok())
        .filter(|code| (100..=599).contains(code));

    match explicit {
        Some(code) => code,
        None if result.status() => 200,
        None => 422,
    }
}
