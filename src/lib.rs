//! # brrtapi
//!
//! **brrtapi** is the request-dispatch and response-modelling core of a small HTTP API
//! layer. Given an inbound method and path it selects a handler from an ordered endpoint
//! table, and every handler reports its outcome through one structured result type that
//! renders into the shapes API clients, log viewers and UI widgets need.
//!
//! ## Architecture
//!
//! - **[`result`]** - [`ApiResult`](result::ApiResult): status, messages, keyed errors,
//!   primary and secondary payloads, merge and multi-format rendering
//! - **[`table`]** - endpoint descriptors, YAML/JSON loading and compilation
//! - **[`handlers`]** - the handler contract, the kind → factory registry and the
//!   built-in `Base`/`Echo` kinds
//! - **[`router`]** - per-request resolution: first matching endpoint wins
//! - **[`dispatcher`]** - route, gate, execute and render in one call
//! - **[`otel`]** - structured logging setup
//! - **[`runtime_config`]** - environment configuration
//! - **[`cli`]** - the `brrtapi` command line
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Transport
//!     participant Dispatcher
//!     participant Router
//!     participant Gate as AccessGate
//!     participant Handler
//!
//!     Transport->>Dispatcher: dispatch(GET, "/v1/items/42")
//!     Dispatcher->>Router: Router::new(table, method, path)
//!     Router->>Router: split segments, first match in table order
//!     alt No endpoint / unsupported kind
//!         Router-->>Dispatcher: Unresolved
//!         Dispatcher-->>Transport: 404 + error message
//!     end
//!     Router->>Handler: factory(&context)
//!     alt protected endpoint
//!         Dispatcher->>Gate: allow(&context)
//!         Gate-->>Dispatcher: false
//!         Dispatcher-->>Transport: 403
//!     end
//!     Dispatcher->>Handler: execute(&context, &mut result)
//!     Handler-->>Dispatcher: ApiResult filled
//!     Dispatcher->>Dispatcher: to_plain_structure(format, lang)
//!     Dispatcher-->>Transport: ApiResponse { status, body }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtapi::dispatcher::Dispatcher;
//! use brrtapi::handlers::HandlerRegistry;
//! use brrtapi::table::{EndpointDescriptor, EndpointTable};
//! use http::Method;
//!
//! let table = EndpointTable::compile(
//!     vec![EndpointDescriptor::new("GET", r"^/v1/items/\d+$", "Echo", "show", false)],
//!     &HandlerRegistry::with_builtins(),
//! )
//! .expect("valid table");
//!
//! let response = Dispatcher::new(table).dispatch(Method::GET, "/v1/items/42");
//! assert_eq!(response.status, 200);
//! assert_eq!(response.body["values"]["callback"], "show");
//! ```
//!
//! ## Failure Policy
//!
//! The router and the result model never fail on malformed input: unknown handler
//! kinds are logged and leave the request unresolved, malformed error keys are
//! ignored, non-numeric prices render as `NaN`. Business failures travel as result
//! state (`status = false` plus messages and errors), not as Rust errors.

pub mod cli;
pub mod dispatcher;
pub mod handlers;
pub mod ids;
pub mod otel;
pub mod result;
pub mod router;
pub mod runtime_config;
pub mod table;

pub use dispatcher::{ApiResponse, Dispatcher};
pub use result::{ApiResult, Format, Payload};
pub use router::{RequestContext, Router};
pub use table::{load_table, EndpointDescriptor, EndpointTable};
