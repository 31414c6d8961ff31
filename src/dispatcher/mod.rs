//! # Dispatcher Module
//!
//! The dispatcher ties the router and the result model together for a
//! transport layer: it resolves a request, consults the external access gate
//! for protected endpoints, executes the handler and flattens the result into
//! a response body.
//!
//! ## Flow
//!
//! 1. Build a [`Router`](crate::router::Router) against the current table
//! 2. Unresolved → `404` with `"No endpoint matches :path"`
//! 3. Protected and not allowed by the [`AccessGate`] → `403` `"Access denied"`
//! 4. Execute the handler; `200` on success, `422` on failure, or the
//!    handler's `http_status` secondary value when it set one
//! 5. Render with the configured [`RenderOptions`]
//!
//! ## Example
//!
//! ```rust
//! use brrtapi::dispatcher::Dispatcher;
//! use brrtapi::handlers::HandlerRegistry;
//! use brrtapi::table::load_table_from_str;
//! use http::Method;
//!
//! let table = load_table_from_str(
//!     "endpoints:\n  - {method: GET, path: '^/ping$', kind: Base, callback: ping}\n",
//!     &HandlerRegistry::with_builtins(),
//! )
//! .unwrap();
//!
//! let response = Dispatcher::new(table).dispatch(Method::GET, "/ping");
//! assert_eq!(response.status, 200);
//! assert_eq!(response.body["values"], "pong");
//! ```

mod core;

pub use self::core::{AccessGate, ApiResponse, Dispatcher, RenderOptions, HTTP_STATUS_KEY};
