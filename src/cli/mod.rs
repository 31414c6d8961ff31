//! # CLI Module
//!
//! Command-line access to endpoint tables.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! List a table's endpoints in priority order:
//!
//! ```bash
//! brrtapi routes --table config/endpoints.yaml
//! ```
//!
//! ### `resolve`
//!
//! Show the kind, callback, protection flag and segments a request resolves to:
//!
//! ```bash
//! brrtapi resolve --table config/endpoints.yaml --method GET --path /v1/items/42
//! ```
//!
//! ### `dispatch`
//!
//! Execute a request with the built-in handlers and print the JSON response:
//!
//! ```bash
//! brrtapi dispatch --table config/endpoints.yaml --path /ping --format list --lang de \
//!     --catalog config/catalog.yaml
//! ```
//!
//! The table path may also come from `BRRTAPI_TABLE`; see
//! [`runtime_config`](crate::runtime_config) for the other variables.

mod commands;

pub use commands::{run_cli, Cli, Commands};
