//! # Endpoint Table Module
//!
//! The endpoint table is the ordered list of endpoint descriptors the router
//! matches requests against. Each descriptor maps an HTTP method and a path
//! regular expression to a handler kind, a callback name and a protection flag.
//!
//! ## Table Files
//!
//! Tables are loaded from YAML or JSON:
//!
//! ```yaml
//! endpoints:
//!   - method: GET
//!     path: '^/v1/items/\d+$'
//!     kind: Base
//!     callback: show
//!   - method: POST
//!     path: '^/v1/items$'
//!     kind: Base
//!     callback: create
//!     protected: true
//! ```
//!
//! Entry order is priority order: the first matching entry wins, so more
//! specific patterns must come before broader ones.
//!
//! ## Compilation
//!
//! [`EndpointTable::compile`] parses methods, compiles patterns and resolves
//! handler kinds through a [`HandlerRegistry`](crate::handlers::HandlerRegistry)
//! once, at load time. Requests never re-resolve kinds.

mod core;
mod error;
mod load;
mod types;

pub use self::core::EndpointTable;
pub use error::TableError;
pub use load::{load_table, load_table_from_str, parse_table};
pub use types::{Endpoint, EndpointDescriptor, TableFile};
