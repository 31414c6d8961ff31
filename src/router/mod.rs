//! # Router Module
//!
//! The router module resolves one inbound request (method + raw path) against
//! an ordered [`EndpointTable`](crate::table::EndpointTable) and instantiates the
//! handler of the winning endpoint.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Splitting the raw path into segments (empty segments are kept in place)
//! - Selecting the first endpoint whose method matches exactly and whose
//!   pattern matches the full raw path
//! - Recording the callback name and protection flag of that endpoint
//! - Building the handler through the factory its kind resolved to
//!
//! ## States
//!
//! A [`Router`] is either **Unresolved** (no endpoint matched, or the matching
//! endpoint's handler kind is unsupported) or **Resolved**. It never changes
//! state after construction.
//!
//! ## Example
//!
//! ```rust,ignore
//! use brrtapi::router::Router;
//! use http::Method;
//!
//! let router = Router::new(&table, Method::POST, "/v1/items/42");
//! if router.is_protected().is_none() {
//!     // no endpoint: respond 404
//! }
//! ```
//!
//! ## Performance
//!
//! Matching is a linear scan over precompiled regexes, O(n) in the number of
//! endpoints. Segments are stored inline for paths of up to eight segments.

mod core;

pub use self::core::{split_segments, RequestContext, RouteState, Router, SegmentVec, MAX_INLINE_SEGMENTS};
