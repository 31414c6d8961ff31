//! # Result Module
//!
//! The result module provides [`ApiResult`], the structured outcome every handler
//! fills while it runs, and the rendering strategies that turn it into the shapes
//! different consumers need.
//!
//! ## Overview
//!
//! An [`ApiResult`] owns four independent buffers:
//!
//! - **status** - boolean outcome, `false` until explicitly set
//! - **messages** - ordered texts with placeholder arguments
//! - **errors** - keyed entries, unique per key
//! - **data / secondary** - shape-flexible [`Payload`]s
//!
//! ## Rendering
//!
//! Messages and errors render through a [`Format`]:
//!
//! | Format | Messages | Errors |
//! |---|---|---|
//! | `Plain` | raw buffer | raw buffer |
//! | `List` | `<ol><li>..</li></ol>` | `<ol><li>..</li></ol>` |
//! | `ListUnordered` | `<ul>..</ul>` | `<ul>..</ul>` |
//! | `Advanced` | same as `List` | `<ol><dt>key</dt><dd>text</dd>..</ol>` |
//! | `Text` | newline-joined | newline-joined |
//! | `Indexed` | `"Wrong format requested"` | 0-based sequence |
//! | `Translated` | translated texts | translated texts by key |
//!
//! When a language code is given, each text is translated through the injected
//! [`Translator`] before placeholder arguments are substituted.
//!
//! ## Example
//!
//! ```rust
//! use brrtapi::result::{ApiResult, Format};
//! use serde_json::json;
//!
//! let mut result = ApiResult::new();
//! result
//!     .set_error("email", json!("Address is\n  invalid"), None)
//!     .set_error_message("Validation failed", None);
//!
//! let body = result.to_plain_structure(Format::Text, "", true);
//! assert_eq!(body["errors"], json!("Address is invalid"));
//! assert_eq!(body["errorsCount"], json!(1));
//! ```

mod core;
mod message;
mod payload;
mod render;
mod translate;

pub use self::core::{ApiResult, SecondaryKey};
pub use message::{normalize_whitespace, Args, ErrorBag, ErrorEntry, Message};
pub use payload::Payload;
pub use render::{escape_html, format_price, substitute, Format, Rendered, WRONG_FORMAT};
pub use translate::{CatalogTranslator, Passthrough, Translator, DEFAULT_KIND};
