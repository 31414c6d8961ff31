use super::Handler;
use crate::result::{ApiResult, Args};
use crate::router::RequestContext;
use serde_json::{json, Value};
use tracing::debug;

/// General-purpose handler for service-level callbacks.
///
/// | Callback | Outcome |
/// |---|---|
/// | `ping` | valid value `"pong"` |
/// | `segments` | valid values: the request path segments |
/// | `describe` | valid values: kind, callback, protection and path |
///
/// Any other callback fails with `"Unknown callback :callback"`.
#[derive(Debug, Clone)]
pub struct BaseHandler {
    callback: String,
}

impl BaseHandler {
    pub const KIND: &'static str = "Base";

    #[must_use]
    pub fn new(ctx: &RequestContext) -> Self {
        Self {
            callback: ctx.callback_name().unwrap_or_default().to_string(),
        }
    }
}

impl Handler for BaseHandler {
    fn name(&self) -> &str {
        Self::KIND
    }

    fn execute(&mut self, ctx: &RequestContext, result: &mut ApiResult) {
        debug!(callback = %self.callback, path = %ctx.path(), "Base handler executing");
        match self.callback.as_str() {
            "ping" => {
                result.set_valid_values("pong", false);
            }
            "segments" => {
                let segments: Vec<Value> = ctx.segments().iter().map(|s| json!(s)).collect();
                result.set_valid_values(segments, false);
            }
            "describe" => {
                result.set_valid_values(
                    json!({
                        "kind": ctx.handler_kind(),
                        "callback": ctx.callback_name(),
                        "protected": ctx.is_protected(),
                        "method": ctx.method().as_str(),
                        "path": ctx.path(),
                    }),
                    false,
                );
            }
            other => {
                let mut args = Args::new();
                args.insert(":callback".into(), json!(other));
                result.set_error_message("Unknown callback :callback", Some(args));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    fn run(callback: &str, path: &str) -> ApiResult {
        let ctx = RequestContext::new(Method::GET, path);
        let mut handler = BaseHandler {
            callback: callback.to_string(),
        };
        let mut result = ApiResult::new();
        handler.execute(&ctx, &mut result);
        result
    }

    #[test]
    fn test_ping() {
        let result = run("ping", "/ping");
        assert!(result.status());
        assert_eq!(result.data().to_value(), json!("pong"));
    }

    #[test]
    fn test_segments_callback() {
        let result = run("segments", "/a//b");
        assert_eq!(result.data().to_value(), json!(["", "a", "", "b"]));
    }

    #[test]
    fn test_unknown_callback_fails() {
        let result = run("explode", "/x");
        assert!(!result.status());
        assert_eq!(result.messages()[0].text, "Unknown callback :callback");
        assert_eq!(result.messages()[0].args.get(":callback"), Some(&json!("explode")));
    }
}
