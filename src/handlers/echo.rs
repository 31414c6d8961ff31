use super::Handler;
use crate::result::ApiResult;
use crate::router::RequestContext;
use serde_json::json;

/// Echoes the request back: method, path, callback and segments.
#[derive(Debug, Clone, Default)]
pub struct EchoHandler;

impl EchoHandler {
    pub const KIND: &'static str = "Echo";

    #[must_use]
    pub fn new(_ctx: &RequestContext) -> Self {
        Self
    }
}

impl Handler for EchoHandler {
    fn name(&self) -> &str {
        Self::KIND
    }

    fn execute(&mut self, ctx: &RequestContext, result: &mut ApiResult) {
        result
            .set_valid_values(
                json!({
                    "handler": Self::KIND,
                    "method": ctx.method().as_str(),
                    "path": ctx.path(),
                    "callback": ctx.callback_name(),
                    "segments": ctx.segments(),
                }),
                false,
            )
            .set_secondary_value("segment_count", json!(ctx.segments().len()));
    }
}
