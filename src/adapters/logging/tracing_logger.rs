//! Forwards `Logger` port calls to `tracing`.

use serde_json::Value;

use crate::domain::ports::Logger;

/// Logger adapter emitting `tracing` events under the `usercache` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, message: &str, context: Option<Value>) {
        match context {
            Some(context) => tracing::info!(target: "usercache", %context, "{message}"),
            None => tracing::info!(target: "usercache", "{message}"),
        }
    }

    fn error(&self, message: &str, error: Option<Value>) {
        match error {
            Some(error) => tracing::error!(target: "usercache", %error, "{message}"),
            None => tracing::error!(target: "usercache", "{message}"),
        }
    }
}
