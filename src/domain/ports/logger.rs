use serde_json::Value;

/// Port trait for the service's log sink
///
/// The user service reports cache hits, fallbacks, and swallowed failures
/// through this trait instead of writing to a global logger. Implementations
/// (adapters) can forward to:
/// - `tracing` (see `TracingLogger`)
/// - an in-memory buffer for assertions (see `RecordingLogger`)
/// - any host-application logging facility
///
/// # Contract
///
/// Logging is fire-and-forget: methods return nothing and must never panic.
/// An implementation that cannot deliver a message drops it.
///
/// # Structured Context
///
/// Both methods take an optional JSON value carrying structured context.
/// Common keys used by the service:
/// - `id`: the user id the event refers to
/// - `error`: the rendered error for failure events
/// - `source`: where a result came from (`cache`, `remote`, `storage`)
///
/// # Examples
///
/// ```
/// use usercache::domain::ports::Logger;
/// use serde_json::json;
///
/// fn report(logger: &dyn Logger, id: &str) {
///     logger.log("cache hit", Some(json!({ "id": id })));
///     logger.error("fetch failed", Some(json!({ "id": id, "error": "timeout" })));
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Record an informational event
    fn log(&self, message: &str, context: Option<Value>);

    /// Record a failure
    fn error(&self, message: &str, error: Option<Value>);
}
