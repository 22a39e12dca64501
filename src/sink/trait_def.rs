//! AnalyticsSink trait definition.

use crate::error::SinkError;
use crate::payload::AnalyticsPayload;

/// A consumer of analytics payloads.
///
/// `emit` is called once per payload, in the order the payloads were
/// derived. What the sink does with the payload (print it, send it over the
/// network, drop it) is its own business; failures are reported through the
/// returned [`SinkError`] and never inspected by the interceptors.
///
/// Any `Fn(&AnalyticsPayload)` closure is an infallible sink.
///
/// # Example
///
/// ```rust
/// use composable_analytics::{AnalyticsPayload, AnalyticsSink, SinkError};
/// use std::sync::Mutex;
///
/// struct Buffer(Mutex<Vec<String>>);
///
/// impl AnalyticsSink for Buffer {
///     fn emit(&self, payload: &AnalyticsPayload) -> Result<(), SinkError> {
///         self.0.lock().unwrap().push(payload.to_string());
///         Ok(())
///     }
/// }
///
/// let buffer = Buffer(Mutex::new(Vec::new()));
/// buffer.emit(&AnalyticsPayload::screen("Home")).unwrap();
/// assert_eq!(*buffer.0.lock().unwrap(), vec!["screen Home"]);
/// ```
pub trait AnalyticsSink: Send + Sync {
    /// Consume one payload.
    fn emit(&self, payload: &AnalyticsPayload) -> Result<(), SinkError>;
}

impl<F> AnalyticsSink for F
where
    F: Fn(&AnalyticsPayload) + Send + Sync,
{
    fn emit(&self, payload: &AnalyticsPayload) -> Result<(), SinkError> {
        self(payload);
        Ok(())
    }
}
