//! Console sink.

use crate::error::SinkError;
use crate::payload::AnalyticsPayload;
use crate::sink::trait_def::AnalyticsSink;

/// Prints each payload's description to stdout, one line per payload.
///
/// # Example
///
/// ```rust
/// use composable_analytics::sink::ConsoleSink;
/// use composable_analytics::AnalyticsPayload;
///
/// let sink = ConsoleSink::with_prefix("[app]");
/// assert_eq!(sink.line(&AnalyticsPayload::screen("Home")), "[app] screen Home");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSink {
    prefix: String,
}

impl ConsoleSink {
    /// Prefix used by [`ConsoleSink::default`].
    pub const DEFAULT_PREFIX: &'static str = "[Analytics]";

    /// A console sink with a custom line prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        ConsoleSink {
            prefix: prefix.into(),
        }
    }

    /// The line printed for `payload`.
    pub fn line(&self, payload: &AnalyticsPayload) -> String {
        if self.prefix.is_empty() {
            payload.to_string()
        } else {
            format!("{} {}", self.prefix, payload)
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        ConsoleSink::with_prefix(Self::DEFAULT_PREFIX)
    }
}

impl AnalyticsSink for ConsoleSink {
    fn emit(&self, payload: &AnalyticsPayload) -> Result<(), SinkError> {
        println!("{}", self.line(payload));
        Ok(())
    }
}
