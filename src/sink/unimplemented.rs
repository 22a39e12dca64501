//! Sink that flags missing analytics configuration.

use crate::error::SinkError;
use crate::payload::AnalyticsPayload;
use crate::sink::trait_def::AnalyticsSink;

/// A placeholder sink for environments that should never emit.
///
/// Put it in test environments whose code paths are not expected to produce
/// analytics. Any emission is reported loudly:
///
/// - with `debug_assertions` (tests, debug builds) it panics, failing the test;
/// - otherwise it logs an error and returns [`SinkError::Unimplemented`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnimplementedSink {
    endpoint: String,
}

impl UnimplementedSink {
    /// An unimplemented sink reporting under `endpoint`.
    pub fn named(endpoint: impl Into<String>) -> Self {
        UnimplementedSink {
            endpoint: endpoint.into(),
        }
    }

    /// The name used in diagnostics.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for UnimplementedSink {
    fn default() -> Self {
        UnimplementedSink::named("AnalyticsClient.emit")
    }
}

impl AnalyticsSink for UnimplementedSink {
    fn emit(&self, payload: &AnalyticsPayload) -> Result<(), SinkError> {
        let message = format!(
            "Unimplemented: '{}' was called with {}",
            self.endpoint, payload
        );

        #[cfg(feature = "tracing")]
        tracing::error!("{}", message);
        #[cfg(not(feature = "tracing"))]
        eprintln!("{}", message);

        if cfg!(debug_assertions) {
            panic!("{}", message);
        }

        Err(SinkError::Unimplemented {
            payload: payload.to_string(),
        })
    }
}
