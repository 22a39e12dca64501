//! Discarding sink.

use crate::error::SinkError;
use crate::payload::AnalyticsPayload;
use crate::sink::trait_def::AnalyticsSink;

/// Drops every payload and never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopSink;

impl AnalyticsSink for NoopSink {
    fn emit(&self, _payload: &AnalyticsPayload) -> Result<(), SinkError> {
        Ok(())
    }
}
