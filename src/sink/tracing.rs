//! Tracing sink (feature `tracing`).

use crate::error::SinkError;
use crate::payload::AnalyticsPayload;
use crate::sink::trait_def::AnalyticsSink;

/// Records each payload as an `info` event on the current subscriber.
///
/// The event carries the payload kind and name as structured fields and the
/// full description as its message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn emit(&self, payload: &AnalyticsPayload) -> Result<(), SinkError> {
        tracing::info!(
            kind = payload.kind(),
            name = payload.name().unwrap_or_default(),
            "analytics {}",
            payload
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn records_payload_description() {
        TracingSink
            .emit(&AnalyticsPayload::screen("Checkout"))
            .unwrap();

        assert!(logs_contain("analytics screen Checkout"));
    }
}
