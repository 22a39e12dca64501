//! Fan-out of one emission to several sinks.

use crate::error::SinkError;
use crate::payload::AnalyticsPayload;
use crate::sink::client::AnalyticsClient;
use crate::sink::trait_def::AnalyticsSink;

/// How a [`MergedSink`] reacts when one of its sinks fails.
///
/// Policies are plain data; pick one when building the merged sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Invoke every sink, then report all failures together.
    #[default]
    ContinueAndAggregate,
    /// Stop at the first failing sink and report only that failure.
    StopOnFirst,
}

/// A sink that broadcasts each payload to an ordered list of sinks.
///
/// Usually built through [`AnalyticsClient::merge`], which also handles the
/// zero and one sink cases.
///
/// # Example
///
/// ```rust
/// use composable_analytics::sink::{FailurePolicy, MergedSink};
/// use composable_analytics::testing::{FailingSink, RecordingSink};
/// use composable_analytics::{AnalyticsClient, AnalyticsSink};
///
/// let after = RecordingSink::new();
/// let merged = MergedSink::new(vec![
///     AnalyticsClient::new(FailingSink::new("remote")),
///     after.client(),
/// ]);
///
/// // The failing sink does not silence the one after it.
/// assert!(merged.emit(&"tap".into()).is_err());
/// assert_eq!(after.len(), 1);
///
/// let strict = MergedSink::new(vec![
///     AnalyticsClient::new(FailingSink::new("remote")),
///     after.client(),
/// ])
/// .with_policy(FailurePolicy::StopOnFirst);
///
/// assert!(strict.emit(&"tap".into()).is_err());
/// assert_eq!(after.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MergedSink {
    sinks: Vec<AnalyticsClient>,
    policy: FailurePolicy,
}

impl MergedSink {
    /// Broadcast to `sinks` with the default policy.
    pub fn new(sinks: Vec<AnalyticsClient>) -> Self {
        MergedSink {
            sinks,
            policy: FailurePolicy::default(),
        }
    }

    /// Replace the failure policy.
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The configured failure policy.
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Number of sinks broadcast to.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// True when there is nothing to broadcast to.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl AnalyticsSink for MergedSink {
    fn emit(&self, payload: &AnalyticsPayload) -> Result<(), SinkError> {
        let mut failures = Vec::new();

        for sink in &self.sinks {
            if let Err(err) = sink.emit(payload) {
                if self.policy == FailurePolicy::StopOnFirst {
                    return Err(err);
                }
                failures.push(err);
            }
        }

        SinkError::aggregate(failures)
    }
}
