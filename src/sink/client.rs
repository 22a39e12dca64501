//! AnalyticsClient - a cloneable handle to a sink, and the environment hook.

use std::sync::Arc;

use crate::error::SinkError;
use crate::payload::AnalyticsPayload;
use crate::sink::console::ConsoleSink;
use crate::sink::merge::{FailurePolicy, MergedSink};
use crate::sink::noop::NoopSink;
use crate::sink::trait_def::AnalyticsSink;
use crate::sink::unimplemented::UnimplementedSink;

/// A cloneable, type-erased analytics sink.
///
/// This is the value environments carry. Cloning is an `Arc` refcount bump.
///
/// # Example
///
/// ```rust
/// use composable_analytics::{AnalyticsClient, AnalyticsPayload};
/// use std::sync::{Arc, Mutex};
///
/// let received = Arc::new(Mutex::new(Vec::new()));
/// let client = AnalyticsClient::from_fn({
///     let received = Arc::clone(&received);
///     move |payload| received.lock().unwrap().push(payload.clone())
/// });
///
/// client.send("test_event").unwrap();
/// assert_eq!(*received.lock().unwrap(), vec![AnalyticsPayload::event("test_event")]);
/// ```
#[derive(Clone)]
pub struct AnalyticsClient {
    sink: Arc<dyn AnalyticsSink>,
}

impl std::fmt::Debug for AnalyticsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsClient")
            .field("sink", &"<sink>")
            .finish()
    }
}

impl AnalyticsClient {
    /// Wrap any sink.
    pub fn new<S>(sink: S) -> Self
    where
        S: AnalyticsSink + 'static,
    {
        AnalyticsClient {
            sink: Arc::new(sink),
        }
    }

    /// A client from an infallible closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&AnalyticsPayload) + Send + Sync + 'static,
    {
        AnalyticsClient::new(f)
    }

    /// A client from a fallible closure.
    pub fn try_from_fn<F>(f: F) -> Self
    where
        F: Fn(&AnalyticsPayload) -> Result<(), SinkError> + Send + Sync + 'static,
    {
        AnalyticsClient::new(TryFnSink(f))
    }

    /// Prints every payload to stdout.
    pub fn console() -> Self {
        AnalyticsClient::new(ConsoleSink::default())
    }

    /// Discards every payload.
    pub fn noop() -> Self {
        AnalyticsClient::new(NoopSink)
    }

    /// Flags any emission as a missing dependency.
    ///
    /// See [`UnimplementedSink`] for the exact behavior.
    pub fn unimplemented() -> Self {
        AnalyticsClient::new(UnimplementedSink::default())
    }

    /// Broadcast to `clients` in order, continuing past failures.
    ///
    /// Zero clients discard everything; a single client is returned as is.
    ///
    /// ```rust
    /// use composable_analytics::testing::RecordingSink;
    /// use composable_analytics::{AnalyticsClient, AnalyticsPayload};
    ///
    /// let first = RecordingSink::new();
    /// let second = RecordingSink::new();
    /// let merged = AnalyticsClient::merge([first.client(), second.client()]);
    ///
    /// merged.send("merged_event").unwrap();
    /// assert_eq!(first.payloads(), vec![AnalyticsPayload::from("merged_event")]);
    /// assert_eq!(second.payloads(), vec![AnalyticsPayload::from("merged_event")]);
    ///
    /// // Nothing to broadcast to: never fails.
    /// let nobody = AnalyticsClient::merge(Vec::<AnalyticsClient>::new());
    /// assert!(nobody.send(AnalyticsPayload::user_id("u")).is_ok());
    /// ```
    pub fn merge<I>(clients: I) -> Self
    where
        I: IntoIterator<Item = AnalyticsClient>,
    {
        Self::merge_with_policy(FailurePolicy::default(), clients)
    }

    /// Broadcast to `clients` in order, handling failures per `policy`.
    pub fn merge_with_policy<I>(policy: FailurePolicy, clients: I) -> Self
    where
        I: IntoIterator<Item = AnalyticsClient>,
    {
        let mut clients: Vec<AnalyticsClient> = clients.into_iter().collect();
        match clients.len() {
            0 => AnalyticsClient::noop(),
            1 => clients.remove(0),
            _ => AnalyticsClient::new(MergedSink::new(clients).with_policy(policy)),
        }
    }

    /// Emit one payload.
    pub fn emit(&self, payload: &AnalyticsPayload) -> Result<(), SinkError> {
        self.sink.emit(payload)
    }

    /// Emit anything convertible into a payload.
    pub fn send(&self, payload: impl Into<AnalyticsPayload>) -> Result<(), SinkError> {
        self.emit(&payload.into())
    }

    /// True when both handles point at the same sink.
    pub fn ptr_eq(&self, other: &AnalyticsClient) -> bool {
        Arc::ptr_eq(&self.sink, &other.sink)
    }
}

impl AnalyticsSink for AnalyticsClient {
    fn emit(&self, payload: &AnalyticsPayload) -> Result<(), SinkError> {
        self.sink.emit(payload)
    }
}

struct TryFnSink<F>(F);

impl<F> AnalyticsSink for TryFnSink<F>
where
    F: Fn(&AnalyticsPayload) -> Result<(), SinkError> + Send + Sync,
{
    fn emit(&self, payload: &AnalyticsPayload) -> Result<(), SinkError> {
        (self.0)(payload)
    }
}

/// Environments that provide an analytics client.
///
/// Emission tasks call [`analytics`](HasAnalytics::analytics) each time they
/// run, so swapping the environment between dispatches swaps the sink.
///
/// ```rust
/// use composable_analytics::{AnalyticsClient, HasAnalytics};
///
/// #[derive(Clone)]
/// struct AppEnv {
///     analytics: AnalyticsClient,
///     api_base: String,
/// }
///
/// impl HasAnalytics for AppEnv {
///     fn analytics(&self) -> &AnalyticsClient {
///         &self.analytics
///     }
/// }
/// ```
pub trait HasAnalytics {
    /// The client emission tasks should use.
    fn analytics(&self) -> &AnalyticsClient;
}

impl HasAnalytics for AnalyticsClient {
    fn analytics(&self) -> &AnalyticsClient {
        self
    }
}
