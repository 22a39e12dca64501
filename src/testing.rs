//! Testing utilities for reducers with analytics.
//!
//! This module provides sinks that record or fail on purpose, a [`TestStore`]
//! that checks every state transition against an expected mutation,
//! assertion macros over recorded payloads, and property-based testing
//! support.
//!
//! # Examples
//!
//! ## Recording emissions
//!
//! ```rust
//! use composable_analytics::testing::RecordingSink;
//! use composable_analytics::{assert_emitted, AnalyticsPayload};
//!
//! let recorder = RecordingSink::new();
//! let client = recorder.client();
//!
//! client.send("tap").unwrap();
//! client.send(AnalyticsPayload::screen("Home")).unwrap();
//!
//! assert_emitted!(recorder, ["tap", AnalyticsPayload::screen("Home")]);
//! ```
//!
//! ## Exhaustive state assertions
//!
//! ```rust
//! use composable_analytics::prelude::*;
//! use composable_analytics::testing::TestStore;
//!
//! # tokio_test::block_on(async {
//! let reducer = Reduce::new(|count: &mut i32, _: &()| -> Effects<AnalyticsClient> {
//!     *count += 1;
//!     Effects::none()
//! })
//! .analytics(|_, _| Some("incremented".into()));
//!
//! let mut store = TestStore::recording(0, reducer, |analytics| analytics);
//!
//! store.send((), |count| *count = 1).await;
//! assert_eq!(store.recorded(), vec![AnalyticsPayload::event("incremented")]);
//! # });
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::SinkError;
use crate::payload::AnalyticsPayload;
use crate::reducer::Reducer;
use crate::sink::{AnalyticsClient, AnalyticsSink};
use crate::store::Store;

/// A sink that keeps every payload it receives, in order.
///
/// Clones share the same buffer, so keep one clone for assertions and hand
/// [`client`](RecordingSink::client) to the code under test.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    payloads: Arc<Mutex<Vec<AnalyticsPayload>>>,
}

impl RecordingSink {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A client emitting into this recorder.
    pub fn client(&self) -> AnalyticsClient {
        AnalyticsClient::new(self.clone())
    }

    /// Every payload received so far.
    pub fn payloads(&self) -> Vec<AnalyticsPayload> {
        self.lock().clone()
    }

    /// Number of payloads received.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when nothing was received.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forget everything received so far.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AnalyticsPayload>> {
        self.payloads.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AnalyticsSink for RecordingSink {
    fn emit(&self, payload: &AnalyticsPayload) -> Result<(), SinkError> {
        self.lock().push(payload.clone());
        Ok(())
    }
}

/// A sink that rejects every payload.
///
/// Clones share the call counter.
///
/// ```rust
/// use composable_analytics::testing::FailingSink;
/// use composable_analytics::AnalyticsClient;
///
/// let failing = FailingSink::new("remote");
/// let client = AnalyticsClient::new(failing.clone());
///
/// assert!(client.send("tap").is_err());
/// assert_eq!(failing.calls(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FailingSink {
    name: String,
    calls: Arc<AtomicUsize>,
}

impl FailingSink {
    /// A failing sink reporting itself as `name`.
    pub fn new(name: impl Into<String>) -> Self {
        FailingSink {
            name: name.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many payloads reached this sink.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AnalyticsSink for FailingSink {
    fn emit(&self, payload: &AnalyticsPayload) -> Result<(), SinkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SinkError::rejected(
            self.name.clone(),
            format!("refused {}", payload),
        ))
    }
}

/// A [`Store`] that asserts every transition.
///
/// Each [`send`](TestStore::send) applies the caller's expected mutation to a
/// copy of the previous state and panics if the reducer produced anything
/// else, or if an effect failed.
pub struct TestStore<R: Reducer> {
    store: Store<R>,
    recorder: Option<RecordingSink>,
}

impl<R> Debug for TestStore<R>
where
    R: Reducer,
    R::State: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestStore")
            .field("state", self.store.state())
            .field("recorder", &self.recorder)
            .finish()
    }
}

impl<R> TestStore<R>
where
    R: Reducer,
    R::State: Clone + PartialEq + Debug,
{
    /// A test store running effects against `env`.
    pub fn new(state: R::State, reducer: R, env: R::Env) -> Self {
        TestStore {
            store: Store::new(state, reducer, env),
            recorder: None,
        }
    }

    /// A test store whose analytics go to a fresh [`RecordingSink`].
    ///
    /// `make_env` builds the environment around the recording client.
    pub fn recording<F>(state: R::State, reducer: R, make_env: F) -> Self
    where
        F: FnOnce(AnalyticsClient) -> R::Env,
    {
        let recorder = RecordingSink::new();
        TestStore {
            store: Store::new(state, reducer, make_env(recorder.client())),
            recorder: Some(recorder),
        }
    }

    /// Send `action` and assert the new state equals the old state after
    /// `update`.
    pub async fn send<F>(&mut self, action: R::Action, update: F)
    where
        F: FnOnce(&mut R::State),
    {
        let mut expected = self.store.state().clone();
        update(&mut expected);

        let result = self.store.send(action).await;

        assert_eq!(
            self.store.state(),
            &expected,
            "State after send differs from the expected mutation"
        );
        if let Err(err) = result {
            panic!("Effects failed: {}", err);
        }
    }

    /// Send `action` and assert the state did not change.
    pub async fn send_unchanged(&mut self, action: R::Action) {
        self.send(action, |_| {}).await;
    }

    /// The current state.
    pub fn state(&self) -> &R::State {
        self.store.state()
    }

    /// Replace the environment for later sends.
    pub fn set_env(&mut self, env: R::Env) -> R::Env {
        self.store.set_env(env)
    }

    /// The recorder installed by [`recording`](TestStore::recording).
    pub fn recorder(&self) -> Option<&RecordingSink> {
        self.recorder.as_ref()
    }

    /// Payloads recorded so far.
    ///
    /// # Panics
    ///
    /// When the store was not built with [`recording`](TestStore::recording).
    pub fn recorded(&self) -> Vec<AnalyticsPayload> {
        match &self.recorder {
            Some(recorder) => recorder.payloads(),
            None => panic!("TestStore was not built with TestStore::recording"),
        }
    }

    /// Consume the test store, returning the underlying store.
    pub fn into_store(self) -> Store<R> {
        self.store
    }
}

/// Assert that a recorder received exactly the given payloads, in order.
///
/// Each expected item goes through `AnalyticsPayload::from`, so bare event
/// names work.
///
/// # Example
///
/// ```rust
/// use composable_analytics::testing::RecordingSink;
/// use composable_analytics::{assert_emitted, AnalyticsPayload};
///
/// let recorder = RecordingSink::new();
/// recorder.client().send("first_event").unwrap();
///
/// assert_emitted!(recorder, ["first_event"]);
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($recorder:expr, [$($payload:expr),* $(,)?]) => {{
        let expected: ::std::vec::Vec<$crate::AnalyticsPayload> =
            ::std::vec![$($crate::AnalyticsPayload::from($payload)),*];
        let actual = $recorder.payloads();
        if actual != expected {
            panic!("Expected payloads {:?}, got {:?}", expected, actual);
        }
    }};
}

/// Assert that a recorder received nothing.
///
/// # Example
///
/// ```rust
/// use composable_analytics::assert_nothing_emitted;
/// use composable_analytics::testing::RecordingSink;
///
/// let recorder = RecordingSink::new();
/// assert_nothing_emitted!(recorder);
/// ```
#[macro_export]
macro_rules! assert_nothing_emitted {
    ($recorder:expr) => {{
        let actual = $recorder.payloads();
        if !actual.is_empty() {
            panic!("Expected no payloads, got {:?}", actual);
        }
    }};
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl Arbitrary for AnalyticsPayload {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let name = "[a-z][a-z_]{0,15}";
        let value = "[a-zA-Z0-9 ]{0,12}";

        prop_oneof![
            (name, prop::collection::btree_map(name, value, 0..4)).prop_map(
                |(name, properties)| AnalyticsPayload::Event { name, properties }
            ),
            name.prop_map(|name: String| AnalyticsPayload::screen(name)),
            value.prop_map(|id: String| AnalyticsPayload::user_id(id)),
            (name, value).prop_map(|(name, value): (String, String)| {
                AnalyticsPayload::user_property(name, value)
            }),
            value.prop_map(|message: String| AnalyticsPayload::error_message(message)),
        ]
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Effects;
    use crate::reducer::{Reduce, ReducerExt};

    fn counter() -> impl Reducer<State = i32, Action = i32, Env = AnalyticsClient> {
        Reduce::new(|count: &mut i32, delta: &i32| -> Effects<AnalyticsClient> {
            *count += delta;
            Effects::none()
        })
        .analytics(|_, delta| (*delta != 0).then(|| AnalyticsPayload::event("changed")))
    }

    #[test]
    fn recording_sink_keeps_order_and_clears() {
        let recorder = RecordingSink::new();
        let client = recorder.client();

        client.send("a").unwrap();
        client.send("b").unwrap();
        assert_eq!(recorder.payloads(), vec!["a".into(), "b".into()]);

        recorder.clear();
        assert!(recorder.is_empty());
    }

    #[test]
    fn recording_sink_clones_share_buffer() {
        let recorder = RecordingSink::new();
        let clone = recorder.clone();

        clone.client().send("shared").unwrap();

        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn failing_sink_counts_and_rejects() {
        let failing = FailingSink::new("remote");

        let err = failing.emit(&"tap".into()).unwrap_err();

        assert_eq!(failing.calls(), 1);
        assert!(matches!(err, SinkError::Rejected { ref sink, .. } if sink == "remote"));
    }

    #[test]
    fn assert_emitted_macro() {
        let recorder = RecordingSink::new();
        recorder.client().send("first_event").unwrap();
        recorder
            .client()
            .send(AnalyticsPayload::screen("test_screen"))
            .unwrap();

        assert_emitted!(recorder, ["first_event", AnalyticsPayload::screen("test_screen")]);
    }

    #[test]
    #[should_panic(expected = "Expected payloads")]
    fn assert_emitted_panics_on_mismatch() {
        let recorder = RecordingSink::new();
        recorder.client().send("other").unwrap();

        assert_emitted!(recorder, ["expected"]);
    }

    #[test]
    #[should_panic(expected = "Expected no payloads")]
    fn assert_nothing_emitted_panics_on_payload() {
        let recorder = RecordingSink::new();
        recorder.client().send("tap").unwrap();

        assert_nothing_emitted!(recorder);
    }

    #[tokio::test]
    async fn test_store_checks_expected_state() {
        let mut store = TestStore::recording(0, counter(), |analytics| analytics);

        store.send(2, |count| *count = 2).await;
        store.send_unchanged(0).await;

        assert_eq!(*store.state(), 2);
        assert_eq!(store.recorded(), vec![AnalyticsPayload::event("changed")]);
    }

    #[tokio::test]
    #[should_panic(expected = "State after send differs")]
    async fn test_store_panics_on_unexpected_state() {
        let mut store = TestStore::recording(0, counter(), |analytics| analytics);

        store.send(1, |count| *count = 2).await;
    }

    #[tokio::test]
    #[should_panic(expected = "Effects failed")]
    async fn test_store_panics_on_effect_failure() {
        let mut store = TestStore::new(0, counter(), AnalyticsClient::new(FailingSink::new("x")));

        store.send(1, |count| *count = 1).await;
    }

    #[test]
    #[should_panic(expected = "not built with TestStore::recording")]
    fn recorded_requires_recording_store() {
        let store = TestStore::new(0, counter(), AnalyticsClient::noop());
        store.recorded();
    }

    #[cfg(feature = "proptest")]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn arbitrary_payloads_have_a_known_kind(payload in any::<AnalyticsPayload>()) {
                prop_assert!(
                    ["event", "screen", "user_id", "user_property", "error"].contains(&payload.kind())
                );
                prop_assert!(!payload.to_string().is_empty());
            }
        }
    }
}
