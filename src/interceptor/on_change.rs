//! ChangeInterceptor - emit when a projected value changes.

use std::marker::PhantomData;

use crate::effect::Effects;
use crate::payload::AnalyticsPayload;
use crate::reducer::Reducer;
use crate::sink::HasAnalytics;

/// Wraps a reducer and emits one payload whenever a projection of the state
/// changes across a transition.
///
/// For each action:
///
/// 1. `old = to_value(state)` is read before delegating;
/// 2. the base reducer runs;
/// 3. `new = to_value(state)` is read after the base has finished;
/// 4. if `is_duplicate(&old, &new)` the base effects are returned untouched,
///    otherwise `to_payload(old, new)` is emitted after them.
///
/// Stacking change interceptors nests them: the outermost reads its `old`
/// first and its `new` last, so every layer compares against the state it
/// saw before the whole inner chain ran.
///
/// Created by [`ReducerExt::analytics_on_change`](crate::reducer::ReducerExt::analytics_on_change)
/// and [`ReducerExt::analytics_on_change_by`](crate::reducer::ReducerExt::analytics_on_change_by).
///
/// # Example
///
/// ```rust
/// use composable_analytics::prelude::*;
/// use composable_analytics::testing::RecordingSink;
///
/// # tokio_test::block_on(async {
/// let reducer = Reduce::new(|name: &mut String, new: &String| -> Effects<AnalyticsClient> {
///     *name = new.clone();
///     Effects::none()
/// })
/// .analytics_on_change(
///     |name: &String| name.len(),
///     |old, new| AnalyticsPayload::event_with("name_length_changed", [
///         ("old_value", old.to_string()),
///         ("new_value", new.to_string()),
///     ]),
/// );
///
/// let recorder = RecordingSink::new();
/// let mut store = Store::new(String::from("Ann"), reducer, recorder.client());
///
/// store.send(String::from("Bob")).await.unwrap();
/// assert!(recorder.is_empty());
///
/// store.send(String::from("Alice")).await.unwrap();
/// assert_eq!(
///     recorder.payloads(),
///     vec![AnalyticsPayload::event_with("name_length_changed", [
///         ("old_value", "3"),
///         ("new_value", "5"),
///     ])]
/// );
/// # });
/// ```
pub struct ChangeInterceptor<R, V, P, D, F> {
    base: R,
    to_value: P,
    is_duplicate: D,
    to_payload: F,
    _value: PhantomData<fn() -> V>,
}

impl<R, V, P, D, F> std::fmt::Debug for ChangeInterceptor<R, V, P, D, F>
where
    R: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeInterceptor")
            .field("base", &self.base)
            .field("to_value", &"<function>")
            .field("is_duplicate", &"<function>")
            .field("to_payload", &"<function>")
            .finish()
    }
}

impl<R, V, P, D, F> ChangeInterceptor<R, V, P, D, F>
where
    R: Reducer,
    P: Fn(&R::State) -> V + Send + Sync,
    D: Fn(&V, &V) -> bool + Send + Sync,
    F: Fn(V, V) -> AnalyticsPayload + Send + Sync,
{
    /// Wrap `base`, comparing projections with `is_duplicate`.
    pub fn new(base: R, to_value: P, is_duplicate: D, to_payload: F) -> Self {
        ChangeInterceptor {
            base,
            to_value,
            is_duplicate,
            to_payload,
            _value: PhantomData,
        }
    }

    /// The wrapped reducer.
    pub fn base(&self) -> &R {
        &self.base
    }
}

impl<R, V, P, D, F> Reducer for ChangeInterceptor<R, V, P, D, F>
where
    R: Reducer,
    R::Env: HasAnalytics,
    P: Fn(&R::State) -> V + Send + Sync,
    D: Fn(&V, &V) -> bool + Send + Sync,
    F: Fn(V, V) -> AnalyticsPayload + Send + Sync,
{
    type State = R::State;
    type Action = R::Action;
    type Env = R::Env;

    fn reduce(&self, state: &mut Self::State, action: &Self::Action) -> Effects<Self::Env> {
        let old_value = (self.to_value)(state);
        let effects = self.base.reduce(state, action);
        let new_value = (self.to_value)(state);

        if (self.is_duplicate)(&old_value, &new_value) {
            return effects;
        }

        let payload = (self.to_payload)(old_value, new_value);

        #[cfg(feature = "tracing")]
        tracing::debug!(kind = payload.kind(), "analytics on change derived payload");

        effects.concat(Effects::emit(payload))
    }
}
