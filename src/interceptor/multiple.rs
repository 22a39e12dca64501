//! MultiEventInterceptor - derive any number of payloads per action.

use crate::effect::Effects;
use crate::payload::AnalyticsPayload;
use crate::reducer::Reducer;
use crate::sink::HasAnalytics;

/// Wraps a reducer and emits the payloads derived from each transition.
///
/// After the base reducer has processed an action, `derive` is called with
/// the resulting state and the action:
///
/// - `None` leaves the base effects untouched;
/// - `Some(payloads)` appends one emission task per payload, in order, after
///   the base effects. An empty vector appends nothing.
///
/// Created by [`ReducerExt::multiple_analytics`](crate::reducer::ReducerExt::multiple_analytics).
///
/// # Example
///
/// ```rust
/// use composable_analytics::prelude::*;
/// use composable_analytics::testing::RecordingSink;
///
/// # tokio_test::block_on(async {
/// let reducer = Reduce::new(|count: &mut u32, _: &()| -> Effects<AnalyticsClient> {
///     *count += 1;
///     Effects::none()
/// })
/// .multiple_analytics(|count, _| {
///     Some(vec![
///         AnalyticsPayload::event("tick"),
///         AnalyticsPayload::user_property("ticks", count.to_string()),
///     ])
/// });
///
/// let recorder = RecordingSink::new();
/// let mut store = Store::new(0, reducer, recorder.client());
/// store.send(()).await.unwrap();
///
/// assert_eq!(
///     recorder.payloads(),
///     vec![AnalyticsPayload::event("tick"), AnalyticsPayload::user_property("ticks", "1")]
/// );
/// # });
/// ```
pub struct MultiEventInterceptor<R, F> {
    base: R,
    derive: F,
}

impl<R, F> std::fmt::Debug for MultiEventInterceptor<R, F>
where
    R: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiEventInterceptor")
            .field("base", &self.base)
            .field("derive", &"<function>")
            .finish()
    }
}

impl<R, F> MultiEventInterceptor<R, F>
where
    R: Reducer,
    F: Fn(&R::State, &R::Action) -> Option<Vec<AnalyticsPayload>> + Send + Sync,
{
    /// Wrap `base`, deriving payloads with `derive`.
    pub fn new(base: R, derive: F) -> Self {
        MultiEventInterceptor { base, derive }
    }

    /// The wrapped reducer.
    pub fn base(&self) -> &R {
        &self.base
    }
}

impl<R, F> Reducer for MultiEventInterceptor<R, F>
where
    R: Reducer,
    R::Env: HasAnalytics,
    F: Fn(&R::State, &R::Action) -> Option<Vec<AnalyticsPayload>> + Send + Sync,
{
    type State = R::State;
    type Action = R::Action;
    type Env = R::Env;

    fn reduce(&self, state: &mut Self::State, action: &Self::Action) -> Effects<Self::Env> {
        let effects = self.base.reduce(state, action);

        let Some(payloads) = (self.derive)(state, action) else {
            return effects;
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            emissions = payloads.len(),
            "multiple analytics derived payloads"
        );

        effects.concat(Effects::emit_all(payloads))
    }
}
