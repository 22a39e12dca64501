//! AnalyticsInterceptor - derive at most one payload per action.

use crate::effect::Effects;
use crate::payload::AnalyticsPayload;
use crate::reducer::Reducer;
use crate::sink::HasAnalytics;

/// Wraps a reducer and emits the payload derived from each transition.
///
/// The single-payload form of
/// [`MultiEventInterceptor`](crate::interceptor::MultiEventInterceptor):
/// `derive` sees the post-transition state and the action and returns
/// `Some(payload)` to emit or `None` to stay silent.
///
/// Created by [`ReducerExt::analytics`](crate::reducer::ReducerExt::analytics).
pub struct AnalyticsInterceptor<R, F> {
    base: R,
    derive: F,
}

impl<R, F> std::fmt::Debug for AnalyticsInterceptor<R, F>
where
    R: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsInterceptor")
            .field("base", &self.base)
            .field("derive", &"<function>")
            .finish()
    }
}

impl<R, F> AnalyticsInterceptor<R, F>
where
    R: Reducer,
    F: Fn(&R::State, &R::Action) -> Option<AnalyticsPayload> + Send + Sync,
{
    /// Wrap `base`, deriving a payload with `derive`.
    pub fn new(base: R, derive: F) -> Self {
        AnalyticsInterceptor { base, derive }
    }

    /// The wrapped reducer.
    pub fn base(&self) -> &R {
        &self.base
    }
}

impl<R, F> Reducer for AnalyticsInterceptor<R, F>
where
    R: Reducer,
    R::Env: HasAnalytics,
    F: Fn(&R::State, &R::Action) -> Option<AnalyticsPayload> + Send + Sync,
{
    type State = R::State;
    type Action = R::Action;
    type Env = R::Env;

    fn reduce(&self, state: &mut Self::State, action: &Self::Action) -> Effects<Self::Env> {
        let effects = self.base.reduce(state, action);

        match (self.derive)(state, action) {
            Some(payload) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(kind = payload.kind(), "analytics derived payload");

                effects.concat(Effects::emit(payload))
            }
            None => effects,
        }
    }
}
