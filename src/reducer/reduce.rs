//! Reduce - a reducer built from a closure.

use std::marker::PhantomData;

use crate::effect::Effects;
use crate::reducer::trait_def::Reducer;

/// A reducer backed by a closure.
///
/// # Example
///
/// ```rust
/// use composable_analytics::effect::Effects;
/// use composable_analytics::{AnalyticsClient, Reduce, Reducer};
///
/// let counter = Reduce::new(|count: &mut i32, delta: &i32| -> Effects<AnalyticsClient> {
///     *count += delta;
///     Effects::none()
/// });
///
/// let mut count = 1;
/// counter.reduce(&mut count, &4);
/// assert_eq!(count, 5);
/// ```
pub struct Reduce<S, A, Env, F> {
    f: F,
    _phantom: PhantomData<fn() -> (S, A, Env)>,
}

impl<S, A, Env, F> std::fmt::Debug for Reduce<S, A, Env, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reduce").field("f", &"<function>").finish()
    }
}

impl<S, A, Env, F> Reduce<S, A, Env, F>
where
    F: Fn(&mut S, &A) -> Effects<Env> + Send + Sync,
{
    /// Wrap a transition closure.
    pub fn new(f: F) -> Self {
        Reduce {
            f,
            _phantom: PhantomData,
        }
    }
}

impl<S, A, Env, F> Reducer for Reduce<S, A, Env, F>
where
    F: Fn(&mut S, &A) -> Effects<Env> + Send + Sync,
    Env: Clone + Send + Sync + 'static,
{
    type State = S;
    type Action = A;
    type Env = Env;

    fn reduce(&self, state: &mut S, action: &A) -> Effects<Env> {
        (self.f)(state, action)
    }
}
