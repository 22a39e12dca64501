//! Reducer trait definition.

use crate::effect::Effects;

/// A state transition function.
///
/// `reduce` mutates `state` in place for `action` and returns the work to
/// perform afterwards. Interceptors implement this trait too, which is what
/// lets them wrap any reducer, including other interceptors.
///
/// # Type Parameters
///
/// * `State` - The state being transitioned
/// * `Action` - The input driving a transition
/// * `Env` - The environment handed to tasks when they run
///
/// # Example
///
/// ```rust
/// use composable_analytics::effect::Effects;
/// use composable_analytics::{AnalyticsClient, Reducer};
///
/// struct Counter;
///
/// enum CounterAction {
///     Increment,
///     Reset,
/// }
///
/// impl Reducer for Counter {
///     type State = i64;
///     type Action = CounterAction;
///     type Env = AnalyticsClient;
///
///     fn reduce(&self, state: &mut i64, action: &CounterAction) -> Effects<AnalyticsClient> {
///         match action {
///             CounterAction::Increment => *state += 1,
///             CounterAction::Reset => *state = 0,
///         }
///         Effects::none()
///     }
/// }
///
/// let mut count = 0;
/// Counter.reduce(&mut count, &CounterAction::Increment);
/// assert_eq!(count, 1);
/// ```
pub trait Reducer: Send + Sync {
    /// The state being transitioned.
    type State;

    /// The input driving a transition.
    type Action;

    /// The environment handed to tasks when they run.
    ///
    /// Must be `Clone` because each task receives its own copy.
    type Env: Clone + Send + Sync + 'static;

    /// Transition `state` for `action` and describe the follow-up work.
    fn reduce(&self, state: &mut Self::State, action: &Self::Action) -> Effects<Self::Env>;
}

impl<R> Reducer for Box<R>
where
    R: Reducer + ?Sized,
{
    type State = R::State;
    type Action = R::Action;
    type Env = R::Env;

    fn reduce(&self, state: &mut Self::State, action: &Self::Action) -> Effects<Self::Env> {
        (**self).reduce(state, action)
    }
}

impl<R> Reducer for std::sync::Arc<R>
where
    R: Reducer + ?Sized,
{
    type State = R::State;
    type Action = R::Action;
    type Env = R::Env;

    fn reduce(&self, state: &mut Self::State, action: &Self::Action) -> Effects<Self::Env> {
        (**self).reduce(state, action)
    }
}

/// A boxed reducer, for storing reducers of different concrete types.
pub type BoxedReducer<S, A, Env> = Box<dyn Reducer<State = S, Action = A, Env = Env>>;
