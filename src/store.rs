//! Store - owns state, a reducer and an environment, and runs the effects.
//!
//! The store is the imperative shell around the pure reducer: each
//! dispatch mutates the state synchronously, then the returned
//! [`Effects`] run against the environment current at that moment.

use std::future::Future;

use crate::effect::Effects;
use crate::error::EffectError;
use crate::reducer::Reducer;

/// Runtime for a single reducer.
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
/// .analytics(|count, _| Some(AnalyticsPayload::user_property("count", count.to_string())));
///
/// let first = RecordingSink::new();
/// let second = RecordingSink::new();
/// let mut store = Store::new(0, reducer, first.client());
///
/// store.send(()).await.unwrap();
/// store.set_env(second.client());
/// store.send(()).await.unwrap();
///
/// assert_eq!(*store.state(), 2);
/// assert_eq!(first.len(), 1);
/// assert_eq!(second.payloads(), vec![AnalyticsPayload::user_property("count", "2")]);
/// # });
/// ```
pub struct Store<R: Reducer> {
    state: R::State,
    reducer: R,
    env: R::Env,
}

impl<R> std::fmt::Debug for Store<R>
where
    R: Reducer + std::fmt::Debug,
    R::State: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("reducer", &self.reducer)
            .field("env", &"<env>")
            .finish()
    }
}

impl<R: Reducer> Store<R> {
    /// Create a store from an initial state.
    pub fn new(state: R::State, reducer: R, env: R::Env) -> Self {
        Store {
            state,
            reducer,
            env,
        }
    }

    /// The current state.
    pub fn state(&self) -> &R::State {
        &self.state
    }

    /// The environment the next effects will run against.
    pub fn env(&self) -> &R::Env {
        &self.env
    }

    /// Replace the environment and return the previous one.
    ///
    /// Takes effect for every dispatch that follows, including the analytics
    /// sink tasks resolve.
    pub fn set_env(&mut self, env: R::Env) -> R::Env {
        std::mem::replace(&mut self.env, env)
    }

    /// The reducer driving this store.
    pub fn reducer(&self) -> &R {
        &self.reducer
    }

    /// Run the transition for `action` without running its effects.
    pub fn dispatch(&mut self, action: R::Action) -> Effects<R::Env> {
        let effects = self.reducer.reduce(&mut self.state, &action);

        #[cfg(feature = "tracing")]
        tracing::debug!(effects = effects.len(), "store dispatched action");

        effects
    }

    /// Run the transition for `action`, then its effects in order.
    ///
    /// The transition happens immediately; the returned future only runs the
    /// effects, against a snapshot of the current environment. It does not
    /// borrow the store.
    pub fn send(
        &mut self,
        action: R::Action,
    ) -> impl Future<Output = Result<(), EffectError>> + Send + 'static {
        let effects = self.dispatch(action);
        let env = self.env.clone();
        async move { effects.run(&env).await }
    }

    /// Run the transition for `action` and its effects on the tokio runtime.
    ///
    /// Must be called from within a runtime.
    #[cfg(feature = "async")]
    pub fn spawn(&mut self, action: R::Action) -> EffectHandle {
        EffectHandle {
            handle: tokio::spawn(self.send(action)),
        }
    }

    /// Consume the store, returning its state.
    pub fn into_state(self) -> R::State {
        self.state
    }
}

/// Handle to effects started with [`Store::spawn`].
#[cfg(feature = "async")]
#[derive(Debug)]
pub struct EffectHandle {
    handle: tokio::task::JoinHandle<Result<(), EffectError>>,
}

#[cfg(feature = "async")]
impl EffectHandle {
    /// Stop the remaining effects.
    ///
    /// Tasks that already ran are not undone.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// True once every effect has finished or the handle was cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the effects.
    ///
    /// Returns `None` when the effects were cancelled. A panic inside an
    /// effect is resumed on the caller.
    pub async fn join(self) -> Option<Result<(), EffectError>> {
        match self.handle.await {
            Ok(result) => Some(result),
            Err(err) if err.is_cancelled() => None,
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        }
    }
}
