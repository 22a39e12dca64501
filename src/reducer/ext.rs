//! Extension trait attaching analytics to any reducer.

use crate::interceptor::{AnalyticsInterceptor, ChangeInterceptor, MultiEventInterceptor};
use crate::payload::AnalyticsPayload;
use crate::reducer::trait_def::{BoxedReducer, Reducer};

/// Equality predicate used by [`ReducerExt::analytics_on_change`].
pub type ValueEq<V> = fn(&V, &V) -> bool;

/// Builder methods for wrapping reducers in interceptors.
///
/// Automatically implemented for every [`Reducer`]. Calls chain, each one
/// wrapping everything before it:
///
/// ```rust
/// use composable_analytics::prelude::*;
///
/// #[derive(Default)]
/// struct Form {
///     name: String,
///     submitted: bool,
/// }
///
/// enum FormAction {
///     SetName(String),
///     Submit,
/// }
///
/// let form = Reduce::new(|form: &mut Form, action: &FormAction| -> Effects<AnalyticsClient> {
///     match action {
///         FormAction::SetName(name) => form.name = name.clone(),
///         FormAction::Submit => form.submitted = true,
///     }
///     Effects::none()
/// })
/// .analytics(|_, action| match action {
///     FormAction::Submit => Some("form_submitted".into()),
///     FormAction::SetName(_) => None,
/// })
/// .analytics_on_change(
///     |form: &Form| form.name.clone(),
///     |old, new| {
///         AnalyticsPayload::event_with("name_changed", [("old_value", old), ("new_value", new)])
///     },
/// );
///
/// let mut state = Form::default();
/// let effects = form.reduce(&mut state, &FormAction::SetName("Ada".into()));
/// assert_eq!(effects.len(), 1);
/// ```
pub trait ReducerExt: Reducer {
    /// Emit at most one payload per action.
    ///
    /// `derive` receives the state after the transition and the action.
    fn analytics<F>(self, derive: F) -> AnalyticsInterceptor<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::State, &Self::Action) -> Option<AnalyticsPayload> + Send + Sync,
    {
        AnalyticsInterceptor::new(self, derive)
    }

    /// Emit any number of payloads per action, in order.
    ///
    /// `None` and an empty vector both emit nothing.
    fn multiple_analytics<F>(self, derive: F) -> MultiEventInterceptor<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::State, &Self::Action) -> Option<Vec<AnalyticsPayload>> + Send + Sync,
    {
        MultiEventInterceptor::new(self, derive)
    }

    /// Emit one payload whenever `to_value` changes, compared with `==`.
    fn analytics_on_change<V, P, F>(
        self,
        to_value: P,
        to_payload: F,
    ) -> ChangeInterceptor<Self, V, P, ValueEq<V>, F>
    where
        Self: Sized,
        V: PartialEq,
        P: Fn(&Self::State) -> V + Send + Sync,
        F: Fn(V, V) -> AnalyticsPayload + Send + Sync,
    {
        ChangeInterceptor::new(self, to_value, V::eq as ValueEq<V>, to_payload)
    }

    /// Emit one payload whenever `to_value` changes according to
    /// `is_duplicate`.
    ///
    /// `is_duplicate(old, new)` returning `true` suppresses the emission.
    fn analytics_on_change_by<V, P, D, F>(
        self,
        to_value: P,
        is_duplicate: D,
        to_payload: F,
    ) -> ChangeInterceptor<Self, V, P, D, F>
    where
        Self: Sized,
        P: Fn(&Self::State) -> V + Send + Sync,
        D: Fn(&V, &V) -> bool + Send + Sync,
        F: Fn(V, V) -> AnalyticsPayload + Send + Sync,
    {
        ChangeInterceptor::new(self, to_value, is_duplicate, to_payload)
    }

    /// Erase the reducer's concrete type.
    fn boxed(self) -> BoxedReducer<Self::State, Self::Action, Self::Env>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl<R: Reducer> ReducerExt for R {}
