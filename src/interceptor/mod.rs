//! Reducer wrappers that turn transitions into analytics.
//!
//! Each interceptor owns the reducer it wraps and calls its `reduce` exactly
//! once per action. Derivation always happens after the base transition and
//! before any emission runs, and emission tasks are always appended after
//! the base reducer's own effects.
//!
//! - [`AnalyticsInterceptor`] - at most one payload per action
//! - [`MultiEventInterceptor`] - any number of payloads per action
//! - [`ChangeInterceptor`] - one payload when a projected value changes

mod analytics;
mod multiple;
mod on_change;

pub use analytics::AnalyticsInterceptor;
pub use multiple::MultiEventInterceptor;
pub use on_change::ChangeInterceptor;
