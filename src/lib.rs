//! # Composable Analytics
//!
//! Analytics as a reducer concern: wrap any reducer and turn its state
//! transitions into analytics payloads, without touching the reducer itself.
//!
//! ## Philosophy
//!
//! The crate follows the **pure core, imperative shell** split:
//! - **Core** = reducers and the derivation functions given to interceptors
//!   (pure, synchronous, side-effect free)
//! - **Shell** = [`Effects`](effect::Effects) returned from the core and run
//!   by a [`Store`] against an environment that provides the sink
//!
//! Derivation happens inside the reducer call, right after the base
//! transition. Emission is deferred: each payload becomes one task appended
//! after the base reducer's own effects.
//!
//! ## Quick Example
//!
//! ```rust
//! use composable_analytics::prelude::*;
//! use composable_analytics::testing::RecordingSink;
//!
//! #[derive(Default)]
//! struct Counter {
//!     count: i32,
//! }
//!
//! enum Action {
//!     Increment,
//!     Opened,
//! }
//!
//! # tokio_test::block_on(async {
//! let reducer = Reduce::new(|state: &mut Counter, action: &Action| -> Effects<AnalyticsClient> {
//!     if let Action::Increment = action {
//!         state.count += 1;
//!     }
//!     Effects::none()
//! })
//! .multiple_analytics(|_, action| match action {
//!     Action::Opened => Some(vec![AnalyticsPayload::screen("counter")]),
//!     Action::Increment => None,
//! })
//! .analytics_on_change(
//!     |state: &Counter| state.count,
//!     |old, new| {
//!         AnalyticsPayload::event_with(
//!             "count_changed",
//!             [("old_value", old.to_string()), ("new_value", new.to_string())],
//!         )
//!     },
//! );
//!
//! let recorder = RecordingSink::new();
//! let mut store = Store::new(Counter::default(), reducer, recorder.client());
//!
//! store.send(Action::Opened).await.unwrap();
//! store.send(Action::Increment).await.unwrap();
//!
//! assert_eq!(
//!     recorder.payloads(),
//!     vec![
//!         AnalyticsPayload::screen("counter"),
//!         AnalyticsPayload::event_with("count_changed", [("old_value", "0"), ("new_value", "1")]),
//!     ]
//! );
//! # });
//! ```
//!
//! ## Features
//!
//! - `async` - [`Store::spawn`] on the tokio runtime
//! - `tracing` - structured logs, `TracingSink`, `Task::instrument`
//! - `serde` - `Serialize`/`Deserialize` for payloads
//! - `proptest` - `Arbitrary` for payloads

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod effect;
pub mod error;
pub mod interceptor;
pub mod payload;
pub mod reducer;
pub mod sink;
pub mod store;
pub mod testing;

// Re-exports
pub use error::{EffectError, SinkError};
pub use payload::{AnalyticsPayload, ErrorPayload, Properties};
pub use reducer::{Reduce, Reducer, ReducerExt};
pub use sink::{AnalyticsClient, AnalyticsSink, HasAnalytics};
#[cfg(feature = "async")]
pub use store::EffectHandle;
pub use store::Store;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::effect::{Effects, Task};
    pub use crate::error::{EffectError, SinkError};
    pub use crate::payload::AnalyticsPayload;
    pub use crate::reducer::{Reduce, Reducer, ReducerExt};
    pub use crate::sink::{AnalyticsClient, AnalyticsSink, HasAnalytics};
    pub use crate::store::Store;
}
