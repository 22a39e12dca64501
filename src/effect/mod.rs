//! Deferred work returned by reducers.
//!
//! A reducer mutates state synchronously and describes any follow-up work as
//! an [`Effects`] value: an ordered sequence of [`Task`]s. The store runs the
//! tasks after the transition, handing each one the environment.
//!
//! Keeping work as values lets interceptors append emission tasks after the
//! base reducer's tasks without running anything themselves:
//!
//! ```rust
//! use composable_analytics::effect::{Effects, Task};
//! use composable_analytics::AnalyticsClient;
//!
//! let base: Effects<AnalyticsClient> =
//!     Effects::task(Task::fire_and_forget("save", |_env| async {}));
//!
//! let with_analytics = base.concat(Effects::emit("saved".into()));
//! assert_eq!(with_analytics.labels(), vec!["save", "analytics.emit"]);
//! ```

mod effects;
mod task;

pub use effects::Effects;
pub use task::Task;
