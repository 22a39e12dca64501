//! Analytics sinks.
//!
//! A sink consumes payloads one at a time. Everything in this module is
//! reached through the single-operation [`AnalyticsSink`] trait, so sinks
//! compose freely:
//!
//! ```rust
//! use composable_analytics::sink::{ConsoleSink, NoopSink};
//! use composable_analytics::testing::RecordingSink;
//! use composable_analytics::{AnalyticsClient, AnalyticsPayload};
//!
//! let recorder = RecordingSink::new();
//! let client = AnalyticsClient::merge([
//!     AnalyticsClient::new(ConsoleSink::default()),
//!     AnalyticsClient::new(NoopSink),
//!     recorder.client(),
//! ]);
//!
//! client.send(AnalyticsPayload::screen("Settings")).unwrap();
//! assert_eq!(recorder.payloads(), vec![AnalyticsPayload::screen("Settings")]);
//! ```
//!
//! # Module Structure
//!
//! - [`AnalyticsSink`] - the emit capability, implemented by closures
//! - [`AnalyticsClient`] - cloneable handle carried by environments
//! - [`HasAnalytics`] - how emission tasks find the client
//! - [`MergedSink`], [`FailurePolicy`] - fan-out to several sinks
//! - [`ConsoleSink`], [`NoopSink`], [`UnimplementedSink`] - stock sinks

mod client;
mod console;
mod merge;
mod noop;
mod trait_def;
#[cfg(feature = "tracing")]
mod tracing;
mod unimplemented;

pub use client::{AnalyticsClient, HasAnalytics};
pub use console::ConsoleSink;
pub use merge::{FailurePolicy, MergedSink};
pub use noop::NoopSink;
pub use trait_def::AnalyticsSink;
pub use unimplemented::UnimplementedSink;

#[cfg(feature = "tracing")]
pub use self::tracing::TracingSink;
