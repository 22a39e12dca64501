//! Reducers: state transitions that describe their follow-up work.
//!
//! - [`Reducer`] - the transition trait every layer implements
//! - [`Reduce`] - a reducer built from a closure
//! - [`ReducerExt`] - builder methods wrapping reducers in interceptors

mod ext;
mod reduce;
mod trait_def;

pub use ext::{ReducerExt, ValueEq};
pub use reduce::Reduce;
pub use trait_def::{BoxedReducer, Reducer};
