//! Error types for sinks and effect execution.
//!
//! Interceptors never produce errors of their own: derivation and comparison
//! are infallible closures. Errors only arise when emission tasks run and a
//! sink refuses a payload, or when a base reducer's task fails. Failures are
//! aggregated rather than short-circuited, so one bad sink or task cannot
//! silence the ones after it.
//!
//! # Examples
//!
//! ```
//! use composable_analytics::SinkError;
//!
//! assert!(SinkError::aggregate(vec![]).is_ok());
//!
//! let err = SinkError::aggregate(vec![
//!     SinkError::rejected("network", "offline"),
//!     SinkError::rejected("disk", "full"),
//! ])
//! .unwrap_err();
//! assert_eq!(err.failure_count(), 2);
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// An error reported by an [`AnalyticsSink`](crate::sink::AnalyticsSink).
#[derive(Debug, Clone)]
pub enum SinkError {
    /// An unimplemented sink was asked to emit a payload.
    Unimplemented {
        /// Description of the payload that reached the sink.
        payload: String,
    },
    /// The sink refused the payload.
    Rejected {
        /// Name of the refusing sink.
        sink: String,
        /// Why the payload was refused.
        reason: String,
    },
    /// The sink failed with an underlying error.
    Failed(Arc<dyn StdError + Send + Sync>),
    /// Several sinks of a merged sink failed.
    Multiple(Vec<SinkError>),
}

impl SinkError {
    /// A refusal by the named sink.
    pub fn rejected(sink: impl Into<String>, reason: impl Into<String>) -> Self {
        SinkError::Rejected {
            sink: sink.into(),
            reason: reason.into(),
        }
    }

    /// Wrap an underlying error.
    pub fn failed<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        SinkError::Failed(Arc::new(error))
    }

    /// Fold collected failures into a single result.
    ///
    /// No failures is `Ok`, one failure is returned as is, several become
    /// [`SinkError::Multiple`] in the order they were collected.
    pub fn aggregate(mut errors: Vec<SinkError>) -> Result<(), SinkError> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(SinkError::Multiple(errors)),
        }
    }

    /// Number of individual failures represented by this error.
    pub fn failure_count(&self) -> usize {
        match self {
            SinkError::Multiple(errors) => errors.iter().map(SinkError::failure_count).sum(),
            _ => 1,
        }
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Unimplemented { payload } => {
                write!(f, "unimplemented analytics sink received: {}", payload)
            }
            SinkError::Rejected { sink, reason } => {
                write!(f, "sink '{}' rejected payload: {}", sink, reason)
            }
            SinkError::Failed(error) => write!(f, "sink failed: {}", error),
            SinkError::Multiple(errors) => {
                write!(f, "{} sinks failed", errors.len())?;
                for error in errors {
                    write!(f, "\n  -> {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl StdError for SinkError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            SinkError::Failed(error) => Some(&**error),
            _ => None,
        }
    }
}

/// An error reported while running an [`Effects`](crate::effect::Effects) sequence.
#[derive(Debug, Clone)]
pub enum EffectError {
    /// An emission task's sink failed.
    Sink(SinkError),
    /// A base reducer task failed.
    Task {
        /// Label of the failing task.
        label: String,
        /// The underlying error.
        source: Arc<dyn StdError + Send + Sync>,
    },
    /// Several tasks failed.
    Multiple(Vec<EffectError>),
}

impl EffectError {
    /// A failure of the task labelled `label`.
    pub fn task<E>(label: impl Into<String>, error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        EffectError::Task {
            label: label.into(),
            source: Arc::new(error),
        }
    }

    /// Fold collected failures into a single result.
    pub fn aggregate(mut errors: Vec<EffectError>) -> Result<(), EffectError> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(EffectError::Multiple(errors)),
        }
    }

    /// Flatten nested [`EffectError::Multiple`] into individual failures.
    pub fn into_failures(self) -> Vec<EffectError> {
        match self {
            EffectError::Multiple(errors) => errors
                .into_iter()
                .flat_map(EffectError::into_failures)
                .collect(),
            other => vec![other],
        }
    }
}

impl From<SinkError> for EffectError {
    fn from(error: SinkError) -> Self {
        EffectError::Sink(error)
    }
}

impl fmt::Display for EffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectError::Sink(error) => write!(f, "analytics emission failed: {}", error),
            EffectError::Task { label, source } => {
                write!(f, "task '{}' failed: {}", label, source)
            }
            EffectError::Multiple(errors) => {
                write!(f, "{} effects failed", errors.len())?;
                for error in errors {
                    write!(f, "\n  -> {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl StdError for EffectError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            EffectError::Sink(error) => Some(error),
            EffectError::Task { source, .. } => Some(&**source),
            EffectError::Multiple(_) => None,
        }
    }
}
