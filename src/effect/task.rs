//! Task - one deferred, side-effecting unit of work.

use std::borrow::Cow;
use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::EffectError;
use crate::payload::AnalyticsPayload;
use crate::sink::HasAnalytics;

type TaskFn<Env> = Box<dyn FnOnce(Env) -> BoxFuture<'static, Result<(), EffectError>> + Send>;

/// A type-erased unit of work scheduled by a reducer.
///
/// A task receives the environment only when it runs. Dependencies such as
/// the analytics sink are therefore looked up per run, never captured when
/// the task is built.
///
/// Running a task clones the environment into the task's future so that the
/// future is `'static`. Keep environments cheap to clone (`Arc` inside).
///
/// # Example
///
/// ```rust
/// use composable_analytics::effect::Task;
///
/// # tokio_test::block_on(async {
/// let task = Task::<u32>::fire_and_forget("log", |env| async move {
///     assert_eq!(env, 7);
/// });
///
/// assert_eq!(task.label(), "log");
/// assert!(task.run(&7).await.is_ok());
/// # });
/// ```
pub struct Task<Env> {
    label: Cow<'static, str>,
    run_fn: TaskFn<Env>,
}

impl<Env> std::fmt::Debug for Task<Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("label", &self.label)
            .field("run_fn", &"<function>")
            .finish()
    }
}

impl<Env> Task<Env> {
    /// The task's label, used in logs and errors.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<Env> Task<Env>
where
    Env: Clone + Send + Sync + 'static,
{
    /// Create a task from an async function of the environment.
    pub fn new<F, Fut>(label: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: FnOnce(Env) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), EffectError>> + Send + 'static,
    {
        Task {
            label: label.into(),
            run_fn: Box::new(move |env: Env| f(env).boxed()),
        }
    }

    /// Create a task from a synchronous function of the environment.
    pub fn from_fn<F>(label: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: FnOnce(&Env) -> Result<(), EffectError> + Send + 'static,
    {
        Task::new(label, move |env: Env| async move { f(&env) })
    }

    /// Create an infallible task.
    pub fn fire_and_forget<F, Fut>(label: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: FnOnce(Env) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Task::new(label, move |env: Env| f(env).map(Ok))
    }

    /// Run the task against `env`.
    pub fn run(self, env: &Env) -> BoxFuture<'static, Result<(), EffectError>> {
        (self.run_fn)(env.clone())
    }

    /// Run this task inside a tracing span.
    #[cfg(feature = "tracing")]
    pub fn instrument(self, span: tracing::Span) -> Self {
        use tracing::Instrument as _;

        let Task { label, run_fn } = self;
        Task {
            label,
            run_fn: Box::new(move |env: Env| run_fn(env).instrument(span).boxed()),
        }
    }
}

impl<Env> Task<Env>
where
    Env: HasAnalytics + Clone + Send + Sync + 'static,
{
    /// Label carried by emission tasks.
    pub const EMIT_LABEL: &'static str = "analytics.emit";

    /// A task that emits `payload` to the environment's analytics sink.
    ///
    /// The sink is resolved when the task runs.
    ///
    /// ```rust
    /// use composable_analytics::effect::Task;
    /// use composable_analytics::testing::RecordingSink;
    /// use composable_analytics::AnalyticsPayload;
    ///
    /// # tokio_test::block_on(async {
    /// let recorder = RecordingSink::new();
    /// let task = Task::emit(AnalyticsPayload::screen("Home"));
    ///
    /// task.run(&recorder.client()).await.unwrap();
    /// assert_eq!(recorder.payloads(), vec![AnalyticsPayload::screen("Home")]);
    /// # });
    /// ```
    pub fn emit(payload: AnalyticsPayload) -> Self {
        Task::from_fn(Self::EMIT_LABEL, move |env: &Env| {
            env.analytics().emit(&payload).map_err(EffectError::from)
        })
    }
}
