//! Effects - the ordered task sequence returned by a reducer.

use crate::effect::task::Task;
use crate::error::EffectError;
use crate::payload::AnalyticsPayload;
use crate::sink::HasAnalytics;

/// The ordered sequence of tasks produced by one reducer call.
///
/// Order is part of the contract: tasks are enqueued in the order they were
/// added and [`run`](Effects::run) executes them in that order. Interceptors
/// append their emission tasks after the base reducer's tasks.
///
/// # Example
///
/// ```rust
/// use composable_analytics::effect::{Effects, Task};
/// use composable_analytics::testing::RecordingSink;
/// use composable_analytics::{AnalyticsClient, AnalyticsPayload};
///
/// # tokio_test::block_on(async {
/// let recorder = RecordingSink::new();
///
/// let effects = Effects::<AnalyticsClient>::none()
///     .concat(Effects::emit_all(vec!["first".into(), "second".into()]))
///     .concat(Effects::emit(AnalyticsPayload::screen("done")));
///
/// assert_eq!(effects.len(), 3);
/// effects.run(&recorder.client()).await.unwrap();
///
/// assert_eq!(
///     recorder.payloads(),
///     vec!["first".into(), "second".into(), AnalyticsPayload::screen("done")]
/// );
/// # });
/// ```
pub struct Effects<Env> {
    tasks: Vec<Task<Env>>,
}

impl<Env> std::fmt::Debug for Effects<Env> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.tasks.iter().map(Task::label))
            .finish()
    }
}

impl<Env> Default for Effects<Env> {
    fn default() -> Self {
        Self::none()
    }
}

impl<Env> Effects<Env> {
    /// No effects.
    pub fn none() -> Self {
        Effects { tasks: Vec::new() }
    }

    /// A sequence holding a single task.
    pub fn task(task: Task<Env>) -> Self {
        Effects { tasks: vec![task] }
    }

    /// Append `task` to the end of the sequence.
    pub fn push(&mut self, task: Task<Env>) {
        self.tasks.push(task);
    }

    /// Sequence `other` after `self`.
    pub fn concat(mut self, other: Effects<Env>) -> Self {
        self.tasks.extend(other.tasks);
        self
    }

    /// Number of enqueued tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when no task is enqueued.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Task labels in enqueue order.
    pub fn labels(&self) -> Vec<&str> {
        self.tasks.iter().map(Task::label).collect()
    }

    /// Take the tasks out of the sequence.
    pub fn into_tasks(self) -> Vec<Task<Env>> {
        self.tasks
    }
}

impl<Env> Effects<Env>
where
    Env: Clone + Send + Sync + 'static,
{
    /// Run every task in enqueue order.
    ///
    /// A failing task does not stop the tasks after it; all failures are
    /// returned together once the sequence is exhausted.
    pub async fn run(self, env: &Env) -> Result<(), EffectError> {
        let mut failures = Vec::new();

        for task in self.tasks {
            let label = task.label().to_owned();

            if let Err(err) = task.run(env).await {
                #[cfg(feature = "tracing")]
                tracing::warn!(task = %label, error = %err, "effect task failed");
                #[cfg(not(feature = "tracing"))]
                eprintln!("effect task '{}' failed: {}", label, err);
                failures.push(err);
            }
        }

        EffectError::aggregate(failures)
    }
}

impl<Env> Effects<Env>
where
    Env: HasAnalytics + Clone + Send + Sync + 'static,
{
    /// A single emission task for `payload`.
    pub fn emit(payload: AnalyticsPayload) -> Self {
        Effects::task(Task::emit(payload))
    }

    /// One emission task per payload, preserving order.
    pub fn emit_all<I>(payloads: I) -> Self
    where
        I: IntoIterator<Item = AnalyticsPayload>,
    {
        payloads.into_iter().map(Task::emit).collect()
    }
}

impl<Env> FromIterator<Task<Env>> for Effects<Env> {
    fn from_iter<I: IntoIterator<Item = Task<Env>>>(iter: I) -> Self {
        Effects {
            tasks: iter.into_iter().collect(),
        }
    }
}

impl<Env> Extend<Task<Env>> for Effects<Env> {
    fn extend<I: IntoIterator<Item = Task<Env>>>(&mut self, iter: I) {
        self.tasks.extend(iter);
    }
}

impl<Env> IntoIterator for Effects<Env> {
    type Item = Task<Env>;
    type IntoIter = std::vec::IntoIter<Task<Env>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.into_iter()
    }
}

impl<Env> From<Task<Env>> for Effects<Env> {
    fn from(task: Task<Env>) -> Self {
        Effects::task(task)
    }
}
