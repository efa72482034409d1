//! src/executors/mod.rs
use crate::error::PipelineError;

/// Runs a batch of independent tasks and returns their results in task
/// order. The first failing task fails the batch.
pub trait Executor {
    fn name(&self) -> &'static str;

    /// How many tasks can make progress at once.
    fn parallelism(&self) -> usize;

    fn execute<T, R, F>(&self, tasks: Vec<T>, task: F) -> Result<Vec<R>, PipelineError>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> Result<R, PipelineError> + Send + Sync;
}

mod parallel;
pub use parallel::ParallelExecutor;

mod sequential;
pub use sequential::SequentialExecutor;
