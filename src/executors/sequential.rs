//! src/executors/sequential.rs
use crate::error::PipelineError;
use crate::executors::Executor;

#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn parallelism(&self) -> usize {
        1
    }

    fn execute<T, R, F>(&self, tasks: Vec<T>, task: F) -> Result<Vec<R>, PipelineError>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> Result<R, PipelineError> + Send + Sync,
    {
        tasks.into_iter().map(task).collect()
    }
}
