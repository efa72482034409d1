//! src/executors/parallel.rs
use crate::error::PipelineError;
use crate::executors::Executor;
use rayon::prelude::*;

/// Fixed size worker pool. Tasks share nothing but what the closure borrows.
pub struct ParallelExecutor {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl ParallelExecutor {
    pub fn new(workers: usize) -> Result<Self, PipelineError> {
        let workers = workers.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("aggregate-worker-{index}"))
            .build()?;
        Ok(ParallelExecutor { pool, workers })
    }

}

impl Executor for ParallelExecutor {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn parallelism(&self) -> usize {
        self.workers
    }

    fn execute<T, R, F>(&self, tasks: Vec<T>, task: F) -> Result<Vec<R>, PipelineError>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> Result<R, PipelineError> + Send + Sync,
    {
        self.pool
            .install(|| tasks.into_par_iter().map(&task).collect())
    }
}
