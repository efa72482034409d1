//! src/error.rs
use crate::record::GroupKey;

pub fn error_chain_fmt(
    f: &mut std::fmt::Formatter<'_>,
    e: &impl std::error::Error,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// A broken map/shuffle contract. Never caused by bad input rows.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("no partial aggregates were routed to the reducer")]
    NoPartials,
    #[error("aggregate has no absorbed observations")]
    EmptyAggregate,
}

#[derive(thiserror::Error)]
pub enum PipelineError {
    #[error("Failed to read input")]
    Input(#[source] std::io::Error),
    #[error("Failed to write output")]
    Output(#[source] std::io::Error),
    #[error("Output location already exists: {0}")]
    OutputExists(String),
    #[error("Rejected {rejected} records, exceeding the limit of {limit}")]
    TooManyRejections { rejected: u64, limit: u64 },
    #[error("Run was cancelled")]
    Cancelled,
    #[error("Invariant violated while reducing key `{key}`")]
    Invariant {
        key: GroupKey,
        #[source]
        source: InvariantViolation,
    },
    #[error("Failed to build worker pool")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl std::fmt::Debug for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(f, self)
    }
}
