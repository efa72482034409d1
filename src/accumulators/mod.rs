//! src/accumulators/mod.rs
use crate::error::InvariantViolation;
use std::fmt;

/// Partial aggregate for one key.
///
/// `merge` must be associative and commutative: partial aggregates computed
/// over any partition of the input, merged in any order, have to equal the
/// aggregate computed over the whole input in one pass.
pub trait Accumulator: Clone + fmt::Debug + Send + Sized {
    type Measure;

    fn identity() -> Self;

    fn absorb(&mut self, measure: Self::Measure);

    fn merge(&mut self, other: Self);

    /// Final textual form written to the output sink.
    fn render(&self) -> Result<AggregateResult, InvariantViolation>;
}

/// Rendered result for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateResult(String);

impl AggregateResult {
    pub fn new(rendered: impl Into<String>) -> Self {
        AggregateResult(rendered.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AggregateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

mod rating_stats;
pub use rating_stats::{CodecError, RatingObservation, RatingStats};

mod sum;
pub use sum::{ExactSum, SumAccumulator};
