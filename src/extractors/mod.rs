//! src/extractors/mod.rs
use crate::record::{GroupKey, ParsedRecord, Rejection};
use std::fmt;

/// Job specific projection of a row onto a key and a measure.
pub trait FieldExtractor: Send + Sync {
    type Measure;

    fn name(&self) -> &'static str;

    fn extract(&self, record: &ParsedRecord<'_>) -> Result<Extraction<Self::Measure>, Rejection>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Extraction<M> {
    Emit(GroupKey, M),
    /// Valid row that the job deliberately leaves out.
    Skip(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoSales,
    MissingRating,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoSales => f.write_str("no sales"),
            SkipReason::MissingRating => f.write_str("missing rating"),
        }
    }
}

mod rating;
pub use rating::RatingExtractor;

mod revenue;
pub use revenue::RevenueExtractor;
