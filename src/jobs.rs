//! src/jobs.rs
use crate::accumulators::{RatingStats, SumAccumulator};
use crate::extractors::{RatingExtractor, RevenueExtractor};
use crate::pipeline::Pipeline;

pub type CategoryRevenueJob = Pipeline<RevenueExtractor, SumAccumulator>;
pub type StoreRatingsJob = Pipeline<RatingExtractor, RatingStats>;

/// Total revenue per product category.
pub fn category_revenue() -> CategoryRevenueJob {
    Pipeline::new(RevenueExtractor)
}

/// Rating summary per store.
pub fn store_ratings() -> StoreRatingsJob {
    Pipeline::new(RatingExtractor)
}
