//! src/extractors/rating.rs
use crate::accumulators::RatingObservation;
use crate::extractors::{Extraction, FieldExtractor, SkipReason};
use crate::record::{GroupKey, ParsedRecord, Rejection};

/// Placeholders meaning "not rated yet" rather than a zero rating.
const MISSING_RATINGS: [&str; 3] = ["", "0", "0.0"];

#[derive(Debug, Clone, Copy, Default)]
pub struct RatingExtractor;

impl FieldExtractor for RatingExtractor {
    type Measure = RatingObservation;

    fn name(&self) -> &'static str {
        "store_ratings"
    }

    fn extract(&self, record: &ParsedRecord<'_>) -> Result<Extraction<RatingObservation>, Rejection> {
        if MISSING_RATINGS.contains(&record.rating_text()) {
            return Ok(Extraction::Skip(SkipReason::MissingRating));
        }
        let rating = record.rating()?;
        Ok(Extraction::Emit(
            GroupKey::from(record.store_name()),
            RatingObservation::new(rating),
        ))
    }
}
