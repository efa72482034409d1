//! src/reducer.rs
use crate::accumulators::{Accumulator, AggregateResult};
use crate::error::{InvariantViolation, PipelineError};
use crate::record::GroupKey;

/// Merges every partial aggregate of a key into one.
pub fn merge_partials<A: Accumulator>(partials: impl IntoIterator<Item = A>) -> Result<A, InvariantViolation> {
    let mut partials = partials.into_iter();
    let mut total = partials.next().ok_or(InvariantViolation::NoPartials)?;
    for partial in partials {
        total.merge(partial);
    }
    Ok(total)
}

/// Reduce phase for one key: merge, then render.
#[tracing::instrument(name = "Reduce key", skip_all, fields(key = %key))]
pub fn reduce<A: Accumulator>(
    key: &GroupKey,
    partials: impl IntoIterator<Item = A>,
) -> Result<AggregateResult, PipelineError> {
    merge_partials(partials)
        .and_then(|total| total.render())
        .map_err(|source| PipelineError::Invariant {
            key: key.clone(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulators::{RatingObservation, RatingStats, SumAccumulator};
    use claims::{assert_err, assert_matches, assert_ok};

    #[test]
    fn should_merge_partials_from_every_shard() {
        let key = GroupKey::from("Shoes");
        let partials = vec![
            SumAccumulator::new(200.0),
            SumAccumulator::new(100.0),
            SumAccumulator::new(0.5),
        ];
        let result = assert_ok!(reduce(&key, partials));
        assert_eq!(result.as_str(), "300.5");
    }

    #[test]
    fn should_render_store_summaries() {
        let key = GroupKey::from("Acme");
        let mut first = RatingStats::identity();
        first.absorb(RatingObservation::new(4.8));
        let mut second = RatingStats::identity();
        second.absorb(RatingObservation::new(4.2));

        let result = assert_ok!(reduce(&key, vec![first, second]));
        assert_eq!(
            result.as_str(),
            "Highly Rated Products: 1 (50%) | Average Rating: 4.5 | Total Products: 2"
        );
    }

    #[test]
    fn a_key_without_partials_should_violate_the_invariant() {
        let error = assert_err!(reduce(&GroupKey::from("Ghost"), Vec::<SumAccumulator>::new()));
        assert_matches!(
            error,
            PipelineError::Invariant {
                source: InvariantViolation::NoPartials,
                ..
            }
        );
    }

    #[test]
    fn a_key_with_only_empty_partials_should_violate_the_invariant() {
        let partials = vec![RatingStats::identity(), RatingStats::identity()];
        let error = assert_err!(reduce(&GroupKey::from("Ghost"), partials));
        assert_matches!(
            error,
            PipelineError::Invariant {
                source: InvariantViolation::EmptyAggregate,
                ..
            }
        );
    }
}
