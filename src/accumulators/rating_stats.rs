//! src/accumulators/rating_stats.rs
use crate::accumulators::{Accumulator, AggregateResult, ExactSum};
use crate::error::InvariantViolation;
use crate::format::round_half_up;
use std::fmt;
use std::str::FromStr;

pub const HIGH_RATING_THRESHOLD: f64 = 4.5;
pub const ENCODED_LEN: usize = 16;

/// One rated product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingObservation {
    pub rating: f64,
    pub highly_rated: bool,
}

impl RatingObservation {
    pub fn new(rating: f64) -> Self {
        RatingObservation {
            rating,
            highly_rated: rating >= HIGH_RATING_THRESHOLD,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CodecError {
    #[error("expected {ENCODED_LEN} bytes, found {0}")]
    Length(usize),
    #[error("expected three comma separated components: {0:?}")]
    Components(String),
    #[error("invalid component {0:?}")]
    Component(String),
}

/// Per-store rating statistics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RatingStats {
    total_products: u32,
    highly_rated_products: u32,
    total_rating_sum: ExactSum,
}

impl RatingStats {
    pub fn new(total_products: u32, highly_rated_products: u32, total_rating_sum: f64) -> Self {
        RatingStats {
            total_products,
            highly_rated_products,
            total_rating_sum: ExactSum::new(total_rating_sum),
        }
    }

    pub fn total_products(&self) -> u32 {
        self.total_products
    }

    pub fn highly_rated_products(&self) -> u32 {
        self.highly_rated_products
    }

    pub fn total_rating_sum(&self) -> f64 {
        self.total_rating_sum.total()
    }

    pub fn average_rating(&self) -> Option<f64> {
        (self.total_products > 0).then(|| self.total_rating_sum() / self.total_products as f64)
    }

    pub fn percentage_highly_rated(&self) -> Option<f64> {
        (self.total_products > 0)
            .then(|| self.highly_rated_products as f64 / self.total_products as f64 * 100.0)
    }

    /// Big-endian `total_products`, `highly_rated_products`, `total_rating_sum`.
    pub fn to_bytes(&self) -> [u8; ENCODED_LEN] {
        let mut buf = [0u8; ENCODED_LEN];
        buf[..4].copy_from_slice(&self.total_products.to_be_bytes());
        buf[4..8].copy_from_slice(&self.highly_rated_products.to_be_bytes());
        buf[8..].copy_from_slice(&self.total_rating_sum().to_be_bytes());
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let bytes: &[u8; ENCODED_LEN] = bytes
            .try_into()
            .map_err(|_| CodecError::Length(bytes.len()))?;
        let mut total = [0u8; 4];
        let mut high = [0u8; 4];
        let mut sum = [0u8; 8];
        total.copy_from_slice(&bytes[..4]);
        high.copy_from_slice(&bytes[4..8]);
        sum.copy_from_slice(&bytes[8..]);
        Ok(RatingStats {
            total_products: u32::from_be_bytes(total),
            highly_rated_products: u32::from_be_bytes(high),
            total_rating_sum: ExactSum::new(f64::from_be_bytes(sum)),
        })
    }
}

impl Accumulator for RatingStats {
    type Measure = RatingObservation;

    fn identity() -> Self {
        RatingStats::default()
    }

    fn absorb(&mut self, measure: RatingObservation) {
        self.total_products += 1;
        if measure.highly_rated {
            self.highly_rated_products += 1;
        }
        self.total_rating_sum.add(measure.rating);
    }

    fn merge(&mut self, other: Self) {
        self.total_products += other.total_products;
        self.highly_rated_products += other.highly_rated_products;
        self.total_rating_sum.merge(other.total_rating_sum);
    }

    fn render(&self) -> Result<AggregateResult, InvariantViolation> {
        let (Some(average), Some(percentage)) =
            (self.average_rating(), self.percentage_highly_rated())
        else {
            return Err(InvariantViolation::EmptyAggregate);
        };
        Ok(AggregateResult::new(format!(
            "Highly Rated Products: {} ({}%) | Average Rating: {} | Total Products: {}",
            self.highly_rated_products,
            round_half_up(percentage, 1),
            round_half_up(average, 2),
            self.total_products,
        )))
    }
}

/// Compact text form, `total,high,sum`.
impl fmt::Display for RatingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{:?}",
            self.total_products,
            self.highly_rated_products,
            self.total_rating_sum()
        )
    }
}

impl FromStr for RatingStats {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(',').collect();
        let [total, high, sum] = parts.as_slice() else {
            return Err(CodecError::Components(s.to_string()));
        };
        let component = |value: &str| CodecError::Component(value.to_string());
        Ok(RatingStats {
            total_products: total.parse().map_err(|_| component(*total))?,
            highly_rated_products: high.parse().map_err(|_| component(*high))?,
            total_rating_sum: ExactSum::new(sum.parse().map_err(|_| component(*sum))?),
        })
    }
}
