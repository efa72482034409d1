//! src/accumulators/sum.rs
//!
//! Totals are kept exactly, as a list of non-overlapping partial sums, and
//! only rounded to a double when read. Merging partials therefore gives the
//! same total whatever order or grouping the shards arrive in.
use crate::accumulators::{Accumulator, AggregateResult};
use crate::error::InvariantViolation;
use crate::format::render_double;

/// Exact running sum of doubles, rounded to the nearest double on read.
#[derive(Debug, Clone, Default)]
pub struct ExactSum {
    /// Non-zero, non-overlapping, increasing in magnitude.
    partials: Vec<f64>,
    /// Infinities and NaNs, plus anything that overflowed.
    non_finite: f64,
}

impl ExactSum {
    pub fn new(value: f64) -> Self {
        let mut sum = ExactSum::default();
        sum.add(value);
        sum
    }

    pub fn add(&mut self, value: f64) {
        if !value.is_finite() {
            self.non_finite += value;
            return;
        }
        let mut x = value;
        let mut kept = 0;
        for j in 0..self.partials.len() {
            let mut y = self.partials[j];
            if x.abs() < y.abs() {
                std::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            if !hi.is_finite() {
                self.partials.clear();
                self.non_finite += hi;
                return;
            }
            let lo = y - (hi - x);
            if lo != 0.0 {
                self.partials[kept] = lo;
                kept += 1;
            }
            x = hi;
        }
        self.partials.truncate(kept);
        if x != 0.0 {
            self.partials.push(x);
        }
    }

    pub fn merge(&mut self, other: ExactSum) {
        for partial in other.partials {
            self.add(partial);
        }
        self.non_finite += other.non_finite;
    }

    pub fn total(&self) -> f64 {
        if self.non_finite != 0.0 {
            return self.non_finite;
        }
        let mut remaining = self.partials.iter().rev();
        let Some(&first) = remaining.next() else {
            return 0.0;
        };
        let mut hi = first;
        let mut lo = 0.0;
        for &y in remaining.by_ref() {
            let x = hi;
            hi = x + y;
            lo = y - (hi - x);
            if lo != 0.0 {
                break;
            }
        }
        // Round half to even against the rest of the partials.
        if let Some(&next) = remaining.next().filter(|_| lo != 0.0) {
            if (lo < 0.0 && next < 0.0) || (lo > 0.0 && next > 0.0) {
                let y = lo * 2.0;
                let x = hi + y;
                if y == x - hi {
                    hi = x;
                }
            }
        }
        hi
    }
}

/// Sums compare by value; the same measures absorbed in a different order
/// may leave different partials behind.
impl PartialEq for ExactSum {
    fn eq(&self, other: &Self) -> bool {
        self.total().to_bits() == other.total().to_bits()
    }
}

/// Running total of revenue. Rendered unrounded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SumAccumulator(ExactSum);

impl SumAccumulator {
    pub fn new(total: f64) -> Self {
        SumAccumulator(ExactSum::new(total))
    }

    pub fn total(&self) -> f64 {
        self.0.total()
    }
}

impl Accumulator for SumAccumulator {
    type Measure = f64;

    fn identity() -> Self {
        SumAccumulator::default()
    }

    fn absorb(&mut self, measure: f64) {
        self.0.add(measure);
    }

    fn merge(&mut self, other: Self) {
        self.0.merge(other.0);
    }

    fn render(&self) -> Result<AggregateResult, InvariantViolation> {
        Ok(AggregateResult::new(render_double(self.total())))
    }
}
