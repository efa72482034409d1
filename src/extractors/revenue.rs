//! src/extractors/revenue.rs
use crate::extractors::{Extraction, FieldExtractor, SkipReason};
use crate::record::{GroupKey, ParsedRecord, Rejection};

/// Revenue per category: `price * sold`, only for rows with at least one sale.
#[derive(Debug, Clone, Copy, Default)]
pub struct RevenueExtractor;

impl FieldExtractor for RevenueExtractor {
    type Measure = f64;

    fn name(&self) -> &'static str {
        "category_revenue"
    }

    fn extract(&self, record: &ParsedRecord<'_>) -> Result<Extraction<f64>, Rejection> {
        let category = record.category_name();
        let sold = record.sold_count()?;
        let price = record.price()?;
        if sold <= 0 {
            return Ok(Extraction::Skip(SkipReason::NoSales));
        }
        Ok(Extraction::Emit(GroupKey::from(category), price * sold as f64))
    }
}
