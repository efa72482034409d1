//! src/record.rs
//!
//! Line level parsing of listing exports. Lines are split on a plain
//! delimiter; quoted fields containing the delimiter are not supported.
use std::fmt;

pub const DELIMITER: char = ',';
pub const MIN_FIELDS: usize = 15;
pub const HEADER_SIGNATURE: &str = "id,storeId";
const SOLD_MARKER: &str = "sold";

/// Aggregation bucket. Compared by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn new(key: impl Into<String>) -> Self {
        GroupKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupKey {
    fn from(key: &str) -> Self {
        GroupKey(key.to_string())
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Columns the jobs read from a listing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    StoreName,
    Rating,
    Sold,
    Price,
    CategoryName,
}

impl Field {
    pub fn column(&self) -> usize {
        match self {
            Field::StoreName => 2,
            Field::Rating => 4,
            Field::Sold => 8,
            Field::Price => 9,
            Field::CategoryName => 14,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Field::StoreName => "store_name",
            Field::Rating => "rating",
            Field::Sold => "sold",
            Field::Price => "price",
            Field::CategoryName => "category_name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a line did not make it to an extractor.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("header line")]
    Header,
    #[error("expected at least {required} fields, found {found}")]
    TooFewFields { found: usize, required: usize },
    #[error("field `{field}` is not a valid number: {value:?}")]
    InvalidNumber { field: Field, value: String },
}

#[derive(Debug, Clone)]
pub struct RecordParser {
    delimiter: char,
    min_fields: usize,
    header_signature: String,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new(DELIMITER, MIN_FIELDS, HEADER_SIGNATURE)
    }
}

impl RecordParser {
    pub fn new(delimiter: char, min_fields: usize, header_signature: &str) -> Self {
        RecordParser {
            delimiter,
            min_fields,
            header_signature: header_signature.to_string(),
        }
    }

    /// Header detection only applies to the very first line of the input.
    pub fn parse<'a>(&self, line: &'a str, line_index: usize) -> Result<ParsedRecord<'a>, Rejection> {
        if line_index == 0 && line.contains(&self.header_signature) {
            return Err(Rejection::Header);
        }
        let fields: Vec<&str> = line.split(self.delimiter).collect();
        if fields.len() < self.min_fields {
            return Err(Rejection::TooFewFields {
                found: fields.len(),
                required: self.min_fields,
            });
        }
        Ok(ParsedRecord { fields })
    }
}

/// Typed view over a row with at least the minimum field count. Numeric
/// accessors validate lazily so only the columns a job reads can reject it.
#[derive(Debug, Clone)]
pub struct ParsedRecord<'a> {
    fields: Vec<&'a str>,
}

impl<'a> ParsedRecord<'a> {
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn text(&self, field: Field) -> &'a str {
        self.fields
            .get(field.column())
            .map(|value| value.trim())
            .unwrap_or_default()
    }

    pub fn store_name(&self) -> &'a str {
        self.text(Field::StoreName)
    }

    pub fn category_name(&self) -> &'a str {
        self.text(Field::CategoryName)
    }

    pub fn price(&self) -> Result<f64, Rejection> {
        parse_decimal(Field::Price, self.text(Field::Price))
    }

    /// Parses `"<n> sold"`. A value without the marker counts as no sales.
    pub fn sold_count(&self) -> Result<i64, Rejection> {
        let raw = self.text(Field::Sold);
        if !raw.contains(SOLD_MARKER) {
            return Ok(0);
        }
        parse_number(Field::Sold, raw.replace(SOLD_MARKER, "").trim())
    }

    pub fn rating_text(&self) -> &'a str {
        self.text(Field::Rating)
    }

    pub fn rating(&self) -> Result<f64, Rejection> {
        parse_decimal(Field::Rating, self.rating_text())
    }
}

fn parse_number<T: std::str::FromStr>(field: Field, value: &str) -> Result<T, Rejection> {
    value.parse::<T>().map_err(|_| Rejection::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Like `parse_number`, but `inf` and `NaN` spellings are not numbers here.
fn parse_decimal(field: Field, value: &str) -> Result<f64, Rejection> {
    match parse_number::<f64>(field, value)? {
        parsed if parsed.is_finite() => Ok(parsed),
        _ => Err(Rejection::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}
