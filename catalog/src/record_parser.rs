use crate::{Entry, LoadWarning, RowParseError, WarningKind, Year, YearExtractor};
use tracing::warn;

/// The three raw cells of one data row, as read from the source
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// 1-based line in the source file
    pub line: u64,
    pub name: String,
    pub release_date: String,
    pub price: String,
}

/// Output of a successful row parse. `warning` is set when the entry was
/// kept with a degraded field.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub entry: Entry,
    pub warning: Option<LoadWarning>,
}

/// Turns raw rows into entries.
///
/// Price is strict: a row without a usable price is rejected. Year is
/// lenient: an unrecognised date becomes `Year::Unknown` and the entry is
/// still returned.
#[derive(Default)]
pub struct RecordParser {
    years: YearExtractor,
}

impl RecordParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extractor(years: YearExtractor) -> Self {
        Self { years }
    }

    pub fn parse(&self, raw: &RawRecord) -> Result<ParsedRecord, RowParseError> {
        let price = parse_price(&raw.price)?;
        let year = self.years.extract(&raw.release_date);

        let warning = match year {
            Year::Known(_) => None,
            Year::Unknown => {
                warn!(
                    line = raw.line,
                    "Could not extract a year from release date '{}'", raw.release_date
                );
                Some(LoadWarning {
                    line: raw.line,
                    kind: WarningKind::UnknownYear,
                    message: format!(
                        "could not extract a year from '{}' (expected {})",
                        raw.release_date,
                        self.years.accepted_examples()
                    ),
                })
            }
        };

        Ok(ParsedRecord {
            entry: Entry {
                name: raw.name.clone(),
                year,
                price,
            },
            warning,
        })
    }
}

/// Coerce a price cell into a finite, non-negative number
pub fn parse_price(raw: &str) -> Result<f64, RowParseError> {
    let trimmed = raw.trim();
    let price: f64 = trimmed.parse().map_err(|_| RowParseError::InvalidPrice {
        value: raw.to_string(),
    })?;

    if !price.is_finite() {
        return Err(RowParseError::NonFinitePrice {
            value: raw.to_string(),
        });
    }
    if price < 0.0 {
        return Err(RowParseError::NegativePrice {
            value: raw.to_string(),
        });
    }

    // -0.0 would otherwise print as "-0.00"
    Ok(price + 0.0)
}
