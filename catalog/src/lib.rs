// Catalog crate: loads catalog exports (name, release date, price) and
// answers free/paid share, busiest release year and most expensive entry

pub mod types;
pub mod base_format;
pub mod year_extractor;
pub mod formats;

// Release-date formats
pub mod month_day_year_format;
pub mod month_year_format;

pub mod record_parser;
pub mod loader;
pub mod aggregator;
pub mod report;

// Re-export main types
pub use types::*;
pub use base_format::YearFormat;
pub use year_extractor::YearExtractor;
pub use month_day_year_format::MonthDayYear;
pub use month_year_format::MonthYear;
pub use record_parser::{ParsedRecord, RawRecord, RecordParser};
pub use loader::{ColumnMapping, DatasetLoader, LoaderConfig};
pub use aggregator::{
    free_paid_ratio, most_expensive, peak_release_year, Aggregate, Analyzer, FreePaidRatio,
    NoData, PeakYear,
};
pub use report::AnalysisReport;

/// Load `path` with the default settings
pub fn load(path: impl AsRef<std::path::Path>) -> Result<LoadReport, LoadError> {
    DatasetLoader::new().load(path)
}
