//! Central year-format registration module
//!
//! Formats are tried in the order returned here and the first one that
//! yields a year wins. To support another release-date shape:
//! 1. Create the format file (e.g., iso_date_format.rs) implementing `YearFormat`
//! 2. Export it in lib.rs
//! 3. Add it to `all_year_formats()` below, after the ones it must not shadow

use crate::base_format::YearFormat;
use crate::{MonthDayYear, MonthYear};
use tracing::debug;

/// Returns the built-in formats in priority order.
pub fn all_year_formats() -> Vec<Box<dyn YearFormat>> {
    debug!("Initializing year format collection");

    vec![
        Box::new(MonthDayYear) as Box<dyn YearFormat>,
        Box::new(MonthYear) as Box<dyn YearFormat>,
    ]
}

/// Build an ordered format list from format values.
///
/// ```rust,ignore
/// let formats = year_formats![MonthDayYear, MonthYear];
/// ```
#[macro_export]
macro_rules! year_formats {
    ($($format:expr),* $(,)?) => {
        vec![
            $(Box::new($format) as Box<dyn $crate::base_format::YearFormat>),*
        ]
    };
}
