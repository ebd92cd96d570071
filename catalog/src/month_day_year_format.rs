use crate::base_format::{parse_year_token, YearFormat};

/// "Month Day, Year" dates, e.g. "Oct 21, 2008".
///
/// Takes whatever follows the last comma; that segment must be a bare
/// integer. A cell without any comma is treated as a single segment, so a
/// lone "2008" also matches.
pub struct MonthDayYear;

impl YearFormat for MonthDayYear {
    fn name(&self) -> &'static str {
        "month-day-year"
    }

    fn example(&self) -> &'static str {
        "Oct 21, 2008"
    }

    fn extract(&self, raw: &str) -> Option<i32> {
        let tail = raw.rsplit(',').next()?;
        parse_year_token(tail)
    }
}
