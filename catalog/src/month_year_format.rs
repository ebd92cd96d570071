use crate::base_format::{parse_year_token, YearFormat};

/// "Month Year" dates, e.g. "May 2020". The last whitespace-separated
/// token must be the year.
pub struct MonthYear;

impl YearFormat for MonthYear {
    fn name(&self) -> &'static str {
        "month-year"
    }

    fn example(&self) -> &'static str {
        "May 2020"
    }

    fn extract(&self, raw: &str) -> Option<i32> {
        let last = raw.split_whitespace().next_back()?;
        parse_year_token(last)
    }
}
