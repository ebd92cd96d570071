/// Base trait that every release-date format implements
pub trait YearFormat: Send + Sync {
    /// Returns the name of this format (e.g., "month-day-year")
    fn name(&self) -> &'static str;

    /// Example of a date this format understands, for diagnostics
    fn example(&self) -> &'static str;

    /// Pull the year out of a raw release-date cell.
    /// Returns `None` when the cell is not in this format.
    fn extract(&self, raw: &str) -> Option<i32>;
}

/// Parse a bare integer token as a plausible (positive) year
pub fn parse_year_token(token: &str) -> Option<i32> {
    token.trim().parse::<i32>().ok().filter(|year| *year > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year_token() {
        assert_eq!(parse_year_token(" 2008 "), Some(2008));
        assert_eq!(parse_year_token("0"), None);
        assert_eq!(parse_year_token("-1999"), None);
        assert_eq!(parse_year_token("20o8"), None);
        assert_eq!(parse_year_token(""), None);
    }
}
