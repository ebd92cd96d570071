use crate::base_format::YearFormat;
use crate::formats::all_year_formats;
use crate::Year;
use tracing::{debug, trace};

/// YearExtractor - tries each registered format in order, first success wins
pub struct YearExtractor {
    formats: Vec<Box<dyn YearFormat>>,
}

impl YearExtractor {
    /// Create an extractor with the built-in formats from `formats::all_year_formats()`
    pub fn new() -> Self {
        Self::with_formats(all_year_formats())
    }

    pub fn with_formats(formats: Vec<Box<dyn YearFormat>>) -> Self {
        debug!(
            "Year formats: {}",
            formats.iter().map(|f| f.name()).collect::<Vec<_>>().join(", ")
        );
        Self { formats }
    }

    /// Register an extra format. It is tried after every format already present.
    pub fn register(&mut self, format: Box<dyn YearFormat>) {
        debug!("Registering year format: {}", format.name());
        self.formats.push(format);
    }

    pub fn format_names(&self) -> Vec<&'static str> {
        self.formats.iter().map(|f| f.name()).collect()
    }

    /// Examples of every accepted shape, joined for warning messages
    pub fn accepted_examples(&self) -> String {
        self.formats
            .iter()
            .map(|f| format!("'{}'", f.example()))
            .collect::<Vec<_>>()
            .join(" or ")
    }

    pub fn extract(&self, raw: &str) -> Year {
        for format in &self.formats {
            if let Some(year) = format.extract(raw) {
                trace!("'{}' matched {} -> {}", raw, format.name(), year);
                return Year::Known(year);
            }
        }

        Year::Unknown
    }
}

impl Default for YearExtractor {
    fn default() -> Self {
        Self::new()
    }
}
