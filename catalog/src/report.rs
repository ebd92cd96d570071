use crate::aggregator::{
    free_paid_ratio, most_expensive, peak_release_year, Aggregate, Analyzer, FreePaidRatio,
    NoData, PeakYear,
};
use crate::{Entry, LoadReport};
use serde::Serialize;
use std::fmt;

/// All three answers for one dataset, ready to serialize or print
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub entry_count: usize,
    pub warning_count: usize,
    pub free_paid: FreePaidRatio,
    pub peak_year: Aggregate<PeakYear>,
    pub most_expensive: Aggregate<Entry>,
}

impl AnalysisReport {
    pub fn from_entries(entries: &[Entry], warning_count: usize) -> Self {
        Self {
            entry_count: entries.len(),
            warning_count,
            free_paid: free_paid_ratio(entries),
            peak_year: peak_release_year(entries),
            most_expensive: most_expensive(entries).map(Entry::clone),
        }
    }

    pub fn from_load(report: &LoadReport) -> Self {
        Self::from_entries(report.dataset.entries(), report.warnings.len())
    }

    pub fn from_analyzer(analyzer: &Analyzer) -> Self {
        Self {
            entry_count: analyzer.dataset().map_or(0, |d| d.len()),
            warning_count: analyzer.warning_count(),
            free_paid: analyzer.free_paid_ratio(),
            peak_year: analyzer.peak_release_year(),
            most_expensive: analyzer.most_expensive().map(Entry::clone),
        }
    }
}

fn write_no_data(f: &mut fmt::Formatter<'_>, reason: NoData) -> fmt::Result {
    writeln!(f, "{}", reason)
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Share of free and paid entries ---")?;
        match self.free_paid.note {
            Some(reason) => write_no_data(f, reason)?,
            None => {
                writeln!(f, "Free: {:.2}%", self.free_paid.percent_free)?;
                writeln!(f, "Paid: {:.2}%", self.free_paid.percent_paid)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "--- Release year with the most entries ---")?;
        match self.peak_year {
            Aggregate::Found(peak) => writeln!(
                f,
                "{} had the most releases, with {} entries.",
                peak.year, peak.count
            )?,
            Aggregate::NoData(reason) => write_no_data(f, reason)?,
        }

        writeln!(f)?;
        writeln!(f, "--- Most expensive entry ---")?;
        match &self.most_expensive {
            Aggregate::Found(entry) => writeln!(
                f,
                "{} is the most expensive, priced at ${:.2}.",
                entry.name, entry.price
            ),
            Aggregate::NoData(reason) => write_no_data(f, *reason),
        }
    }
}
