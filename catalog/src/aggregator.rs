//! Single-pass statistics over loaded entries
//!
//! None of these fail: an empty input yields an explicit "no data" answer
//! instead of a division by zero or a panic.

use crate::{Dataset, Entry, LoadError, LoadReport};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Why an aggregate has no answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoData {
    /// No dataset at all, the load failed
    NoDataset,
    EmptyDataset,
    /// Entries exist but none has a known release year
    NoKnownYears,
}

impl fmt::Display for NoData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            NoData::NoDataset => "No dataset was loaded.",
            NoData::EmptyDataset => "No entries found to analyze.",
            NoData::NoKnownYears => "Could not extract a valid year from any entry.",
        };
        f.write_str(msg)
    }
}

/// Result of an aggregate that may have nothing to report
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Aggregate<T> {
    Found(T),
    NoData(NoData),
}

impl<T> Aggregate<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Aggregate::Found(value) => Some(value),
            Aggregate::NoData(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Aggregate::Found(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Aggregate<U> {
        match self {
            Aggregate::Found(value) => Aggregate::Found(f(value)),
            Aggregate::NoData(reason) => Aggregate::NoData(reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FreePaidRatio {
    pub free: usize,
    pub paid: usize,
    pub percent_free: f64,
    pub percent_paid: f64,
    /// Set when there was nothing to count; both percentages are then 0.0
    pub note: Option<NoData>,
}

impl FreePaidRatio {
    fn empty(reason: NoData) -> Self {
        Self {
            free: 0,
            paid: 0,
            percent_free: 0.0,
            percent_paid: 0.0,
            note: Some(reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeakYear {
    pub year: i32,
    pub count: usize,
}

/// Share of free (price == 0) and paid entries, in percent
pub fn free_paid_ratio(entries: &[Entry]) -> FreePaidRatio {
    if entries.is_empty() {
        return FreePaidRatio::empty(NoData::EmptyDataset);
    }

    let total = entries.len();
    let free = entries.iter().filter(|e| e.is_free()).count();
    let percent_free = free as f64 / total as f64 * 100.0;

    FreePaidRatio {
        free,
        paid: total - free,
        percent_free,
        percent_paid: 100.0 - percent_free,
        note: None,
    }
}

/// Release year with the most entries.
///
/// Entries with an unknown year are ignored. On a tie, the year whose
/// first entry comes earliest in the dataset wins.
pub fn peak_release_year(entries: &[Entry]) -> Aggregate<PeakYear> {
    if entries.is_empty() {
        return Aggregate::NoData(NoData::EmptyDataset);
    }

    let mut counts: HashMap<i32, usize> = HashMap::new();
    let mut first_seen = Vec::new();

    for year in entries.iter().filter_map(|e| e.year.known()) {
        let count = counts.entry(year).or_insert(0);
        if *count == 0 {
            first_seen.push(year);
        }
        *count += 1;
    }
    debug!("Counted {} distinct release years", first_seen.len());

    let mut peak: Option<PeakYear> = None;
    for year in first_seen {
        let count = counts[&year];
        if peak.map_or(true, |p| count > p.count) {
            peak = Some(PeakYear { year, count });
        }
    }

    match peak {
        Some(peak) => Aggregate::Found(peak),
        None => Aggregate::NoData(NoData::NoKnownYears),
    }
}

/// Entry with the highest price; the first one wins a tie
pub fn most_expensive(entries: &[Entry]) -> Aggregate<&Entry> {
    let mut iter = entries.iter();
    let Some(mut best) = iter.next() else {
        return Aggregate::NoData(NoData::EmptyDataset);
    };

    for entry in iter {
        if entry.price > best.price {
            best = entry;
        }
    }

    Aggregate::Found(best)
}

/// Aggregates over the outcome of a load, which may not have produced a
/// dataset. Every query on a missing dataset answers `NoData::NoDataset`.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    dataset: Option<Dataset>,
    warning_count: usize,
}

impl Analyzer {
    pub fn new(dataset: Option<Dataset>) -> Self {
        Self {
            dataset,
            warning_count: 0,
        }
    }

    pub fn from_load(result: Result<LoadReport, LoadError>) -> Self {
        match result {
            Ok(report) => Self {
                warning_count: report.warnings.len(),
                dataset: Some(report.dataset),
            },
            Err(_) => Self::new(None),
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Warnings raised while loading the dataset
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn free_paid_ratio(&self) -> FreePaidRatio {
        match &self.dataset {
            Some(dataset) => free_paid_ratio(dataset.entries()),
            None => FreePaidRatio::empty(NoData::NoDataset),
        }
    }

    pub fn peak_release_year(&self) -> Aggregate<PeakYear> {
        match &self.dataset {
            Some(dataset) => peak_release_year(dataset.entries()),
            None => Aggregate::NoData(NoData::NoDataset),
        }
    }

    pub fn most_expensive(&self) -> Aggregate<&Entry> {
        match &self.dataset {
            Some(dataset) => most_expensive(dataset.entries()),
            None => Aggregate::NoData(NoData::NoDataset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Year;

    fn entry(name: &str, year: Option<i32>, price: f64) -> Entry {
        Entry {
            name: name.to_string(),
            year: Year::from(year),
            price,
        }
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry("Free", Some(2008), 0.0),
            entry("Cheap", Some(2008), 19.99),
            entry("Pricey", Some(2020), 59.99),
        ]
    }

    #[test]
    fn test_free_paid_ratio() {
        let ratio = free_paid_ratio(&sample());

        assert_eq!(ratio.free, 1);
        assert_eq!(ratio.paid, 2);
        assert!((ratio.percent_free - 33.33).abs() < 0.01);
        assert!((ratio.percent_paid - 66.67).abs() < 0.01);
        assert!((ratio.percent_free + ratio.percent_paid - 100.0).abs() < 1e-9);
        assert!(ratio.note.is_none());
    }

    #[test]
    fn test_free_paid_ratio_empty() {
        let ratio = free_paid_ratio(&[]);

        assert_eq!(ratio.percent_free, 0.0);
        assert_eq!(ratio.percent_paid, 0.0);
        assert_eq!(ratio.note, Some(NoData::EmptyDataset));
    }

    #[test]
    fn test_peak_release_year() {
        assert_eq!(
            peak_release_year(&sample()),
            Aggregate::Found(PeakYear { year: 2008, count: 2 })
        );
    }

    #[test]
    fn test_peak_release_year_ignores_unknown() {
        let entries = vec![
            entry("a", None, 1.0),
            entry("b", None, 1.0),
            entry("c", Some(2015), 1.0),
        ];
        assert_eq!(
            peak_release_year(&entries),
            Aggregate::Found(PeakYear { year: 2015, count: 1 })
        );
    }

    #[test]
    fn test_peak_release_year_tie_goes_to_first_seen() {
        let entries = vec![
            entry("a", Some(2019), 1.0),
            entry("b", Some(2011), 1.0),
            entry("c", Some(2011), 1.0),
            entry("d", Some(2019), 1.0),
        ];
        assert_eq!(
            peak_release_year(&entries),
            Aggregate::Found(PeakYear { year: 2019, count: 2 })
        );
    }

    #[test]
    fn test_peak_release_year_no_data() {
        assert_eq!(peak_release_year(&[]), Aggregate::NoData(NoData::EmptyDataset));
        assert_eq!(
            peak_release_year(&[entry("a", None, 0.0)]),
            Aggregate::NoData(NoData::NoKnownYears)
        );
    }

    #[test]
    fn test_most_expensive() {
        let entries = sample();
        let top = most_expensive(&entries).found().unwrap();
        assert_eq!(top.name, "Pricey");
        assert_eq!(top.price, 59.99);
    }

    #[test]
    fn test_most_expensive_tie_keeps_first() {
        let entries = vec![
            entry("first", Some(2001), 10.0),
            entry("second", None, 10.0),
        ];
        assert_eq!(most_expensive(&entries).found().unwrap().name, "first");
    }

    #[test]
    fn test_most_expensive_counts_unknown_years() {
        let entries = vec![entry("dated", Some(2001), 5.0), entry("undated", None, 9.0)];
        assert_eq!(most_expensive(&entries).found().unwrap().name, "undated");
    }

    #[test]
    fn test_most_expensive_empty() {
        assert_eq!(most_expensive(&[]), Aggregate::NoData(NoData::EmptyDataset));
    }

    #[test]
    fn test_analyzer_without_dataset() {
        let analyzer = Analyzer::new(None);

        let ratio = analyzer.free_paid_ratio();
        assert_eq!((ratio.percent_free, ratio.percent_paid), (0.0, 0.0));
        assert_eq!(ratio.note, Some(NoData::NoDataset));
        assert_eq!(analyzer.peak_release_year(), Aggregate::NoData(NoData::NoDataset));
        assert_eq!(analyzer.most_expensive(), Aggregate::NoData(NoData::NoDataset));
    }

    #[test]
    fn test_analyzer_with_dataset() {
        let analyzer = Analyzer::new(Some(sample().into_iter().collect()));

        assert_eq!(analyzer.free_paid_ratio().free, 1);
        assert!(analyzer.peak_release_year().is_found());
        assert_eq!(analyzer.most_expensive().map(|e| e.price), Aggregate::Found(59.99));
    }

    #[test]
    fn test_analyzer_keeps_load_warning_count() {
        let report = LoadReport {
            dataset: sample().into_iter().collect(),
            warnings: vec![crate::LoadWarning {
                line: 4,
                kind: crate::WarningKind::RowRejected,
                message: "row skipped".into(),
            }],
        };

        let analyzer = Analyzer::from_load(Ok(report));
        assert_eq!(analyzer.warning_count(), 1);
        assert_eq!(Analyzer::new(None).warning_count(), 0);
    }

    #[test]
    fn test_aggregate_serializes_tagged() {
        let found = serde_json::to_value(Aggregate::Found(PeakYear { year: 2008, count: 2 })).unwrap();
        assert_eq!(found["status"], "found");
        assert_eq!(found["value"]["year"], 2008);

        let missing = serde_json::to_value(Aggregate::<PeakYear>::NoData(NoData::NoKnownYears)).unwrap();
        assert_eq!(missing["status"], "no_data");
        assert_eq!(missing["value"], "no_known_years");
    }
}
