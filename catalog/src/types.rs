use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Release year of an entry. `Unknown` when no date format matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<i32>", into = "Option<i32>")]
pub enum Year {
    Known(i32),
    Unknown,
}

impl Year {
    pub fn known(self) -> Option<i32> {
        match self {
            Year::Known(year) => Some(year),
            Year::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, Year::Known(_))
    }
}

impl From<Option<i32>> for Year {
    fn from(value: Option<i32>) -> Self {
        value.map_or(Year::Unknown, Year::Known)
    }
}

impl From<Year> for Option<i32> {
    fn from(year: Year) -> Self {
        year.known()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Known(year) => write!(f, "{}", year),
            Year::Unknown => f.write_str("unknown"),
        }
    }
}

/// One normalized catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub year: Year,
    pub price: f64,
}

impl Entry {
    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }
}

/// Insertion-ordered collection of loaded entries.
///
/// Built once by the loader; there is no API to add, remove or mutate
/// entries afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    entries: Vec<Entry>,
}

impl Dataset {
    pub(crate) fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl FromIterator<Entry> for Dataset {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Entry kept, but its release date matched no known format
    UnknownYear,
    /// Row skipped entirely
    RowRejected,
}

/// Diagnostic collected during a load instead of being printed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadWarning {
    /// 1-based line in the source, header included
    pub line: u64,
    pub kind: WarningKind,
    pub message: String,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Successful load: the dataset plus everything that went wrong on the way
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub dataset: Dataset,
    pub warnings: Vec<LoadWarning>,
}

impl LoadReport {
    pub fn rejected_rows(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| w.kind == WarningKind::RowRejected)
            .count()
    }
}

/// File-level failure. Aborts the load; no dataset is produced.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot open '{}': {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("required column '{0}' not found in header")]
    MissingColumn(String),
    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),
}

/// Row-local failure. The row is discarded and loading continues.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowParseError {
    #[error("no value for column '{column}'")]
    MissingField { column: String },
    #[error("price '{value}' is not a number")]
    InvalidPrice { value: String },
    #[error("price '{value}' is negative")]
    NegativePrice { value: String },
    #[error("price '{value}' is not finite")]
    NonFinitePrice { value: String },
    #[error("malformed row: {0}")]
    Malformed(String),
}
