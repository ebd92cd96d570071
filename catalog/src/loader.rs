use crate::record_parser::{RawRecord, RecordParser};
use crate::{Dataset, LoadError, LoadReport, LoadWarning, RowParseError, WarningKind};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// Loader settings. Defaults match the catalog export: comma separated,
/// with `Name`, `Release date` and `Price` columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub delimiter: u8,
    pub name_column: String,
    pub date_column: String,
    pub price_column: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            name_column: "Name".to_string(),
            date_column: "Release date".to_string(),
            price_column: "Price".to_string(),
        }
    }
}

/// Header name to column index lookup
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    name_to_index: HashMap<String, usize>,
}

impl ColumnMapping {
    pub fn from_headers(headers: &StringRecord) -> Self {
        let mut name_to_index = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            let column_name = header.trim_start_matches('\u{feff}').trim().to_string();
            // Keep the first occurrence of a duplicated header
            name_to_index.entry(column_name).or_insert(index);
        }
        Self { name_to_index }
    }

    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(column_name).copied()
    }

    fn require(&self, column_name: &str) -> Result<usize, LoadError> {
        self.get_index(column_name)
            .ok_or_else(|| LoadError::MissingColumn(column_name.to_string()))
    }
}

/// Positions of the three required columns
#[derive(Debug, Clone, Copy)]
struct RequiredColumns {
    name: usize,
    date: usize,
    price: usize,
}

/// Reads a catalog file into a `Dataset` in one pass
#[derive(Default)]
pub struct DatasetLoader {
    config: LoaderConfig,
    parser: RecordParser,
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            config,
            parser: RecordParser::new(),
        }
    }

    pub fn with_parser(mut self, parser: RecordParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load a file from disk. The file is closed before this returns,
    /// whatever the outcome.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadReport, LoadError> {
        let path = path.as_ref();
        let file_access = |source: io::Error| LoadError::FileAccess {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(file_access)?;
        // Opening a directory succeeds on unix; only regular files are readable catalogs
        if !file.metadata().map_err(file_access)?.is_file() {
            return Err(file_access(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }

        info!("Loading catalog file {}", path.display());
        // A read failure on the file itself is an access problem, not bad CSV
        self.load_from_reader(Box::new(file)).map_err(|e| match e {
            LoadError::Csv(err) => {
                let read_failure = match err.kind() {
                    csv::ErrorKind::Io(source) => {
                        Some(io::Error::new(source.kind(), source.to_string()))
                    }
                    _ => None,
                };
                match read_failure {
                    Some(source) => file_access(source),
                    None => LoadError::Csv(err),
                }
            }
            other => other,
        })
    }

    /// Load from any reader, e.g. an uploaded buffer
    pub fn load_from_reader(&self, reader: Box<dyn Read>) -> Result<LoadReport, LoadError> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .flexible(true)
            .from_reader(reader);

        let mapping = ColumnMapping::from_headers(csv_reader.headers()?);
        let columns = RequiredColumns {
            name: mapping.require(&self.config.name_column)?,
            date: mapping.require(&self.config.date_column)?,
            price: mapping.require(&self.config.price_column)?,
        };
        debug!("Resolved columns: {:?}", columns);

        let mut entries = Vec::new();
        let mut warnings = Vec::new();

        for record_result in csv_reader.records() {
            let record = match record_result {
                Ok(record) => record,
                // Lost the underlying stream: nothing further can be read
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(0);
                    reject(&mut warnings, line, RowParseError::Malformed(e.to_string()));
                    continue;
                }
            };

            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let parsed = self
                .raw_record(&record, columns, line)
                .and_then(|raw| self.parser.parse(&raw));

            match parsed {
                Ok(parsed) => {
                    entries.push(parsed.entry);
                    warnings.extend(parsed.warning);
                }
                Err(e) => reject(&mut warnings, line, e),
            }
        }

        let report = LoadReport {
            dataset: Dataset::new(entries),
            warnings,
        };
        info!(
            "Loaded {} entries ({} rows rejected, {} warnings)",
            report.dataset.len(),
            report.rejected_rows(),
            report.warnings.len()
        );

        Ok(report)
    }

    fn raw_record(
        &self,
        record: &StringRecord,
        columns: RequiredColumns,
        line: u64,
    ) -> Result<RawRecord, RowParseError> {
        let field = |index: usize, column: &str| {
            record
                .get(index)
                .map(str::to_string)
                .ok_or_else(|| RowParseError::MissingField {
                    column: column.to_string(),
                })
        };

        Ok(RawRecord {
            line,
            name: field(columns.name, &self.config.name_column)?,
            release_date: field(columns.date, &self.config.date_column)?,
            price: field(columns.price, &self.config.price_column)?,
        })
    }
}

fn reject(warnings: &mut Vec<LoadWarning>, line: u64, error: RowParseError) {
    warn!(line, "Skipping row: {}", error);
    warnings.push(LoadWarning {
        line,
        kind: WarningKind::RowRejected,
        message: format!("row skipped: {}", error),
    });
}
