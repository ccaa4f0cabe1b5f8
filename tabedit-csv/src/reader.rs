use std::fs::File;
use std::io::Read;
use std::path::Path;

use tabedit_result::{Error, Result};
use tabedit_types::{CellValue, Row, Schema};

use crate::inference;

#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    /// Field delimiter. Quoting always uses `"`.
    pub delimiter: u8,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Parsed CSV text: the header and every data record whose arity matches it.
///
/// Cells are kept as raw text. Typing happens later, either provisionally
/// (see [`TextTable::provisional_rows`]) or against a known schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextTable {
    header: Vec<String>,
    records: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new(header: Vec<String>, records: Vec<Vec<String>>) -> Self {
        Self { header, records }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn records(&self) -> &[Vec<String>] {
        &self.records
    }

    /// Number of kept data records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cells of column `index` across all records, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.records
            .iter()
            .filter_map(move |record| record.get(index).map(String::as_str))
    }

    /// Records typed by [`CellValue::provisional`], for use before a schema
    /// is known.
    pub fn provisional_rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.records
            .iter()
            .map(|record| record.iter().map(|text| CellValue::provisional(text)).collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CsvReader {
    options: CsvReadOptions,
}

impl CsvReader {
    pub fn new(options: CsvReadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CsvReadOptions {
        &self.options
    }

    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<TextTable> {
        let file = File::open(path.as_ref())?;
        self.read_from(file)
    }

    /// Read the file at `path` and infer a schema from its cells.
    pub fn infer_schema(&self, path: impl AsRef<Path>) -> Result<Schema> {
        let table = self.read_path(path)?;
        inference::infer_schema(&table)
    }

    /// Parse a whole CSV stream.
    ///
    /// The first record is the header. A data record whose field count differs
    /// from the header's is dropped with a warning; it is never an error.
    pub fn read_from<R: Read>(&self, src: R) -> Result<TextTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.options.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(src);

        let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if header.is_empty() {
            return Err(Error::EmptyInput("CSV input has no header row".into()));
        }
        tracing::trace!("[CSV_READ] header has {} columns", header.len());

        let mut records = Vec::new();
        let mut dropped = 0usize;
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() != header.len() {
                let line = record
                    .position()
                    .map_or(idx + 2, |pos| pos.line() as usize);
                let mismatch = Error::ArityMismatch {
                    record: line,
                    expected: header.len(),
                    found: record.len(),
                };
                tracing::warn!("[CSV_READ] dropping row: {mismatch}");
                dropped += 1;
                continue;
            }
            records.push(record.iter().map(str::to_string).collect());
        }

        tracing::debug!(
            "[CSV_READ] kept {} records, dropped {dropped} with mismatched arity",
            records.len()
        );
        Ok(TextTable { header, records })
    }
}
