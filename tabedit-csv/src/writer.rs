//! CSV writer for decoded Parquet rows.

use std::io::Write;

use tabedit_result::{Error, Result};
use tabedit_types::{Row, Schema, render_cell};

/// Configuration for writing CSV files.
#[derive(Debug, Clone)]
pub struct CsvWriteOptions {
    /// Write a header row with column names when true.
    pub include_header: bool,
    /// Delimiter to use between fields.
    pub delimiter: u8,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            include_header: true,
            delimiter: b',',
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CsvWriter {
    options: CsvWriteOptions,
}

impl CsvWriter {
    pub fn new(options: CsvWriteOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CsvWriteOptions {
        &self.options
    }

    /// Write `rows` with columns in schema order. Returns the number of data
    /// rows written.
    pub fn write_rows<W, I>(&self, dst: W, schema: &Schema, rows: I) -> Result<usize>
    where
        W: Write,
        I: IntoIterator<Item = Result<Row>>,
    {
        let order: Vec<usize> = (0..schema.len()).collect();
        self.write_rows_in_order(dst, schema, &order, rows)
    }

    /// Write `rows` showing schema columns in the order given by `order`
    /// (indexes into the schema). The rows themselves stay in schema order.
    pub fn write_rows_in_order<W, I>(
        &self,
        dst: W,
        schema: &Schema,
        order: &[usize],
        rows: I,
    ) -> Result<usize>
    where
        W: Write,
        I: IntoIterator<Item = Result<Row>>,
    {
        let columns = order
            .iter()
            .map(|&idx| {
                schema.column(idx).ok_or_else(|| {
                    Error::Internal(format!(
                        "display column {idx} is outside a schema of {} columns",
                        schema.len()
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.options.delimiter)
            .from_writer(dst);

        if self.options.include_header {
            writer.write_record(columns.iter().map(|c| c.name.as_str()))?;
        }

        let mut written = 0usize;
        for row in rows {
            let row = row?;
            let fields = order.iter().zip(&columns).map(|(&idx, column)| {
                row.get(idx)
                    .map(|cell| render_cell(cell, column))
                    .unwrap_or_default()
            });
            writer.write_record(fields)?;
            written += 1;
        }

        writer.flush()?;
        tracing::trace!("[CSV_WRITE] wrote {written} rows");
        Ok(written)
    }
}
