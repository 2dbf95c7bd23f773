//! Export writers
//!
//! Writes records to spreadsheet, CSV or Parquet files.

use super::schema::records_to_batch;
use crate::error::{Error, Result};
use crate::types::{Record, RecordField};
use arrow::csv::WriterBuilder;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

// ============================================================================
// Export Format
// ============================================================================

/// File format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Excel workbook with a header row
    Xlsx,
    /// Comma-separated values with a header row
    Csv,
    /// Apache Parquet
    Parquet,
}

impl ExportFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("xlsx") => Ok(ExportFormat::Xlsx),
            Some("csv") => Ok(ExportFormat::Csv),
            Some("parquet" | "pq") => Ok(ExportFormat::Parquet),
            _ => Err(Error::output(format!(
                "cannot infer export format from '{}'; use a .xlsx, .csv or .parquet extension",
                path.display()
            ))),
        }
    }

    /// Use `explicit` when given, otherwise infer from `path`
    pub fn resolve(explicit: Option<Self>, path: impl AsRef<Path>) -> Result<Self> {
        match explicit {
            Some(format) => Ok(format),
            None => Self::from_path(path),
        }
    }

    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Parquet => "parquet",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// ============================================================================
// Parquet Writer
// ============================================================================

/// Configuration for Parquet writer
#[derive(Debug, Clone)]
pub struct ParquetWriterConfig {
    compression: Compression,
    row_group_size: usize,
    dictionary_enabled: bool,
    statistics_enabled: bool,
}

impl Default for ParquetWriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: 64 * 1024,
            dictionary_enabled: true,
            statistics_enabled: true,
        }
    }
}

impl ParquetWriterConfig {
    /// Create a new config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get dictionary encoding enabled
    pub fn is_dictionary_enabled(&self) -> bool {
        self.dictionary_enabled
    }

    /// Get statistics enabled
    pub fn is_statistics_enabled(&self) -> bool {
        self.statistics_enabled
    }

    /// Get row group size
    pub fn row_group_size(&self) -> usize {
        self.row_group_size
    }

    /// Get compression
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Set row group size
    #[must_use]
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size.max(1);
        self
    }

    /// Enable or disable dictionary encoding
    #[must_use]
    pub fn with_dictionary(mut self, enabled: bool) -> Self {
        self.dictionary_enabled = enabled;
        self
    }

    /// Enable or disable statistics
    #[must_use]
    pub fn with_statistics(mut self, enabled: bool) -> Self {
        self.statistics_enabled = enabled;
        self
    }

    /// Use no compression
    #[must_use]
    pub fn uncompressed(mut self) -> Self {
        self.compression = Compression::UNCOMPRESSED;
        self
    }

    /// Use ZSTD compression
    #[must_use]
    pub fn zstd(mut self) -> Self {
        self.compression = Compression::ZSTD(parquet::basic::ZstdLevel::default());
        self
    }

    fn build_properties(&self) -> WriterProperties {
        let mut builder = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size);

        if !self.dictionary_enabled {
            builder = builder.set_dictionary_enabled(false);
        }

        if !self.statistics_enabled {
            builder =
                builder.set_statistics_enabled(parquet::file::properties::EnabledStatistics::None);
        }

        builder.build()
    }
}

/// Parquet file writer
pub struct ParquetWriter {
    writer: ArrowWriter<File>,
    rows_written: usize,
}

impl ParquetWriter {
    /// Create a new Parquet writer
    pub fn new(
        path: impl AsRef<Path>,
        schema: &Schema,
        config: &ParquetWriterConfig,
    ) -> Result<Self> {
        let file = File::create(path.as_ref()).map_err(|e| Error::Output {
            message: format!("Failed to create {}: {e}", path.as_ref().display()),
        })?;

        let props = config.build_properties();
        let writer =
            ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(props)).map_err(|e| {
                Error::Output {
                    message: format!("Failed to create Parquet writer: {e}"),
                }
            })?;

        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    /// Write a RecordBatch to the file
    pub fn write(&mut self, batch: &RecordBatch) -> Result<()> {
        self.writer.write(batch).map_err(|e| Error::Output {
            message: format!("Failed to write batch: {e}"),
        })?;

        self.rows_written += batch.num_rows();
        Ok(())
    }

    /// Number of rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Close the writer and finalize the file
    pub fn close(self) -> Result<usize> {
        let rows = self.rows_written;
        self.writer.close().map_err(|e| Error::Output {
            message: format!("Failed to close Parquet writer: {e}"),
        })?;
        Ok(rows)
    }
}

// ============================================================================
// Export
// ============================================================================

/// Write records to `path` in the given format.
///
/// One row per record, columns `name, description, price, rating`. An empty
/// slice still produces a file: a header-only workbook or CSV, or a zero-row
/// Parquet file.
/// Missing parent directories are created. Returns the number of rows.
pub fn export_records(
    path: impl AsRef<Path>,
    records: &[Record],
    format: ExportFormat,
) -> Result<usize> {
    export_records_with_config(path, records, format, &ParquetWriterConfig::default())
}

/// Like [`export_records`] with explicit Parquet settings
pub fn export_records_with_config(
    path: impl AsRef<Path>,
    records: &[Record],
    format: ExportFormat,
    parquet: &ParquetWriterConfig,
) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let rows = match format {
        ExportFormat::Xlsx => write_xlsx(path, records)?,
        ExportFormat::Csv => write_csv(path, &records_to_batch(records)?)?,
        ExportFormat::Parquet => {
            let batch = records_to_batch(records)?;
            let mut writer = ParquetWriter::new(path, batch.schema().as_ref(), parquet)?;
            writer.write(&batch)?;
            writer.close()?
        }
    };

    info!(path = %path.display(), %format, rows, "Exported records");
    Ok(rows)
}

fn write_csv(path: &Path, batch: &RecordBatch) -> Result<usize> {
    let mut buffer = Vec::new();
    {
        let mut writer = WriterBuilder::new().with_header(true).build(&mut buffer);
        writer.write(batch)?;
    }
    fs::write(path, buffer)?;
    Ok(batch.num_rows())
}

/// Name of the single worksheet in exported workbooks
pub const XLSX_SHEET_NAME: &str = "records";

/// Rows per worksheet in the xlsx format, header included
const XLSX_MAX_ROWS: usize = 1_048_576;

fn write_xlsx(path: &Path, records: &[Record]) -> Result<usize> {
    if records.len() >= XLSX_MAX_ROWS {
        return Err(Error::output(format!(
            "{} records do not fit in one worksheet (limit {})",
            records.len(),
            XLSX_MAX_ROWS - 1
        )));
    }

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(XLSX_SHEET_NAME)?;
        worksheet.set_freeze_panes(1, 0)?;

        for (col, field) in (0u16..).zip(RecordField::ALL) {
            worksheet.write_string_with_format(0, col, field.as_str(), &header)?;
        }

        for (row, record) in (1u32..).zip(records) {
            for (col, field) in (0u16..).zip(RecordField::ALL) {
                let value = record.get(field);
                // Unmatched fields stay blank cells
                if !value.is_empty() {
                    worksheet.write_string(row, col, value)?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(records.len())
}
