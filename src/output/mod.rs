//! Output module
//!
//! Turns collected records into Arrow RecordBatches and writes them to disk.
//!
//! # Overview
//!
//! - Fixed four-column Arrow schema for records
//! - Excel workbook export with a bold, frozen header row
//! - CSV export with a header row
//! - Parquet export with configurable compression

mod schema;
mod writer;

pub use schema::{batch_to_records, record_schema, records_to_batch};
pub use writer::{
    export_records, export_records_with_config, ExportFormat, ParquetWriter, ParquetWriterConfig,
    XLSX_SHEET_NAME,
};
