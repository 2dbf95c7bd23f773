//! Record to Arrow conversion
//!
//! Records map onto a fixed four-column schema: `name`, `description`,
//! `price`, `rating`, all non-nullable UTF-8.

use crate::error::{Error, Result};
use crate::types::{Record, RecordField};
use arrow::array::{Array, ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// Arrow schema shared by every export
pub fn record_schema() -> SchemaRef {
    let fields: Vec<Field> = RecordField::ALL
        .iter()
        .map(|field| Field::new(field.as_str(), DataType::Utf8, false))
        .collect();
    Arc::new(Schema::new(fields))
}

/// Convert records to a single RecordBatch, preserving order
pub fn records_to_batch(records: &[Record]) -> Result<RecordBatch> {
    let columns: Vec<ArrayRef> = RecordField::ALL
        .iter()
        .map(|field| {
            let values = records.iter().map(|record| record.get(*field));
            Arc::new(StringArray::from_iter_values(values)) as ArrayRef
        })
        .collect();

    Ok(RecordBatch::try_new(record_schema(), columns)?)
}

/// Convert a batch back into records.
///
/// Columns are looked up by name; a missing column reads as empty strings.
pub fn batch_to_records(batch: &RecordBatch) -> Result<Vec<Record>> {
    let mut records = vec![Record::default(); batch.num_rows()];

    for field in RecordField::ALL {
        let Some(column) = batch.column_by_name(field.as_str()) else {
            continue;
        };
        let strings = column
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| {
                Error::output(format!(
                    "column '{field}' has type {}, expected Utf8",
                    column.data_type()
                ))
            })?;

        for (record, value) in records.iter_mut().zip(strings.iter()) {
            record.set(field, value.unwrap_or_default());
        }
    }

    Ok(records)
}
