//! CSS extractor
//!
//! Compiles an [`ExtractionSchema`] once and applies it to page HTML.

use super::types::ExtractionSchema;
use crate::error::{Error, Result};
use crate::types::{Record, RecordField};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// A field selector ready to run
#[derive(Debug, Clone)]
struct CompiledField {
    field: RecordField,
    selector: Selector,
    attribute: Option<String>,
}

/// Schema with compiled selectors
#[derive(Debug, Clone)]
pub struct CssExtractor {
    name: String,
    base: Selector,
    fields: Vec<CompiledField>,
}

impl CssExtractor {
    /// Compile a schema.
    ///
    /// Fails on an invalid selector, an empty field list or a field that
    /// appears twice.
    pub fn new(schema: &ExtractionSchema) -> Result<Self> {
        if schema.base_selector.trim().is_empty() {
            return Err(Error::invalid_value(
                "schema.base_selector",
                "must not be empty",
            ));
        }
        if schema.fields.is_empty() {
            return Err(Error::invalid_value(
                "schema.fields",
                "at least one field is required",
            ));
        }

        let base = compile(&schema.base_selector)?;

        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(schema.fields.len());
        for field_spec in &schema.fields {
            if !seen.insert(field_spec.name) {
                return Err(Error::invalid_value(
                    "schema.fields",
                    format!("field '{}' is declared more than once", field_spec.name),
                ));
            }
            fields.push(CompiledField {
                field: field_spec.name,
                selector: compile(&field_spec.selector)?,
                attribute: field_spec.attribute.clone(),
            });
        }

        Ok(Self {
            name: schema.name.clone(),
            base,
            fields,
        })
    }

    /// Schema name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extract records from an HTML document, in document order.
    ///
    /// Base elements where no field matched are skipped.
    pub fn extract(&self, html: &str) -> Vec<Record> {
        let document = Html::parse_document(html);

        document
            .select(&self.base)
            .map(|element| self.extract_item(element))
            .filter(|record| !record.is_blank())
            .collect()
    }

    fn extract_item(&self, element: ElementRef<'_>) -> Record {
        let mut record = Record::default();
        for compiled in &self.fields {
            if let Some(value) = read_field(element, compiled) {
                record.set(compiled.field, value);
            }
        }
        record
    }
}

/// Read one field from the first matching element
fn read_field(element: ElementRef<'_>, compiled: &CompiledField) -> Option<String> {
    let target = element.select(&compiled.selector).next()?;
    match &compiled.attribute {
        Some(attr) => target.value().attr(attr).map(|v| v.trim().to_string()),
        None => Some(normalize_text(target)),
    }
}

/// Element text with runs of whitespace collapsed to single spaces
fn normalize_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::selector(selector, e.to_string()))
}
