//! Extraction schema types
//!
//! A schema names one repeating container element (`base_selector`) and,
//! for each record field, a selector evaluated inside that container.

use crate::types::RecordField;
use serde::{Deserialize, Serialize};

/// CSS extraction schema for one listing page layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSchema {
    /// Schema name (informational)
    #[serde(default)]
    pub name: String,
    /// Selector for the element wrapping one listing item
    pub base_selector: String,
    /// Field selectors, relative to the base element
    pub fields: Vec<FieldSpec>,
}

impl ExtractionSchema {
    /// Create a schema with no fields
    pub fn new(name: impl Into<String>, base_selector: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_selector: base_selector.into(),
            fields: Vec::new(),
        }
    }

    /// Add a text field
    #[must_use]
    pub fn text(mut self, field: RecordField, selector: impl Into<String>) -> Self {
        self.fields.push(FieldSpec::text(field, selector));
        self
    }

    /// Add an attribute field
    #[must_use]
    pub fn attribute(
        mut self,
        field: RecordField,
        selector: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        self.fields
            .push(FieldSpec::attribute(field, selector, attribute));
        self
    }
}

/// How one record field is located inside a base element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Target record field
    pub name: RecordField,
    /// Selector relative to the base element
    pub selector: String,
    /// Read this attribute instead of the element text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl FieldSpec {
    /// A field read from element text
    pub fn text(name: RecordField, selector: impl Into<String>) -> Self {
        Self {
            name,
            selector: selector.into(),
            attribute: None,
        }
    }

    /// A field read from an element attribute
    pub fn attribute(
        name: RecordField,
        selector: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        Self {
            name,
            selector: selector.into(),
            attribute: Some(attribute.into()),
        }
    }
}
