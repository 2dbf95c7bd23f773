//! Common types used throughout listing-harvest
//!
//! This module contains the record data model shared by the extractor,
//! the collector and the export sink, plus small utility types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Record
// ============================================================================

/// One flat extracted listing item.
///
/// All fields are opaque text exactly as found on the page. Prices and
/// ratings are not parsed or validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub description: String,
    pub price: String,
    pub rating: String,
}

impl Record {
    /// Create a record from its four fields
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<String>,
        rating: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price: price.into(),
            rating: rating.into(),
        }
    }

    /// Get a field value
    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::Name => &self.name,
            RecordField::Description => &self.description,
            RecordField::Price => &self.price,
            RecordField::Rating => &self.rating,
        }
    }

    /// Set a field value
    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        let value = value.into();
        match field {
            RecordField::Name => self.name = value,
            RecordField::Description => self.description = value,
            RecordField::Price => self.price = value,
            RecordField::Rating => self.rating = value,
        }
    }

    /// True when every field is empty
    pub fn is_blank(&self) -> bool {
        RecordField::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

// ============================================================================
// Record Field
// ============================================================================

/// The columns of a [`Record`], in declaration (and export) order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RecordField {
    Name,
    Description,
    Price,
    Rating,
}

impl RecordField {
    /// All fields in column order
    pub const ALL: [RecordField; 4] = [
        RecordField::Name,
        RecordField::Description,
        RecordField::Price,
        RecordField::Rating,
    ];

    /// Column name used in exports
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::Name => "name",
            RecordField::Description => "description",
            RecordField::Price => "price",
            RecordField::Rating => "rating",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordField {
    type Err = String;

    // Schema authors write "Name", "Price", "rating"... so matching ignores case
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(RecordField::Name),
            "description" => Ok(RecordField::Description),
            "price" => Ok(RecordField::Price),
            "rating" => Ok(RecordField::Rating),
            other => Err(format!(
                "unknown record field '{other}' (expected one of: name, description, price, rating)"
            )),
        }
    }
}

impl TryFrom<String> for RecordField {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RecordField> for String {
    fn from(field: RecordField) -> Self {
        field.as_str().to_string()
    }
}

// ============================================================================
// Page Result
// ============================================================================

/// Outcome of fetching and extracting one page.
///
/// Produced once per page by a fetcher; failures are carried in `success`
/// and `error` instead of being raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResult {
    pub success: bool,
    pub records: Vec<Record>,
    pub error: Option<String>,
}

impl PageResult {
    /// A successful page with records
    pub fn ok(records: Vec<Record>) -> Self {
        Self {
            success: true,
            records,
            error: None,
        }
    }

    /// A successful page without records
    pub fn empty() -> Self {
        Self::ok(Vec::new())
    }

    /// A failed page
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            records: Vec::new(),
            error: Some(message.into()),
        }
    }

    /// True when the page succeeded but yielded nothing
    pub fn is_empty(&self) -> bool {
        self.success && self.records.is_empty()
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.trim().is_empty())
    }
}
