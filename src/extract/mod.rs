//! Extraction module
//!
//! Turns listing page HTML into [`Record`](crate::types::Record)s using a
//! CSS selector schema.
//!
//! # Overview
//!
//! A schema has one base selector matching each listing item, and one
//! selector per record field evaluated inside it. Fields read element text
//! (whitespace collapsed) or an attribute. Unmatched fields are left empty.

mod extractor;
mod types;

pub use extractor::CssExtractor;
pub use types::{ExtractionSchema, FieldSpec};
