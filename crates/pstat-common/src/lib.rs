//! pstat common types, inputs, and errors.
//!
//! This crate provides foundational types shared across the pstat crates:
//! - The engine error taxonomy
//! - Validated input types (probabilities, counts, rates)
//! - Calculation result and chart series records
//! - Output format and schema versioning

pub mod error;
pub mod input;
pub mod output;
pub mod result;
pub mod schema;

pub use error::{Error, Result};
pub use input::{require_finite, require_integer, Count, Probability, Rate};
pub use output::OutputFormat;
pub use result::{CalculationResult, ChartData, ChartKind, Evaluation, SeriesOptions, SeriesPoint};
pub use schema::SCHEMA_VERSION;
