//! Output rendering for the pstat CLI.
//!
//! JSON output wraps every result or error in a versioned envelope; text
//! output is produced by [`text`].

pub mod text;

use pstat_common::{CalculationResult, ChartData, Error, Evaluation, OutputFormat, SCHEMA_VERSION};
use pstat_config::Settings;
use serde::Serialize;

use crate::chart::ChartId;
use crate::request::CalculationRequest;

/// JSON wrapper for one successful calculation.
#[derive(Debug, Serialize)]
pub struct ResultEnvelope<'a> {
    pub schema_version: &'static str,
    pub section: ChartId,
    pub result: &'a CalculationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<&'a ChartData>,
}

impl<'a> ResultEnvelope<'a> {
    pub fn new(section: ChartId, evaluation: &'a Evaluation) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            section,
            result: &evaluation.result,
            chart: evaluation.chart.as_ref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u32,
    pub kind: &'static str,
    pub message: String,
}

/// JSON wrapper for a failed calculation.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub schema_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub error: ErrorBody,
}

impl ErrorEnvelope {
    pub fn new(err: &Error) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            line: None,
            error: ErrorBody {
                code: err.code(),
                kind: err.kind(),
                message: err.to_string(),
            },
        }
    }

    /// Tag the error with the 1-based batch line it came from.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Render one evaluated request in the chosen format.
pub fn render_evaluation(
    format: OutputFormat,
    request: &CalculationRequest,
    evaluation: &Evaluation,
    settings: &Settings,
) -> Result<String, Error> {
    match format {
        OutputFormat::Json => {
            Ok(serde_json::to_string(&ResultEnvelope::new(request.section(), evaluation))?)
        }
        OutputFormat::Text => Ok(text::render(request, evaluation, settings)),
    }
}

/// Render an error in the chosen format.
pub fn render_error(format: OutputFormat, envelope: &ErrorEnvelope) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(envelope).unwrap_or_else(|_| {
            format!(
                "{{\"schema_version\":\"{SCHEMA_VERSION}\",\"error\":{{\"code\":{},\"kind\":\"{}\"}}}}",
                envelope.error.code, envelope.error.kind
            )
        }),
        OutputFormat::Text => match envelope.line {
            Some(line) => format!("line {line}: {}", envelope.error.message),
            None => format!("error: {}", envelope.error.message),
        },
    }
}
