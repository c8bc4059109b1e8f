//! JSON-lines batch evaluation.
//!
//! Each non-blank line that does not start with `#` is one
//! [`CalculationRequest`]. A failing line is reported and skipped; later lines
//! still run. Every successful result replaces the chart of its section, so
//! the registry ends up holding the last chart per section.

use std::io::{BufRead, Write};

use pstat_common::{Error, OutputFormat, Result};
use pstat_config::Settings;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::chart::ChartRegistry;
use crate::output::{render_error, render_evaluation, ErrorEnvelope};
use crate::request::{evaluate, CalculationRequest};

/// Why one batch line produced no result.
#[derive(Debug, thiserror::Error)]
pub enum BatchLineError {
    #[error("line {line}: invalid request: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: {source}")]
    Eval {
        line: usize,
        #[source]
        source: Error,
    },
}

impl BatchLineError {
    pub fn line(&self) -> usize {
        match self {
            BatchLineError::Parse { line, .. } | BatchLineError::Eval { line, .. } => *line,
        }
    }

    fn envelope(&self) -> ErrorEnvelope {
        match self {
            BatchLineError::Parse { line, source } => {
                let err = Error::domain(format!("invalid request: {source}"));
                ErrorEnvelope::new(&err).at_line(*line)
            }
            BatchLineError::Eval { line, source } => ErrorEnvelope::new(source).at_line(*line),
        }
    }
}

/// Counts reported once the input is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub evaluated: usize,
    pub failed: usize,
    pub charts_live: usize,
}

impl BatchSummary {
    pub fn all_ok(&self) -> bool {
        self.failed == 0
    }
}

fn parse_line(line_no: usize, line: &str) -> std::result::Result<CalculationRequest, BatchLineError> {
    serde_json::from_str(line).map_err(|source| BatchLineError::Parse {
        line: line_no,
        source,
    })
}

/// Evaluate every request in `input`, writing one rendered result or error
/// per request to `out`.
///
/// Only I/O failures on `input` or `out` abort the batch.
pub fn run_batch<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    format: OutputFormat,
    settings: &Settings,
    registry: &mut ChartRegistry,
) -> Result<BatchSummary> {
    let opts = settings.series_options();
    let mut summary = BatchSummary::default();

    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let outcome = parse_line(line_no, trimmed).and_then(|request| {
            evaluate(&request, &opts)
                .map(|evaluation| (request, evaluation))
                .map_err(|source| BatchLineError::Eval {
                    line: line_no,
                    source,
                })
        });

        match outcome {
            Ok((request, evaluation)) => {
                summary.evaluated += 1;
                debug!(line = line_no, section = %request.section(), value = evaluation.result.value, "evaluated");
                let rendered = render_evaluation(format, &request, &evaluation, settings)?;
                writeln!(out, "{rendered}")?;
                registry.record(request.section(), evaluation.chart);
            }
            Err(err) => {
                summary.failed += 1;
                warn!(line = err.line(), error = %err, "request failed");
                writeln!(out, "{}", render_error(format, &err.envelope()))?;
            }
        }
    }

    summary.charts_live = registry.len();
    info!(
        evaluated = summary.evaluated,
        failed = summary.failed,
        charts_live = summary.charts_live,
        "batch complete"
    );
    Ok(summary)
}
