//! Display and series settings.

use pstat_common::SeriesOptions;
use serde::{Deserialize, Serialize};

use crate::validate::{ValidationError, ValidationResult};

/// Complete settings file.
///
/// Every field has a default, so a partial file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub schema_version: String,

    /// Decimals for elementary probabilities.
    pub decimals: usize,

    /// Decimals for distribution values (PMF/PDF/tails are often small).
    pub distribution_decimals: usize,

    /// Samples across a continuous display window.
    pub line_samples: usize,

    /// Half-width of the normal display window, in standard deviations.
    pub normal_window_sigmas: f64,

    /// Extra discrete points drawn past the queried count.
    pub discrete_padding: u64,

    /// Width in cells of the longest ASCII bar.
    pub chart_width: usize,

    /// Maximum rows drawn for a chart; longer series are down-sampled.
    pub chart_rows: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let series = SeriesOptions::default();
        Self {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            decimals: 4,
            distribution_decimals: 6,
            line_samples: series.line_samples,
            normal_window_sigmas: series.normal_window_sigmas,
            discrete_padding: series.discrete_padding,
            chart_width: 40,
            chart_rows: 20,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them.
    pub fn parse_json(json: &str) -> ValidationResult<Self> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| ValidationError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file.
    pub fn from_file(path: &std::path::Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ValidationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_json(&content)
    }

    /// Check semantic constraints, collecting every violation.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut problems = Vec::new();
        if !pstat_common::schema::is_compatible(crate::CONFIG_SCHEMA_VERSION, &self.schema_version) {
            problems.push(format!(
                "unsupported schema_version {} (current is {})",
                self.schema_version,
                crate::CONFIG_SCHEMA_VERSION
            ));
        }
        if self.decimals > 12 {
            problems.push(format!("decimals must be at most 12, got {}", self.decimals));
        }
        if self.distribution_decimals > 12 {
            problems.push(format!(
                "distribution_decimals must be at most 12, got {}",
                self.distribution_decimals
            ));
        }
        if self.line_samples < 2 {
            problems.push(format!(
                "line_samples must be at least 2, got {}",
                self.line_samples
            ));
        }
        if !(self.normal_window_sigmas.is_finite() && self.normal_window_sigmas > 0.0) {
            problems.push(format!(
                "normal_window_sigmas must be positive, got {}",
                self.normal_window_sigmas
            ));
        }
        if self.chart_width == 0 {
            problems.push("chart_width must be at least 1".to_string());
        }
        if self.chart_rows == 0 {
            problems.push("chart_rows must be at least 1".to_string());
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Invalid(problems))
        }
    }

    /// Series generation knobs for the engine.
    pub fn series_options(&self) -> SeriesOptions {
        SeriesOptions {
            line_samples: self.line_samples,
            normal_window_sigmas: self.normal_window_sigmas,
            discrete_padding: self.discrete_padding,
        }
    }
}
