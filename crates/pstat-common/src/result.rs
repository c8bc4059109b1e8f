//! Calculation result and chart series records.
//!
//! These are the values handed back to the presentation layer: a scalar with
//! its substituted formula, plus the points needed to draw a chart.

use serde::{Deserialize, Serialize};

/// A computed scalar with its human-readable formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub value: f64,
    pub formula: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl CalculationResult {
    pub fn new(value: f64, formula: impl Into<String>) -> Self {
        Self {
            value,
            formula: formula.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// One plotted point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: f64,
    pub y: f64,
}

impl SeriesPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Chart shape requested for a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    Bar,
    Line,
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::Pie => write!(f, "pie"),
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::Line => write!(f, "line"),
        }
    }
}

/// Points plus optional category labels (one per point).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub kind: ChartKind,
    pub points: Vec<SeriesPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

impl ChartData {
    /// Numeric series (x carries the domain value).
    pub fn series(kind: ChartKind, points: Vec<SeriesPoint>) -> Self {
        Self {
            kind,
            points,
            labels: Vec::new(),
        }
    }

    /// Categorical chart: x is the category index.
    pub fn categories<S: Into<String>>(kind: ChartKind, entries: Vec<(S, f64)>) -> Self {
        let mut points = Vec::with_capacity(entries.len());
        let mut labels = Vec::with_capacity(entries.len());
        for (idx, (label, value)) in entries.into_iter().enumerate() {
            points.push(SeriesPoint::new(idx as f64, value));
            labels.push(label.into());
        }
        Self {
            kind,
            points,
            labels,
        }
    }

    /// Label for the point at `idx`, falling back to its x value.
    pub fn label_at(&self, idx: usize) -> String {
        match self.labels.get(idx) {
            Some(label) => label.clone(),
            None => self
                .points
                .get(idx)
                .map(|p| format_x(p.x))
                .unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn format_x(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        format!("{x:.2}")
    }
}

/// A result with its optional companion chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub result: CalculationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartData>,
}

impl Evaluation {
    pub fn new(result: CalculationResult, chart: ChartData) -> Self {
        Self {
            result,
            chart: Some(chart),
        }
    }

    pub fn scalar(result: CalculationResult) -> Self {
        Self {
            result,
            chart: None,
        }
    }
}

/// Knobs for companion series generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesOptions {
    /// Samples taken across a continuous display window.
    pub line_samples: usize,
    /// Half-width of the normal display window, in standard deviations.
    pub normal_window_sigmas: f64,
    /// Extra discrete points drawn past the queried count.
    pub discrete_padding: u64,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self {
            line_samples: 200,
            normal_window_sigmas: 4.0,
            discrete_padding: 3,
        }
    }
}
