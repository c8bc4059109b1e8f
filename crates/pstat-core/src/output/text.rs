//! Human-readable rendering with a horizontal ASCII bar chart.

use std::fmt::Write;

use pstat_common::{ChartData, Evaluation};
use pstat_config::Settings;

use crate::request::CalculationRequest;

const BAR: char = '█';

/// Format `value` with the precision configured for this request's section.
pub fn format_value(request: &CalculationRequest, value: f64, settings: &Settings) -> String {
    let decimals = if request.is_distribution() {
        settings.distribution_decimals
    } else {
        settings.decimals
    };
    let mut out = format!("{value:.decimals$}");
    if request.yields_probability() && (0.0..=1.0).contains(&value) {
        let _ = write!(out, " ({:.2}%)", value * 100.0);
    }
    out
}

pub fn render(request: &CalculationRequest, evaluation: &Evaluation, settings: &Settings) -> String {
    let result = &evaluation.result;
    let mut out = String::new();
    let _ = writeln!(out, "[{}]", request.section());
    let _ = writeln!(out, "formula: {}", result.formula);
    let _ = writeln!(out, "result:  {}", format_value(request, result.value, settings));
    if let Some(label) = &result.label {
        let _ = writeln!(out, "note:    {label}");
    }
    if let Some(chart) = &evaluation.chart {
        out.push('\n');
        out.push_str(&render_chart(chart, settings.chart_width, settings.chart_rows));
    }
    out
}

/// Indices of at most `rows` evenly spaced points, first and last included.
fn sample_indices(len: usize, rows: usize) -> Vec<usize> {
    if len <= rows || rows < 2 {
        return (0..len.min(rows.max(1))).collect();
    }
    let mut indices: Vec<usize> = (0..rows).map(|i| i * (len - 1) / (rows - 1)).collect();
    indices.dedup();
    indices
}

/// One row per (sampled) point, bars scaled to the tallest point.
pub fn render_chart(chart: &ChartData, width: usize, rows: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} chart, {} points", chart.kind, chart.points.len());
    if chart.is_empty() {
        return out;
    }
    let indices = sample_indices(chart.points.len(), rows);
    let labels: Vec<String> = indices.iter().map(|&i| chart.label_at(i)).collect();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let max = indices
        .iter()
        .map(|&i| chart.points[i].y)
        .fold(0.0_f64, f64::max);

    for (&i, label) in indices.iter().zip(&labels) {
        let y = chart.points[i].y;
        let len = if max > 0.0 && y > 0.0 {
            ((y / max) * width as f64).round() as usize
        } else {
            0
        };
        let pad = label_width - label.chars().count();
        let _ = writeln!(
            out,
            "{}{label} │{} {y:.4}",
            " ".repeat(pad),
            BAR.to_string().repeat(len)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::evaluate;
    use pstat_common::{ChartKind, SeriesPoint};

    #[test]
    fn probability_values_show_percentage() {
        let request = CalculationRequest::Complement { p: 0.25 };
        assert_eq!(
            format_value(&request, 0.75, &Settings::default()),
            "0.7500 (75.00%)"
        );
    }

    #[test]
    fn distributions_use_wider_precision() {
        let request = CalculationRequest::Factorial { n: 3.0 };
        assert_eq!(format_value(&request, 6.0, &Settings::default()), "6.0000");
        let request = CalculationRequest::Poisson {
            lambda: 2.0,
            k: 1.0,
            mode: Default::default(),
        };
        assert!(format_value(&request, 0.270671, &Settings::default()).starts_with("0.270671 "));
    }

    #[test]
    fn chart_bars_scale_to_maximum() {
        let chart = ChartData::categories(ChartKind::Bar, vec![("a", 1.0), ("bb", 0.5), ("c", 0.0)]);
        let text = render_chart(&chart, 10, 20);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "bar chart, 3 points");
        assert_eq!(lines[1], " a │██████████ 1.0000");
        assert_eq!(lines[2], "bb │█████ 0.5000");
        assert_eq!(lines[3], " c │ 0.0000");
    }

    #[test]
    fn long_series_are_downsampled() {
        let points: Vec<SeriesPoint> = (0..200).map(|i| SeriesPoint::new(i as f64, 1.0)).collect();
        let chart = ChartData::series(ChartKind::Line, points);
        let text = render_chart(&chart, 5, 20);
        assert_eq!(text.lines().count(), 21);
        assert!(text.lines().nth(1).unwrap().starts_with("  0 │"));
        assert!(text.lines().last().unwrap().starts_with("199 │"));
    }

    #[test]
    fn full_render_includes_label_and_chart() {
        let request = CalculationRequest::Simple {
            favorable: 3.0,
            total: 10.0,
        };
        let eval = evaluate(&request, &Default::default()).unwrap();
        let text = render(&request, &eval, &Settings::default());
        assert!(text.starts_with("[simple]\nformula: P(A) = 3 / 10\n"));
        assert!(text.contains("result:  0.3000 (30.00%)"));
        assert!(text.contains("note:    7 unfavorable outcomes"));
        assert!(text.contains("Favorable │"));
    }
}
