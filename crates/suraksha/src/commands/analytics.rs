//! Predictive-maintenance analytics command handlers.

use std::fmt::Write as _;

use serde::Serialize;
use suraksha_core::view::{CategoryFilter, ListFilter};
use suraksha_core::{
    FailurePrediction, ModelMetrics, Monitor, RiskBand, RiskDistribution, RiskFactor,
};
use tabled::Tabled;

use crate::cli::{AnalyticsArgs, AnalyticsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Painter};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct FactorRow {
    #[tabled(rename = "Factor")]
    factor: String,
    #[tabled(rename = "Impact")]
    impact: String,
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "Trend")]
    trend: String,
}

impl FactorRow {
    fn new(f: &RiskFactor, painter: Painter) -> Self {
        Self {
            factor: f.factor.clone(),
            impact: f.impact.to_string(),
            band: painter.status(f.impact_band().as_ref()),
            trend: painter.status(f.trend.as_ref()),
        }
    }
}

#[derive(Tabled)]
struct PredictionRow {
    #[tabled(rename = "Pole")]
    pole: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Risk")]
    risk: String,
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "Expected")]
    expected: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
}

impl PredictionRow {
    fn new(p: &FailurePrediction, painter: Painter) -> Self {
        Self {
            pole: p.pole_id.clone(),
            location: p.location.clone(),
            risk: p.risk_score.to_string(),
            band: painter.status(p.band().as_ref()),
            expected: p.predicted_failure.clone(),
            confidence: p.confidence.to_string(),
        }
    }
}

/// `analytics metrics` result.
#[derive(Serialize)]
struct Overview<'a> {
    metrics: &'a ModelMetrics,
    distribution: RiskDistribution,
}

fn overview_detail(o: &Overview<'_>) -> String {
    let m = o.metrics;
    let d = o.distribution;
    let mut out = String::new();
    let _ = writeln!(out, "Accuracy:        {:.1}%", m.accuracy);
    let _ = writeln!(out, "Precision:       {:.1}%", m.precision);
    let _ = writeln!(out, "Recall:          {:.1}%", m.recall);
    let _ = writeln!(out, "False positives: {:.1}%", m.false_positive_rate);
    let _ = writeln!(out, "Last trained:    {}", m.last_training);
    let _ = writeln!(out, "Data points:     {}", m.training_data_points);
    let _ = writeln!(out);
    let _ = writeln!(out, "Risk distribution ({} poles)", d.total());
    let _ = writeln!(out, "  low:    {}", d.low);
    let _ = writeln!(out, "  medium: {}", d.medium);
    let _ = write!(out, "  high:   {}", d.high);
    out
}

fn prediction_detail(p: &FailurePrediction) -> String {
    let action = if p.is_priority() {
        "priority maintenance"
    } else {
        "inspection"
    };
    let mut lines = vec![
        format!("Pole:        {}", p.pole_id),
        format!("Location:    {}", p.location),
        format!("Risk:        {} ({})", p.risk_score, p.band()),
        format!("Expected:    {}", p.predicted_failure),
        format!("Confidence:  {}", p.confidence),
        format!("Action:      {action}"),
        "Reasons:".to_owned(),
    ];
    lines.extend(p.reasons.iter().map(|r| format!("  - {r}")));
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(monitor: &Monitor, args: AnalyticsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.format();
    let painter = Painter::new(&global.color_mode());
    let analytics = monitor.analytics_snapshot();

    match args.command {
        AnalyticsCommand::Metrics => {
            let overview = Overview {
                metrics: &analytics.metrics,
                distribution: analytics.distribution,
            };
            let out = output::render_single(&format, &overview, overview_detail, |o| {
                format!("{:.1}", o.metrics.accuracy)
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AnalyticsCommand::Factors => {
            let out = output::render_list(
                &format,
                &analytics.risk_factors,
                |f| FactorRow::new(f, painter),
                |f| f.factor.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AnalyticsCommand::Predictions { search, band } => {
            let category: CategoryFilter<RiskBand> = CategoryFilter::parse("band", &band)?;
            let filter = ListFilter::new(search, category);
            let snap = filter.apply(&analytics.predictions);
            if snap.is_empty() {
                output::note_empty(&format, global.quiet, "predictions");
            }
            let out = output::render_list(
                &format,
                &snap,
                |p| PredictionRow::new(p, painter),
                |p| p.pole_id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AnalyticsCommand::Prediction { pole } => {
            let p = monitor.prediction(&pole)?;
            let out = output::render_single(&format, &p, prediction_detail, |p| {
                p.pole_id.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use suraksha_core::fixtures;

    use super::*;

    #[test]
    fn overview_lists_metrics_and_bands() {
        let analytics = fixtures::analytics();
        let text = overview_detail(&Overview {
            metrics: &analytics.metrics,
            distribution: analytics.distribution,
        });
        assert!(text.contains("Accuracy:        94.2%"));
        assert!(text.contains("Last trained:    2024-01-15"));
        assert!(text.contains("Risk distribution (1247 poles)"));
        assert!(text.ends_with("high:   88"));
    }

    #[test]
    fn prediction_detail_recommends_by_risk() {
        let analytics = fixtures::analytics();
        let urgent = prediction_detail(analytics.prediction("KL-008-KLM").unwrap());
        assert!(urgent.contains("Action:      priority maintenance"));
        assert!(urgent.contains("  - High vibration detected"));

        let routine = prediction_detail(analytics.prediction("kl-023-ekm").unwrap());
        assert!(routine.contains("Risk:        69% (medium)"));
        assert!(routine.contains("Action:      inspection"));
    }
}
