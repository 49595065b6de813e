// ── Predictive maintenance analytics ──
//
// Output of the failure-prediction model: how it scores, which factors
// drive it and which poles it expects to fail soon.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record_id::{Percent, RecordId};
use super::status::RiskBand;

/// Risk score at or above which a prediction calls for priority
/// maintenance rather than a scheduled inspection.
pub const PRIORITY_RISK_SCORE: u8 = 80;

/// Evaluation figures of the prediction model, in percent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub false_positive_rate: f64,
    pub last_training: NaiveDate,
    pub training_data_points: u64,
}

/// Poles per risk band across the whole grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
}

impl RiskDistribution {
    pub fn get(self, band: RiskBand) -> u32 {
        match band {
            RiskBand::Low => self.low,
            RiskBand::Medium => self.medium,
            RiskBand::High => self.high,
        }
    }

    pub fn total(self) -> u32 {
        self.low + self.medium + self.high
    }
}

/// A variable the model weighs, with its share of the prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor: String,
    pub impact: Percent,
    pub trend: RiskBand,
}

impl RiskFactor {
    /// Band used to colour the impact bar: 80 and up high, 60 and up
    /// medium.
    pub fn impact_band(&self) -> RiskBand {
        match self.impact.get() {
            80.. => RiskBand::High,
            60..80 => RiskBand::Medium,
            _ => RiskBand::Low,
        }
    }
}

/// A pole the model expects to fail within the next 30 days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailurePrediction {
    /// The pole code; predictions are keyed by pole.
    pub id: RecordId,
    pub pole_id: String,
    pub location: String,
    pub risk_score: Percent,
    /// Expected time to failure, e.g. `3-5 days`.
    pub predicted_failure: String,
    pub confidence: Percent,
    /// Contributing factors, most significant first.
    pub reasons: Vec<String>,
}

impl FailurePrediction {
    pub fn band(&self) -> RiskBand {
        RiskBand::of_score(self.risk_score.get())
    }

    pub fn is_priority(&self) -> bool {
        self.risk_score.get() >= PRIORITY_RISK_SCORE
    }

    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.pole_id.eq_ignore_ascii_case(identifier)
    }
}

/// Everything the analytics page shows. Replaced as a whole.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Analytics {
    pub metrics: ModelMetrics,
    pub distribution: RiskDistribution,
    pub risk_factors: Vec<RiskFactor>,
    pub predictions: Vec<FailurePrediction>,
}

impl Analytics {
    /// Prediction for a pole code (case-insensitive).
    pub fn prediction(&self, pole: &str) -> Option<&FailurePrediction> {
        self.predictions.iter().find(|p| p.matches_identifier(pole))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn factor(impact: u8) -> RiskFactor {
        RiskFactor {
            factor: "Vibration Levels".into(),
            impact: Percent::new(impact),
            trend: RiskBand::High,
        }
    }

    #[test]
    fn impact_bar_bands() {
        assert_eq!(factor(91).impact_band(), RiskBand::High);
        assert_eq!(factor(80).impact_band(), RiskBand::High);
        assert_eq!(factor(72).impact_band(), RiskBand::Medium);
        assert_eq!(factor(59).impact_band(), RiskBand::Low);
    }

    #[test]
    fn distribution_totals() {
        let d = RiskDistribution {
            low: 847,
            medium: 312,
            high: 88,
        };
        assert_eq!(d.total(), 1247);
        assert_eq!(d.get(RiskBand::High), 88);
    }
}
