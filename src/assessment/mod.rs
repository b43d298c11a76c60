//! Prediction result + form values → the scorecard shown on the result page.
//!
//! `derive` is pure and recomputed from scratch for every new result. The
//! score scale (500-900) and tier cut points are a display convention, not a
//! bureau score.

use serde::Serialize;

use crate::domain::{FormState, PredictionResult};

pub mod factors;

pub use factors::{FactorScore, KeyFactor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// `< 0.2` Low, `< 0.5` Medium, otherwise High.
    pub fn from_bad_probability(bad: f64) -> Self {
        if bad < 0.2 {
            RiskLevel::Low
        } else if bad < 0.5 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }

    pub fn color(self) -> RiskColor {
        match self {
            RiskLevel::Low => RiskColor::Emerald,
            RiskLevel::Medium => RiskColor::Amber,
            RiskLevel::High => RiskColor::Rose,
        }
    }
}

/// Color token for a risk tier; front-ends map it to their own palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskColor {
    Emerald,
    Amber,
    Rose,
}

/// Integer percentages; they may not sum to exactly 100 after rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    pub low: i64,
    pub medium: i64,
    pub high: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentView {
    pub credit_score: i64,
    pub score_percentage: i64,
    pub risk_level: RiskLevel,
    pub risk_color: RiskColor,
    pub bad_probability: i64,
    pub good_probability: i64,
    pub key_factors: Vec<KeyFactor>,
    pub factor_analysis: Vec<FactorScore>,
    pub risk_distribution: RiskDistribution,
}

impl AssessmentView {
    /// One-line reading of the default probability.
    pub fn summary(&self) -> &'static str {
        if self.bad_probability < 20 {
            "This indicates strong creditworthiness."
        } else if self.bad_probability < 50 {
            "This suggests moderate credit risk that may require additional review."
        } else {
            "This indicates higher risk that may impact credit decisions."
        }
    }

    /// Largest value in `factor_analysis`, used to scale its bars.
    pub fn factor_max(&self) -> f64 {
        self.factor_analysis
            .iter()
            .map(|f| f.value)
            .fold(0.0, f64::max)
    }
}

pub fn derive(result: &PredictionResult, form: &FormState) -> AssessmentView {
    let bad = result.bad();
    let good = result.good();

    let credit_score = round_half_up(900.0 - bad * 400.0);
    let score_percentage = round_half_up(credit_score as f64 / 900.0 * 100.0);
    let risk_level = RiskLevel::from_bad_probability(bad);

    let key_factors = factors::key_factors(form);
    let factor_analysis = factors::factor_analysis(form, &key_factors);

    AssessmentView {
        credit_score,
        score_percentage,
        risk_level,
        risk_color: risk_level.color(),
        bad_probability: round_half_up(bad * 100.0),
        good_probability: round_half_up(good * 100.0),
        key_factors,
        factor_analysis,
        risk_distribution: RiskDistribution {
            low: round_half_up(good * 100.0),
            medium: round_half_up((1.0 - good - bad) * 100.0),
            high: round_half_up(bad * 100.0),
        },
    }
}

/// Halves round toward positive infinity (`-0.5 → 0`, `2.5 → 3`).
pub(crate) fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}
