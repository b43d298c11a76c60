//! Per-factor scorecard values derived from the raw form.
//!
//! These are presentation heuristics, not model outputs: each one maps a form
//! value onto a 0-100-ish bar so the result page can show what drove the score.

use serde::Serialize;

use crate::domain::{FormState, parse_number};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyFactor {
    pub label: &'static str,
    pub value: i64,
    pub negative: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorScore {
    pub name: &'static str,
    pub value: f64,
}

impl FactorScore {
    /// Bar width in percent relative to the largest score on the chart.
    pub fn relative_width(&self, max: f64) -> f64 {
        if max <= 0.0 {
            return 0.0;
        }
        (self.value / max * 100.0).min(100.0)
    }
}

pub const INCOME: &str = "Annual Income Level";
pub const EMPLOYMENT: &str = "Employment Stability";
pub const UTILIZATION: &str = "Credit Utilization";
pub const PAYMENT_HISTORY: &str = "Payment History";
pub const REPORT_ISSUES: &str = "Credit Report Issues";

const MAX_KEY_FACTORS: usize = 5;

/// Form inputs the scorecard reads. `None` means the field was left empty;
/// non-numeric input reads as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct FactorInputs {
    income: Option<f64>,
    employment_years: Option<f64>,
    utilization_pct: Option<f64>,
    delinquencies: Option<f64>,
    derogatory_marks: Option<f64>,
}

impl FactorInputs {
    fn from_form(form: &FormState) -> Self {
        let read = |key: &str| {
            let raw = form.value(key);
            (!raw.is_empty()).then(|| parse_number(raw).unwrap_or(0.0))
        };

        let late_30_60 = read("delinquency_30_60_24m");
        let late_90 = read("delinquency_90d_24m");
        let delinquencies = match (late_30_60, late_90) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(0.0) + b.unwrap_or(0.0)),
        };

        Self {
            income: read("annual_income"),
            employment_years: read("employment_years"),
            utilization_pct: read("balance_high_credit_pct"),
            delinquencies,
            derogatory_marks: read("derogatory_marks"),
        }
    }
}

pub(crate) fn key_factors(form: &FormState) -> Vec<KeyFactor> {
    let inputs = FactorInputs::from_form(form);
    let mut out = Vec::new();

    if let Some(income) = inputs.income {
        let score = (income / 100_000.0 * 80.0 + 20.0).max(30.0).min(95.0);
        out.push(factor(INCOME, score, score < 50.0));
    }
    if let Some(years) = inputs.employment_years {
        let score = (years * 15.0 + 40.0).min(95.0);
        out.push(factor(EMPLOYMENT, score, score < 50.0));
    }
    if let Some(util) = inputs.utilization_pct {
        let score = (95.0 - util).max(10.0);
        out.push(factor(UTILIZATION, score, util > 50.0));
    }
    if let Some(lates) = inputs.delinquencies {
        let score = (95.0 - lates * 20.0).max(20.0);
        out.push(factor(PAYMENT_HISTORY, score, lates > 2.0));
    }
    if let Some(derogs) = inputs.derogatory_marks {
        let score = (85.0 - derogs * 25.0).max(15.0);
        out.push(factor(REPORT_ISSUES, score, derogs > 1.0));
    }

    out.truncate(MAX_KEY_FACTORS);
    out
}

/// Fixed five-bar breakdown, highest first. Missing factors use fallbacks.
pub(crate) fn factor_analysis(form: &FormState, key_factors: &[KeyFactor]) -> Vec<FactorScore> {
    let inputs = FactorInputs::from_form(form);
    let scored = |label: &str, fallback: f64| {
        key_factors
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value as f64)
            .unwrap_or(fallback)
    };

    let derogs = inputs.derogatory_marks.unwrap_or(0.0);
    let mut out = vec![
        FactorScore {
            name: "Payment History",
            value: scored(PAYMENT_HISTORY, 75.0),
        },
        FactorScore {
            name: "Credit Utilization",
            value: scored(UTILIZATION, 65.0),
        },
        FactorScore {
            name: "Income Level",
            value: scored(INCOME, 70.0),
        },
        FactorScore {
            name: "Employment",
            value: scored(EMPLOYMENT, 60.0),
        },
        FactorScore {
            name: "Account Management",
            value: (80.0 - derogs * 15.0).max(20.0),
        },
    ];

    // Stable: ties keep the order above.
    out.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
    out
}

fn factor(label: &'static str, score: f64, negative: bool) -> KeyFactor {
    KeyFactor {
        label,
        value: super::round_half_up(score),
        negative,
    }
}
