//! Plain-text rendering of the review summary and the assessment.
//!
//! Used by `credit-wizard predict`; the TUI draws the same view models with
//! widgets instead.

use crate::assessment::AssessmentView;
use crate::domain::{FIELDS, FormState, PayloadValue, PredictionResult, RequestPayload, WizardStep};

const BAR_WIDTH: usize = 30;

/// Every field with its entered value (or `–`), grouped by step.
pub fn format_review(form: &FormState) -> String {
    let mut out = String::new();
    let label_width = FIELDS.iter().map(|f| f.label.chars().count()).max().unwrap_or(0);

    for step in WizardStep::ALL {
        let mut rows = form.iter().filter(|(f, _)| f.step == step).peekable();
        if rows.peek().is_none() {
            continue;
        }
        out.push_str(&format!("Step {}: {}\n", step.number(), step.title()));
        for (field, raw) in rows {
            let shown = if raw.is_empty() { "–" } else { raw };
            out.push_str(&format!("  {:<label_width$}  {shown}\n", field.label));
        }
    }
    out
}

/// Normalized payload, one `key = value` per line, flagging raw pass-throughs.
pub fn format_payload(payload: &RequestPayload) -> String {
    if payload.is_empty() {
        return "(empty payload: every field is unset)\n".to_string();
    }
    let key_width = payload.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (key, value) in payload.iter() {
        let rendered = match value {
            PayloadValue::Number(v) => format!("{v}"),
            PayloadValue::Flag(v) => format!("{v}"),
            PayloadValue::Raw(s) => format!("{s:?}  (not a number, sent as text)"),
        };
        out.push_str(&format!("{key:<key_width$} = {rendered}\n"));
    }
    out
}

/// Raw endpoint fields followed by the derived scorecard.
pub fn format_assessment(result: &PredictionResult, view: &AssessmentView, form: &FormState) -> String {
    let mut out = String::new();

    out.push_str("=== Prediction Result ===\n");
    out.push_str(&format!("Status:                {}\n", opt(result.status.as_deref())));
    out.push_str(&format!(
        "Prediction:            {}\n",
        result
            .prediction
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "–".to_string())
    ));
    out.push_str(&format!("Bad Risk Probability:  {}\n", pct(result.probability_bad)));
    out.push_str(&format!("Good Risk Probability: {}\n", pct(result.probability_good)));
    out.push_str(&format!(
        "Threshold:             {}\n",
        result
            .threshold_used
            .map(|t| t.to_string())
            .unwrap_or_else(|| "–".to_string())
    ));
    out.push_str(&format!("Model Version:         {}\n", opt(result.model_version.as_deref())));

    out.push_str("\n=== Credit Assessment ===\n");
    out.push_str(&format!(
        "Credit score: {} / 900 ({}%) | {}\n",
        view.credit_score,
        view.score_percentage,
        view.risk_level.display_name()
    ));
    out.push_str(&format!(
        "Default probability: {}% | Repayment probability: {}%\n",
        view.bad_probability, view.good_probability
    ));

    if !view.key_factors.is_empty() {
        out.push_str("\nKey factors:\n");
        let width = view.key_factors.iter().map(|f| f.label.len()).max().unwrap_or(0);
        for factor in &view.key_factors {
            let marker = if factor.negative { "-" } else { "+" };
            out.push_str(&format!(
                "  {marker} {:<width$}  {:>3}%  {}\n",
                factor.label,
                factor.value,
                bar(factor.value as f64)
            ));
        }
    }

    out.push_str("\nFactor analysis:\n");
    let max = view.factor_max();
    let width = view.factor_analysis.iter().map(|f| f.name.len()).max().unwrap_or(0);
    for factor in &view.factor_analysis {
        out.push_str(&format!(
            "  {:<width$}  {:>3}  {}\n",
            factor.name,
            factor.value.round(),
            bar(factor.relative_width(max))
        ));
    }

    let dist = view.risk_distribution;
    out.push_str(&format!(
        "\nRisk distribution: low {}% | medium {}% | high {}%\n",
        dist.low, dist.medium, dist.high
    ));

    out.push_str(&format!(
        "\nAssessment complete: based on {} data points. The model shows a {}% probability of default risk. {}\n",
        form.filled_count(),
        view.bad_probability,
        view.summary()
    ));

    out
}

fn bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "·".repeat(BAR_WIDTH - filled))
}

fn pct(p: Option<f64>) -> String {
    match p {
        Some(v) if v.is_finite() => format!("{:.2}%", v * 100.0),
        _ => "–".to_string(),
    }
}

fn opt(s: Option<&str>) -> &str {
    s.unwrap_or("–")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::derive;
    use crate::domain::{Prediction, normalize};

    #[test]
    fn review_shows_dash_for_unset_fields() {
        let mut form = FormState::initialize();
        form.set_field("age", "29").unwrap();
        let text = format_review(&form);
        assert!(text.starts_with("Step 1: Basic Info\n"));
        assert!(text.contains("Age (years)"));
        assert!(text.lines().any(|l| l.contains("Annual Income") && l.ends_with('–')));
        assert!(!text.contains("Review & Submit"));
    }

    #[test]
    fn payload_lines_flag_raw_values() {
        let mut form = FormState::initialize();
        form.set_field("age", "29").unwrap();
        form.set_field("total_balance", "unknown").unwrap();
        let text = format_payload(&normalize(&form));
        assert!(text.contains("age           = 29\n"));
        assert!(text.contains("\"unknown\"  (not a number, sent as text)"));
        assert!(format_payload(&RequestPayload::default()).starts_with("(empty payload"));
    }

    #[test]
    fn assessment_report_mentions_score_and_summary() {
        let mut form = FormState::initialize();
        form.set_field("annual_income", "80000").unwrap();
        let result = PredictionResult {
            status: Some("ok".to_string()),
            prediction: Some(Prediction::Label("good".to_string())),
            probability_bad: Some(0.15),
            probability_good: Some(0.85),
            threshold_used: Some(0.5),
            model_version: None,
            ..PredictionResult::default()
        };
        let view = derive(&result, &form);
        let text = format_assessment(&result, &view, &form);
        assert!(text.contains("Bad Risk Probability:  15.00%"));
        assert!(text.contains("Model Version:         –"));
        assert!(text.contains("Credit score: 840 / 900 (93%) | Low Risk"));
        assert!(text.contains("based on 1 data points"));
        assert!(text.contains("strong creditworthiness"));
    }

    #[test]
    fn bar_is_fixed_width() {
        assert_eq!(bar(0.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar(150.0).chars().filter(|c| *c == '█').count(), BAR_WIDTH);
    }
}
