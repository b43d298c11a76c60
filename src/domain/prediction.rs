//! Response body of the prediction endpoint.
//!
//! Nothing here is validated: every field is optional so a partial body still
//! deserializes, and whatever is missing shows up as blank downstream. A field
//! of the wrong JSON type is coerced where that makes sense and dropped
//! otherwise; only a body that is not JSON at all is an error.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Model decision, which the endpoint returns either as a label or a class code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prediction {
    Label(String),
    Code(serde_json::Number),
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Label(s) => write!(f, "{s}"),
            Prediction::Code(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_prediction")]
    pub prediction: Option<Prediction>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub probability_bad: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub probability_good: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub threshold_used: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub model_version: Option<String>,
    /// Fields we do not read, kept so exports reproduce the full body.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Numbers as-is, numeric strings parsed, booleans as 1/0. Anything else is `None`.
fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        Some(Value::Bool(b)) => Some(if b { 1.0 } else { 0.0 }),
        _ => None,
    })
}

/// Strings as-is; any other non-null value in its JSON spelling.
fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn lenient_prediction<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Prediction>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(Prediction::Code(n)),
        Some(Value::String(s)) => Some(Prediction::Label(s)),
        Some(other) => Some(Prediction::Label(other.to_string())),
    })
}

impl PredictionResult {
    pub fn bad(&self) -> f64 {
        self.probability_bad.unwrap_or(0.0)
    }

    pub fn good(&self) -> f64 {
        self.probability_good.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_body() {
        let body = r#"{
            "status": "ok",
            "prediction": "good",
            "probability_bad": 0.15,
            "probability_good": 0.85,
            "threshold_used": 0.5,
            "model_version": "lr-1.2"
        }"#;
        let result: PredictionResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.status.as_deref(), Some("ok"));
        assert_eq!(result.prediction, Some(Prediction::Label("good".to_string())));
        assert_eq!(result.bad(), 0.15);
        assert_eq!(result.threshold_used, Some(0.5));
        assert!(result.extra.is_empty());
    }

    #[test]
    fn numeric_prediction_displays_as_number() {
        let result: PredictionResult = serde_json::from_str(r#"{"prediction": 1}"#).unwrap();
        assert_eq!(result.prediction.unwrap().to_string(), "1");
    }

    #[test]
    fn missing_fields_read_as_none() {
        let result: PredictionResult =
            serde_json::from_str(r#"{"probability_bad": 0.7, "request_id": "abc"}"#).unwrap();
        assert_eq!(result.status, None);
        assert_eq!(result.good(), 0.0);
        assert_eq!(result.extra.get("request_id"), Some(&serde_json::json!("abc")));
    }

    #[test]
    fn mistyped_fields_are_coerced_not_fatal() {
        let body = r#"{
            "status": "ok",
            "prediction": true,
            "probability_bad": "0.3",
            "probability_good": 0.7,
            "threshold_used": "0.5",
            "model_version": 2
        }"#;
        let result: PredictionResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.bad(), 0.3);
        assert_eq!(result.threshold_used, Some(0.5));
        assert_eq!(result.model_version.as_deref(), Some("2"));
        assert_eq!(result.prediction.unwrap().to_string(), "true");
    }

    #[test]
    fn unusable_values_read_as_none() {
        let body = r#"{"probability_bad": "high", "threshold_used": [0.5], "status": null}"#;
        let result: PredictionResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.probability_bad, None);
        assert_eq!(result.threshold_used, None);
        assert_eq!(result.status, None);
        assert!(result.extra.is_empty());
    }
}
