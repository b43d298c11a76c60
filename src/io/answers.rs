//! Form answers supplied on the command line or in a JSON file.
//!
//! Both sources produce raw `(key, value)` strings that go through the same
//! `FormSession::set_field` path as keyboard input, so unknown keys fail the
//! same way.

use std::fs::File;
use std::path::Path;

use serde_json::Value;

use crate::error::AppError;
use crate::wizard::FormSession;

/// Parse one `key=value` argument. The value may be empty or contain `=`.
pub fn parse_assignment(arg: &str) -> Result<(String, String), AppError> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| AppError::new(2, format!("Expected key=value, got '{arg}'.")))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(AppError::new(2, format!("Missing field name in '{arg}'.")));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Read a JSON object of answers.
///
/// Strings are kept as typed, numbers use their JSON spelling, booleans map to
/// `"yes"`/`"no"`, and `null` leaves the field unset.
pub fn read_answers_json(path: &Path) -> Result<Vec<(String, String)>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open answers file '{}': {e}", path.display())))?;
    let value: Value = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid answers JSON '{}': {e}", path.display())))?;
    answers_from_value(value)
}

fn answers_from_value(value: Value) -> Result<Vec<(String, String)>, AppError> {
    let Value::Object(map) = value else {
        return Err(AppError::new(2, "Answers JSON must be an object of field: value pairs."));
    };

    let mut out = Vec::with_capacity(map.len());
    for (key, v) in map {
        let raw = match v {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(true) => "yes".to_string(),
            Value::Bool(false) => "no".to_string(),
            Value::Null => String::new(),
            Value::Array(_) | Value::Object(_) => {
                return Err(AppError::new(2, format!("Answer for '{key}' must be a string, number, or boolean.")));
            }
        };
        out.push((key, raw));
    }
    Ok(out)
}

/// Apply answers in order; later answers for the same key win.
pub fn apply_answers(session: &mut FormSession, answers: &[(String, String)]) -> Result<(), AppError> {
    for (key, value) in answers {
        session.set_field(key, value.as_str())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;

    #[test]
    fn assignment_splits_on_first_equals() {
        assert_eq!(
            parse_assignment("age=30").unwrap(),
            ("age".to_string(), "30".to_string())
        );
        assert_eq!(
            parse_assignment("total_balance=a=b").unwrap(),
            ("total_balance".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_assignment("age=").unwrap(),
            ("age".to_string(), String::new())
        );
        assert_eq!(parse_assignment("age").unwrap_err().exit_code(), 2);
        assert!(parse_assignment("=5").is_err());
    }

    #[test]
    fn json_values_map_to_raw_strings() {
        let answers = answers_from_value(json!({
            "age": 30,
            "annual_income": "80000",
            "high_credit_util_75": true,
            "util_50_plus": false,
            "satisfied_pct": 92.5,
            "total_balance": null
        }))
        .unwrap();
        let get = |k: &str| answers.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());
        assert_eq!(get("age"), Some("30"));
        assert_eq!(get("annual_income"), Some("80000"));
        assert_eq!(get("high_credit_util_75"), Some("yes"));
        assert_eq!(get("util_50_plus"), Some("no"));
        assert_eq!(get("satisfied_pct"), Some("92.5"));
        assert_eq!(get("total_balance"), Some(""));
    }

    #[test]
    fn json_must_be_flat_object() {
        assert!(answers_from_value(json!([1, 2])).is_err());
        assert!(answers_from_value(json!({"age": [30]})).is_err());
    }

    #[test]
    fn reads_file_and_rejects_unknown_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"age": 45, "shoe_size": 9}}"#).unwrap();

        let answers = read_answers_json(file.path()).unwrap();
        let mut session = FormSession::new();
        let err = apply_answers(&mut session, &answers).unwrap_err();
        assert!(err.to_string().contains("shoe_size"));
        assert_eq!(session.form().value("age"), "45");
    }
}
