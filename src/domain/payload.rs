//! Form state → request payload.
//!
//! The prediction endpoint expects a flat JSON object of numbers. Unset fields
//! are left out entirely so the model can treat them as unknown; sending `0`
//! would mean something different.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use super::form::FormState;

/// One normalized value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PayloadValue {
    Number(f64),
    /// `"yes"` / `"no"` answers, sent as `1` / `0`.
    Flag(u8),
    /// Input that is neither a yes/no answer nor a number, forwarded unchanged.
    Raw(String),
}

/// Normalized request body, in schema order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestPayload {
    entries: Vec<(&'static str, PayloadValue)>,
}

impl RequestPayload {
    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &PayloadValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Keys whose values fell through to `Raw`.
    pub fn raw_keys(&self) -> Vec<&'static str> {
        self.iter()
            .filter(|(_, v)| matches!(v, PayloadValue::Raw(_)))
            .map(|(k, _)| k)
            .collect()
    }
}

impl Serialize for RequestPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Normalize every non-empty field of `form`.
///
/// Rule order matters: `"yes"`/`"no"` win over number parsing, and anything
/// without a leading finite number is passed through as the raw string.
pub fn normalize(form: &FormState) -> RequestPayload {
    let entries = form
        .iter()
        .filter(|(_, raw)| !raw.is_empty())
        .map(|(field, raw)| (field.key, normalize_value(raw)))
        .collect();
    RequestPayload { entries }
}

fn normalize_value(raw: &str) -> PayloadValue {
    match raw {
        "yes" => PayloadValue::Flag(1),
        "no" => PayloadValue::Flag(0),
        _ => match parse_number(raw) {
            Some(v) => PayloadValue::Number(v),
            None => PayloadValue::Raw(raw.to_string()),
        },
    }
}

/// Parse the leading number of a raw form value, skipping leading whitespace.
///
/// Trailing text is ignored, so `"12,000"` reads as `12` and `"42abc"` as `42`.
/// Values with no leading digits, or that overflow to infinity, give `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let prefix = numeric_prefix(raw.trim_start());
    if prefix.is_empty() {
        return None;
    }
    let v = prefix.parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}

/// Longest `[sign] digits [. digits] [e [sign] digits]` prefix of `s`.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }
    &s[..end]
}
