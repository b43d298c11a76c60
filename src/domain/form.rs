//! Raw form values, one string per schema field.

use thiserror::Error;

use super::schema::{FIELDS, FieldDescriptor, position};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown form field '{0}'")]
    InvalidKey(String),
}

/// Current value of every field, keyed by schema position.
///
/// Storing values by position rather than in a map keeps the key set equal to
/// the schema for the lifetime of the form. An empty string means "unset".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    values: Vec<String>,
}

impl FormState {
    /// A form with every field unset.
    pub fn initialize() -> Self {
        Self {
            values: vec![String::new(); FIELDS.len()],
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        position(key).map(|idx| self.values[idx].as_str())
    }

    /// Value of `key`, or `""` for unknown keys.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Replace the value of one field. Values are stored as-is.
    pub fn set_field(&mut self, key: &str, raw: impl Into<String>) -> Result<(), FormError> {
        let idx = position(key).ok_or_else(|| FormError::InvalidKey(key.to_string()))?;
        self.values[idx] = raw.into();
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::initialize();
    }

    /// Fields paired with their raw values, in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static FieldDescriptor, &str)> {
        FIELDS.iter().zip(self.values.iter().map(String::as_str))
    }

    pub fn filled_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_empty()).count()
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::initialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_leaves_every_field_empty() {
        let form = FormState::initialize();
        for f in FIELDS {
            assert_eq!(form.get(f.key), Some(""));
        }
        assert_eq!(form.filled_count(), 0);
    }

    #[test]
    fn set_field_touches_only_that_key() {
        let mut form = FormState::initialize();
        form.set_field("age", "42").unwrap();
        assert_eq!(form.value("age"), "42");
        assert_eq!(form.filled_count(), 1);
        for (f, v) in form.iter() {
            if f.key != "age" {
                assert_eq!(v, "", "{} changed", f.key);
            }
        }
    }

    #[test]
    fn set_field_accepts_garbage() {
        let mut form = FormState::initialize();
        form.set_field("annual_income", "lots").unwrap();
        assert_eq!(form.value("annual_income"), "lots");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut form = FormState::initialize();
        let err = form.set_field("favourite_colour", "blue").unwrap_err();
        assert_eq!(err, FormError::InvalidKey("favourite_colour".to_string()));
        assert_eq!(form, FormState::initialize());
    }

    #[test]
    fn reset_clears_all_values() {
        let mut form = FormState::initialize();
        form.set_field("age", "30").unwrap();
        form.set_field("util_50_plus", "yes").unwrap();
        form.reset();
        assert_eq!(form, FormState::initialize());
    }
}
