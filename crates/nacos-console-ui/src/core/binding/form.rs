//! Binding dialog form state.
//!
//! # Design
//! - Keep inputs as strings; the dialog only checks presence.
//! - Errors are keyed per field and never leak across fields.
//! - Validation is all-or-nothing: every missing field is flagged in one pass.

use std::collections::BTreeMap;

/// Field values and per-field errors for one dialog instance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindingForm {
    fields: BTreeMap<String, String>,
    errors: BTreeMap<String, String>,
}

impl BindingForm {
    /// Replace one field's value and clear that field's error.
    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.fields.insert(field.to_string(), value.into());
        self.errors.remove(field);
    }

    /// Current value of `field` (empty when never set).
    #[must_use]
    pub fn value(&self, field: &str) -> &str {
        self.fields.get(field).map_or("", String::as_str)
    }

    /// Current error attached to `field`.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Every field currently carrying an error.
    #[must_use]
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Attach `message` to `field` without touching its value.
    pub fn set_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
    }

    /// Replace `field`'s error with `to` when it currently reads `from`.
    pub fn relabel(&mut self, field: &str, from: &str, to: &str) {
        if let Some(error) = self.errors.get_mut(field) {
            if error.as_str() == from {
                *error = to.to_string();
            }
        }
    }

    /// Whether no value or error has been recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.fields.is_empty() && self.errors.is_empty()
    }

    /// Check every required field.
    ///
    /// Returns the trimmed values in `required` order when all are present.
    /// Otherwise attaches each field's message and returns the missing keys.
    pub fn validate(
        &mut self,
        required: &[(&'static str, String)],
    ) -> Result<Vec<String>, Vec<String>> {
        let mut values = Vec::with_capacity(required.len());
        let mut missing = Vec::new();
        for (field, message) in required {
            let value = self.value(field).trim().to_string();
            if value.is_empty() {
                self.errors.insert((*field).to_string(), message.clone());
                missing.push((*field).to_string());
            } else {
                values.push(value);
            }
        }
        if missing.is_empty() {
            Ok(values)
        } else {
            Err(missing)
        }
    }

    /// Drop every value and error.
    pub fn reset(&mut self) {
        self.fields.clear();
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(names: &[&'static str]) -> Vec<(&'static str, String)> {
        names
            .iter()
            .map(|name| (*name, format!("{name} is required")))
            .collect()
    }

    #[test]
    fn every_missing_subset_flags_exactly_the_missing_fields() {
        let names = ["role", "resource", "action"];
        let required = required(&names);
        for mask in 0u8..8 {
            let mut form = BindingForm::default();
            for (index, name) in names.iter().enumerate() {
                if mask & (1 << index) != 0 {
                    form.set(name, "x");
                }
            }
            let result = form.validate(&required);
            let expected_missing: Vec<String> = names
                .iter()
                .enumerate()
                .filter(|(index, _)| mask & (1 << *index) == 0)
                .map(|(_, name)| (*name).to_string())
                .collect();
            if expected_missing.is_empty() {
                assert_eq!(result, Ok(vec!["x".to_string(); 3]));
                assert!(form.errors().is_empty());
            } else {
                assert_eq!(result, Err(expected_missing.clone()));
                let flagged: Vec<String> = form.errors().keys().cloned().collect();
                let mut expected_sorted = expected_missing;
                expected_sorted.sort();
                assert_eq!(flagged, expected_sorted);
            }
        }
    }

    #[test]
    fn whitespace_counts_as_missing_and_values_are_trimmed() {
        let required = required(&["role", "username"]);
        let mut form = BindingForm::default();
        form.set("role", "   ");
        form.set("username", " nacos ");
        assert_eq!(form.validate(&required), Err(vec!["role".to_string()]));
        form.set("role", " ROLE_DEV ");
        assert_eq!(
            form.validate(&required),
            Ok(vec!["ROLE_DEV".to_string(), "nacos".to_string()])
        );
    }

    #[test]
    fn editing_clears_only_that_fields_error() {
        let required = required(&["role", "username"]);
        let mut form = BindingForm::default();
        assert!(form.validate(&required).is_err());
        form.set("role", "ROLE_DEV");
        assert_eq!(form.error("role"), None);
        assert_eq!(form.error("username"), Some("username is required"));
    }

    #[test]
    fn reset_returns_to_clean() {
        let mut form = BindingForm::default();
        form.set("role", "ROLE_DEV");
        let _ = form.validate(&required(&["username"]));
        assert!(!form.is_clean());
        form.reset();
        assert!(form.is_clean());
        assert_eq!(form.value("role"), "");
    }

    #[test]
    fn relabel_rewords_only_matching_errors() {
        let mut form = BindingForm::default();
        form.set("role", "ROLE_ADMIN");
        form.set_error("role", "not allowed");
        let _ = form.validate(&required(&["username"]));
        form.relabel("role", "not allowed", "不允许");
        form.relabel("username", "something else", "x");
        assert_eq!(form.error("role"), Some("不允许"));
        assert_eq!(form.error("username"), Some("username is required"));
        assert_eq!(form.value("role"), "ROLE_ADMIN");
    }
}
