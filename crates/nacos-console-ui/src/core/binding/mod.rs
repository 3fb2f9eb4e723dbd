//! Generic "create a binding" dialog protocol.
//!
//! # Design
//! - One controller serves every relationship dialog; a [`BindingSpec`] value
//!   describes the fields, the dependent lookup and the message keys.
//! - Locale strings are resolved up front into [`BindingMessages`] and handed to
//!   the controller, so it never reaches into ambient context.
//! - Remote reads go through [`CandidateLookup`]; the write is delegated to the
//!   parent screen through [`BindingHost`].

pub mod controller;
pub mod error;
pub mod form;
pub mod presets;
pub mod search;

pub use controller::{
    BindingDialogController, BindingHost, BindingSettings, BindingSubmission, CandidateLookup,
    ConfirmOutcome, DialogPhase, SearchOutcome, SubmitResponse,
};
pub use error::{BindingError, LookupError, SubmitError};
pub use form::BindingForm;
pub use search::{SearchSequence, SearchTicket};

use crate::i18n::TranslationBundle;

/// Dataset feeding a dialog's dependent dropdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupTarget {
    /// Console users, offered by username.
    Users,
    /// Roles, offered by role name.
    Roles,
}

/// How a field collects its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldInput {
    /// Free text, trimmed before validation.
    Text,
    /// Searchable select backed by the dialog's candidate data source.
    Dependent,
    /// Select over options supplied by the host screen.
    Choice(ChoiceSource),
}

/// Where a [`FieldInput::Choice`] gets its options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChoiceSource {
    /// Namespaces known to the app store.
    Namespaces,
    /// Fixed `(value, label key)` pairs.
    Fixed(&'static [(&'static str, &'static str)]),
}

/// One required field of a binding dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Form key, also the position in the submitted value list.
    pub name: &'static str,
    /// Label translation key.
    pub label_key: &'static str,
    /// Placeholder translation key.
    pub placeholder_key: &'static str,
    /// Translation key of the "field is required" message.
    pub error_key: &'static str,
    /// Input style.
    pub input: FieldInput,
}

/// Static description of one binding dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BindingSpec {
    /// Dialog title translation key.
    pub title_key: &'static str,
    /// Required fields, in submission order.
    pub fields: &'static [FieldSpec],
    /// Dataset behind the dependent field.
    pub lookup: LookupTarget,
    /// Candidate values never offered in the dependent dropdown.
    pub excluded_candidates: &'static [&'static str],
    /// Translation key appended to the submission as the success message.
    pub success_key: &'static str,
    /// Translation key shown when the server reports an existing binding.
    pub conflict_key: &'static str,
}

impl BindingSpec {
    /// The field driven by the dependent lookup, if the dialog has one.
    #[must_use]
    pub fn dependent_field(&self) -> Option<&'static FieldSpec> {
        let fields: &'static [FieldSpec] = self.fields;
        fields
            .iter()
            .find(|field| field.input == FieldInput::Dependent)
    }

    /// Look up a field by form key.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        let fields: &'static [FieldSpec] = self.fields;
        fields.iter().find(|field| field.name == name)
    }
}

/// One selectable option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Submitted value.
    pub value: String,
    /// Display text.
    pub label: String,
}

impl Candidate {
    /// Option whose label is its value.
    #[must_use]
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Locale strings a controller needs, resolved per language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingMessages {
    /// `(field, message)` pairs in submission order.
    pub required: Vec<(&'static str, String)>,
    /// Trailing success message passed along with the submission.
    pub success: String,
    /// Blocking alert text for a conflict response.
    pub conflict: String,
    /// Inline notice when a dependent lookup fails.
    pub search_failed: String,
    /// Inline notice when the submission never got a response.
    pub submit_failed: String,
    /// Field error for a value the dependent dropdown never offers.
    pub disallowed: String,
}

impl BindingMessages {
    /// Resolve every message key in `spec` against `bundle`.
    #[must_use]
    pub fn resolve(spec: &BindingSpec, bundle: &TranslationBundle) -> Self {
        Self {
            required: spec
                .fields
                .iter()
                .map(|field| (field.name, bundle.text(field.error_key, field.name)))
                .collect(),
            success: bundle.text(spec.success_key, ""),
            conflict: bundle.text(spec.conflict_key, ""),
            search_failed: bundle.text("common.search_failed", ""),
            submit_failed: bundle.text("common.submit_failed", ""),
            disallowed: bundle.text("common.value_not_allowed", ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::presets::{ROLE_PERMISSION, USER_ROLE};
    use super::*;
    use crate::i18n::LocaleCode;

    #[test]
    fn each_preset_has_exactly_one_dependent_field() {
        for spec in [USER_ROLE, ROLE_PERMISSION] {
            let dependent = spec
                .fields
                .iter()
                .filter(|field| field.input == FieldInput::Dependent)
                .count();
            assert_eq!(dependent, 1);
        }
        assert_eq!(USER_ROLE.dependent_field().map(|f| f.name), Some("username"));
        assert_eq!(ROLE_PERMISSION.dependent_field().map(|f| f.name), Some("role"));
    }

    #[test]
    fn messages_follow_field_order() {
        let bundle = TranslationBundle::new(LocaleCode::EnUs);
        let messages = BindingMessages::resolve(&ROLE_PERMISSION, &bundle);
        let order: Vec<_> = messages.required.iter().map(|(name, _)| *name).collect();
        assert_eq!(order, ["role", "resource", "action"]);
        assert!(messages.required.iter().all(|(_, text)| !text.is_empty()));
        assert_eq!(messages.success, bundle.text("permissions.add_success", ""));
    }

    #[test]
    fn messages_switch_with_locale() {
        let en = BindingMessages::resolve(&USER_ROLE, &TranslationBundle::new(LocaleCode::EnUs));
        let zh = BindingMessages::resolve(&USER_ROLE, &TranslationBundle::new(LocaleCode::ZhCn));
        assert_ne!(en.conflict, zh.conflict);
    }
}
