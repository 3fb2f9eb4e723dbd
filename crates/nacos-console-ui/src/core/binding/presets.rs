//! Concrete binding dialogs expressed as configuration.

use super::{BindingSpec, Candidate, ChoiceSource, FieldInput, FieldSpec, LookupTarget};
use nacos_console_api_models::{ADMIN_ROLE, NamespaceEntry};

/// Actions a permission may grant. Read-only and write-only are not offered.
pub const PERMISSION_ACTIONS: &[(&str, &str)] = &[("rw", "permissions.read_write")];

/// Bind an existing user to a (possibly new) role.
pub const USER_ROLE: BindingSpec = BindingSpec {
    title_key: "roles.bind_title",
    fields: &[
        FieldSpec {
            name: "role",
            label_key: "roles.role",
            placeholder_key: "roles.role_placeholder",
            error_key: "roles.role_error",
            input: FieldInput::Text,
        },
        FieldSpec {
            name: "username",
            label_key: "roles.username",
            placeholder_key: "roles.username_placeholder",
            error_key: "roles.username_error",
            input: FieldInput::Dependent,
        },
    ],
    lookup: LookupTarget::Users,
    excluded_candidates: &[],
    success_key: "roles.add_success",
    conflict_key: "roles.bind_conflict",
};

/// Grant a role an action on a namespace.
pub const ROLE_PERMISSION: BindingSpec = BindingSpec {
    title_key: "permissions.add_title",
    fields: &[
        FieldSpec {
            name: "role",
            label_key: "permissions.role",
            placeholder_key: "permissions.role_placeholder",
            error_key: "permissions.role_error",
            input: FieldInput::Dependent,
        },
        FieldSpec {
            name: "resource",
            label_key: "permissions.resource",
            placeholder_key: "permissions.resource_placeholder",
            error_key: "permissions.resource_error",
            input: FieldInput::Choice(ChoiceSource::Namespaces),
        },
        FieldSpec {
            name: "action",
            label_key: "permissions.action",
            placeholder_key: "permissions.action_placeholder",
            error_key: "permissions.action_error",
            input: FieldInput::Choice(ChoiceSource::Fixed(PERMISSION_ACTIONS)),
        },
    ],
    lookup: LookupTarget::Roles,
    excluded_candidates: &[ADMIN_ROLE],
    success_key: "permissions.add_success",
    conflict_key: "permissions.conflict",
};

/// Resource options covering each namespace as a whole.
#[must_use]
pub fn namespace_choices(namespaces: &[NamespaceEntry]) -> Vec<Candidate> {
    namespaces
        .iter()
        .map(|entry| Candidate {
            value: entry.resource_pattern(),
            label: entry.display_label(),
        })
        .collect()
}
