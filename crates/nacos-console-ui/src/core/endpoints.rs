//! Remote API paths and payload-to-candidate mapping.
//!
//! # Design
//! - Build request URLs as plain strings so they are tested without a browser.
//! - The credential rides along as the `accessToken` query parameter.

use crate::core::auth::AccessToken;
use crate::core::binding::{Candidate, LookupTarget};
use nacos_console_api_models::{Page, PageQuery, RoleEntry, UserEntry};

/// One call against the console API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// Paged user list.
    Users(PageQuery),
    /// Username search.
    UserSearch(&'a str),
    /// Paged role bindings.
    Roles(PageQuery),
    /// Role name search.
    RoleSearch(&'a str),
    /// Bind `role` to `username`.
    BindRole {
        /// Role name.
        role: &'a str,
        /// Existing user.
        username: &'a str,
    },
    /// Grant `role` an `action` on `resource`.
    GrantPermission {
        /// Role name.
        role: &'a str,
        /// Resource pattern, `namespace:*:*`.
        resource: &'a str,
        /// Action code.
        action: &'a str,
    },
    /// Namespace list.
    Namespaces,
}

impl<'a> Endpoint<'a> {
    /// First page of the dataset behind `target`.
    #[must_use]
    pub const fn first_page(target: LookupTarget, page: PageQuery) -> Self {
        match target {
            LookupTarget::Users => Self::Users(page),
            LookupTarget::Roles => Self::Roles(page),
        }
    }

    /// Free-text search over the dataset behind `target`.
    #[must_use]
    pub const fn search(target: LookupTarget, query: &'a str) -> Self {
        match target {
            LookupTarget::Users => Self::UserSearch(query),
            LookupTarget::Roles => Self::RoleSearch(query),
        }
    }

    /// Path relative to the API base URL.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Users(_) => "/v1/auth/users",
            Self::UserSearch(_) => "/v1/auth/users/search",
            Self::Roles(_) | Self::BindRole { .. } => "/v1/auth/roles",
            Self::RoleSearch(_) => "/v1/auth/roles/search",
            Self::GrantPermission { .. } => "/v1/auth/permissions",
            Self::Namespaces => "/v1/console/namespaces",
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        match *self {
            Self::Users(page) | Self::Roles(page) => vec![
                ("pageNo", page.page_no.to_string()),
                ("pageSize", page.page_size.to_string()),
            ],
            Self::UserSearch(query) => vec![("username", query.to_string())],
            Self::RoleSearch(query) => vec![("role", query.to_string())],
            Self::BindRole { role, username } => {
                vec![("role", role.to_string()), ("username", username.to_string())]
            }
            Self::GrantPermission {
                role,
                resource,
                action,
            } => vec![
                ("role", role.to_string()),
                ("resource", resource.to_string()),
                ("action", action.to_string()),
            ],
            Self::Namespaces => Vec::new(),
        }
    }
}

/// Full request URL for `endpoint`, with the credential appended when present.
#[must_use]
pub fn build_url(base_url: &str, endpoint: &Endpoint<'_>, credential: Option<&AccessToken>) -> String {
    let mut params = endpoint.query();
    if let Some(token) = credential.filter(|token| token.has_credentials()) {
        params.push(("accessToken", token.token.clone()));
    }
    let base = base_url.trim_end_matches('/');
    let path = endpoint.path();
    if params.is_empty() {
        return format!("{base}{path}");
    }
    let query = params
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{base}{path}?{query}")
}

/// Usernames from a user page.
#[must_use]
pub fn user_candidates(page: Page<UserEntry>) -> Vec<Candidate> {
    page.page_items
        .into_iter()
        .map(|entry| Candidate::plain(entry.username))
        .collect()
}

/// Distinct role names from a role-binding page, in first-seen order.
#[must_use]
pub fn role_candidates(page: Page<RoleEntry>) -> Vec<Candidate> {
    bound_roles(&page.page_items)
}

/// Distinct role names among `bindings`, in first-seen order.
#[must_use]
pub fn bound_roles(bindings: &[RoleEntry]) -> Vec<Candidate> {
    distinct(bindings.iter().map(|entry| entry.role.as_str()))
}

/// Distinct usernames among `bindings`, in first-seen order.
#[must_use]
pub fn bound_users(bindings: &[RoleEntry]) -> Vec<Candidate> {
    distinct(
        bindings
            .iter()
            .map(|entry| entry.username.as_str())
            .filter(|name| !name.is_empty()),
    )
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<Candidate> {
    let mut seen = Vec::<&str>::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen.into_iter().map(Candidate::plain).collect()
}

/// Candidates from a plain search result.
#[must_use]
pub fn search_candidates(values: Vec<String>) -> Vec<Candidate> {
    values.into_iter().map(Candidate::plain).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_uses_page_params_and_token() {
        let token = AccessToken::new("t0k");
        let url = build_url(
            "/nacos/",
            &Endpoint::first_page(LookupTarget::Users, PageQuery::new(1, 100)),
            Some(&token),
        );
        assert_eq!(url, "/nacos/v1/auth/users?pageNo=1&pageSize=100&accessToken=t0k");
    }

    #[test]
    fn search_queries_are_encoded() {
        let url = build_url("/nacos", &Endpoint::search(LookupTarget::Roles, "ops team"), None);
        assert_eq!(url, "/nacos/v1/auth/roles/search?role=ops%20team");
    }

    #[test]
    fn writes_carry_every_value() {
        let grant = Endpoint::GrantPermission {
            role: "ROLE_DEV",
            resource: "prod:*:*",
            action: "rw",
        };
        assert_eq!(
            build_url("", &grant, None),
            "/v1/auth/permissions?role=ROLE_DEV&resource=prod%3A%2A%3A%2A&action=rw"
        );
        let bind = Endpoint::BindRole {
            role: "ROLE_DEV",
            username: "nacos",
        };
        assert_eq!(build_url("", &bind, None), "/v1/auth/roles?role=ROLE_DEV&username=nacos");
    }

    #[test]
    fn blank_token_is_not_sent() {
        let blank = AccessToken::new(" ");
        assert_eq!(
            build_url("/nacos", &Endpoint::Namespaces, Some(&blank)),
            "/nacos/v1/console/namespaces"
        );
    }

    #[test]
    fn role_pages_collapse_to_distinct_roles() {
        let page = Page {
            total_count: 3,
            page_number: 1,
            pages_available: 1,
            page_items: vec![
                RoleEntry {
                    role: "ROLE_DEV".to_string(),
                    username: "a".to_string(),
                },
                RoleEntry {
                    role: "ROLE_OPS".to_string(),
                    username: "b".to_string(),
                },
                RoleEntry {
                    role: "ROLE_DEV".to_string(),
                    username: "c".to_string(),
                },
            ],
        };
        let values: Vec<_> = role_candidates(page).into_iter().map(|c| c.value).collect();
        assert_eq!(values, ["ROLE_DEV", "ROLE_OPS"]);
    }

    #[test]
    fn bindings_split_into_distinct_users_and_roles() {
        let bindings = [("ROLE_DEV", "alice"), ("ROLE_OPS", "alice"), ("ROLE_DEV", "")]
            .map(|(role, username)| RoleEntry {
                role: role.to_string(),
                username: username.to_string(),
            });
        let users: Vec<_> = bound_users(&bindings).into_iter().map(|c| c.value).collect();
        let roles: Vec<_> = bound_roles(&bindings).into_iter().map(|c| c.value).collect();
        assert_eq!(users, ["alice"]);
        assert_eq!(roles, ["ROLE_DEV", "ROLE_OPS"]);
    }
}
