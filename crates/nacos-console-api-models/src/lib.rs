#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(unused, unreachable_pub, clippy::all, clippy::pedantic)]
//! Shared HTTP DTOs for the Nacos console API.
//!
//! The console only reads a handful of auth/console endpoints, so the
//! contract lives here as plain serde types. Field names follow the server's
//! camelCase wire format.
use serde::{Deserialize, Serialize};

/// Role name reserved for the built-in administrator; never offered for binding.
pub const ADMIN_ROLE: &str = "ROLE_ADMIN";

/// Pagination request accepted by every list endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// One-based page number.
    pub page_no: u32,
    /// Maximum number of items in the page.
    pub page_size: u32,
}

impl PageQuery {
    /// Build a query for the given page.
    #[must_use]
    pub const fn new(page_no: u32, page_size: u32) -> Self {
        Self { page_no, page_size }
    }
}

/// One page of entities returned by a list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Total number of matching entities across all pages.
    #[serde(default)]
    pub total_count: u64,
    /// Page number echoed back by the server.
    #[serde(default)]
    pub page_number: u32,
    /// Number of pages available for the query.
    #[serde(default)]
    pub pages_available: u32,
    /// Entities in this page.
    #[serde(default = "Vec::new")]
    pub page_items: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            total_count: 0,
            page_number: 0,
            pages_available: 0,
            page_items: Vec::new(),
        }
    }
}

/// Console user row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserEntry {
    /// Login name.
    pub username: String,
}

/// Role assignment row (`role` granted to `username`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleEntry {
    /// Role name.
    pub role: String,
    /// User the role is bound to.
    #[serde(default)]
    pub username: String,
}

/// Namespace descriptor returned by the console endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceEntry {
    /// Namespace id; empty for the public namespace.
    #[serde(default)]
    pub namespace: String,
    /// Display name.
    #[serde(default)]
    pub namespace_show_name: String,
}

impl NamespaceEntry {
    /// Permission resource covering every group and data id in the namespace.
    #[must_use]
    pub fn resource_pattern(&self) -> String {
        format!("{}:*:*", self.namespace)
    }

    /// Label shown in resource pickers.
    #[must_use]
    pub fn display_label(&self) -> String {
        if self.namespace.is_empty() {
            self.namespace_show_name.clone()
        } else {
            format!("{} ({})", self.namespace_show_name, self.namespace)
        }
    }
}

/// Generic console envelope (`{code, message, data}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RestResult<T> {
    /// Application status code (mirrors HTTP status).
    pub code: u16,
    /// Optional human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Payload when present.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_decodes_camel_case_payload() {
        let raw = r#"{
            "totalCount": 2,
            "pageNumber": 1,
            "pagesAvailable": 1,
            "pageItems": [{"username": "nacos"}, {"username": "ops"}]
        }"#;
        let page: Page<UserEntry> = serde_json::from_str(raw).expect("page decodes");
        assert_eq!(page.total_count, 2);
        assert_eq!(page.page_items[1].username, "ops");
    }

    #[test]
    fn page_tolerates_missing_items() {
        let page: Page<RoleEntry> = serde_json::from_str("{}").expect("empty page decodes");
        assert!(page.page_items.is_empty());
    }

    #[test]
    fn page_query_serializes_wire_names() {
        let json = serde_json::to_string(&PageQuery::new(1, 100)).expect("query encodes");
        assert_eq!(json, r#"{"pageNo":1,"pageSize":100}"#);
    }

    #[test]
    fn namespace_labels_and_resources() {
        let public = NamespaceEntry {
            namespace: String::new(),
            namespace_show_name: "public".to_string(),
        };
        let dev = NamespaceEntry {
            namespace: "dev-1".to_string(),
            namespace_show_name: "dev".to_string(),
        };
        assert_eq!(public.resource_pattern(), ":*:*");
        assert_eq!(public.display_label(), "public");
        assert_eq!(dev.resource_pattern(), "dev-1:*:*");
        assert_eq!(dev.display_label(), "dev (dev-1)");
    }

    #[test]
    fn rest_result_decodes_namespace_list() {
        let raw = r#"{"code":200,"message":null,"data":[{"namespace":"","namespaceShowName":"public"}]}"#;
        let result: RestResult<Vec<NamespaceEntry>> =
            serde_json::from_str(raw).expect("envelope decodes");
        assert_eq!(result.code, 200);
        assert_eq!(result.data.map(|items| items.len()), Some(1));
    }
}
