//! Console configuration loaded from the embedded `config/console.json`.
//!
//! # Design
//! - Every field has a default so partial documents stay valid.
//! - Validation runs once at load; callers only ever see checked values.

use serde::Deserialize;
use thiserror::Error;

const EMBEDDED_CONFIG: &str = include_str!("../config/console.json");

/// Errors raised while loading or validating console configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document was not valid JSON for the expected shape.
    #[error("console config is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A field carried a value outside its accepted range.
    #[error("invalid value for '{field}': {message}")]
    InvalidField {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Human-readable reason.
        message: &'static str,
    },
}

/// Top-level console configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Base URL prefixed to every API path.
    pub api_base_url: String,
    /// Session guard tuning.
    pub session: SessionConfig,
    /// Dependent-field lookup paging.
    pub lookup: LookupConfig,
    /// HTTP status the server uses to report an existing binding.
    pub conflict_status: u16,
}

/// Session guard settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Largest `beforeunload` → `unload` gap, in milliseconds, still treated
    /// as a window close.
    pub close_gap_ms: i64,
}

/// Initial page requested when a binding dialog first activates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// One-based page number.
    pub page_no: u32,
    /// Page size.
    pub page_size: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: "/nacos".to_string(),
            session: SessionConfig::default(),
            lookup: LookupConfig::default(),
            conflict_status: 400,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { close_gap_ms: 5 }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            page_no: 1,
            page_size: 100,
        }
    }
}

impl ConsoleConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the JSON is malformed or a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration shipped with the bundle, falling back to
    /// defaults when the embedded document is unusable.
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_json(EMBEDDED_CONFIG).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "embedded console config rejected; using defaults");
            Self::default()
        })
    }

    /// Check value ranges.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidField`] for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.close_gap_ms < 0 {
            return Err(ConfigError::InvalidField {
                field: "session.close_gap_ms",
                message: "must be zero or positive",
            });
        }
        if self.lookup.page_no == 0 {
            return Err(ConfigError::InvalidField {
                field: "lookup.page_no",
                message: "pages are numbered from 1",
            });
        }
        if self.lookup.page_size == 0 {
            return Err(ConfigError::InvalidField {
                field: "lookup.page_size",
                message: "must be at least 1",
            });
        }
        if !(400..500).contains(&self.conflict_status) {
            return Err(ConfigError::InvalidField {
                field: "conflict_status",
                message: "must be a 4xx status",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_document_matches_defaults() {
        assert_eq!(ConsoleConfig::embedded(), ConsoleConfig::default());
    }

    #[test]
    fn partial_documents_keep_defaults() {
        let config = ConsoleConfig::from_json(r#"{"session":{"close_gap_ms":40}}"#)
            .expect("partial config parses");
        assert_eq!(config.session.close_gap_ms, 40);
        assert_eq!(config.lookup.page_size, 100);
        assert_eq!(config.conflict_status, 400);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = ConsoleConfig::from_json(r#"{"lookup":{"page_size":0}}"#)
            .expect_err("zero page size rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidField {
                field: "lookup.page_size",
                ..
            }
        ));
        assert!(ConsoleConfig::from_json(r#"{"session":{"close_gap_ms":-1}}"#).is_err());
        assert!(ConsoleConfig::from_json(r#"{"conflict_status":200}"#).is_err());
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = ConsoleConfig::from_json("{").expect_err("truncated json");
        assert!(matches!(err, ConfigError::Malformed(_)));
    }
}
