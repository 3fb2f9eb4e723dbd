//! Authentication primitives shared across the UI.
//!
//! # Design
//! - Keep auth state as simple data so callers can store/clear it without side effects.
//! - Treat blank tokens as unauthenticated at the call site.

/// Storage key holding the access token written on login.
pub const TOKEN_KEY: &str = "token";

/// Access credential presented on every API call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
    /// Opaque token issued by the login endpoint.
    pub token: String,
    /// User the token was issued to, when known.
    pub username: Option<String>,
}

impl AccessToken {
    /// Wrap a raw token value.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: None,
        }
    }

    /// Whether this credential can authenticate a request.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

/// Read a persisted token value, discarding blanks.
#[must_use]
pub fn credential_from_storage(value: Option<String>) -> Option<AccessToken> {
    value
        .map(AccessToken::new)
        .filter(AccessToken::has_credentials)
}
