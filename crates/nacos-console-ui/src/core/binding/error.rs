//! Binding dialog error types.

use thiserror::Error;

/// Misuse of a binding dialog's form API.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindingError {
    /// The field is not part of the dialog's spec.
    #[error("unknown binding field '{field}'")]
    UnknownField {
        /// Offending field key.
        field: String,
    },
}

/// Dependent lookup did not produce a result.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("candidate lookup failed: {detail}")]
pub struct LookupError {
    /// Transport or decoding detail.
    pub detail: String,
}

/// Submission did not reach the server or its reply was unreadable.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("binding submission failed: {detail}")]
pub struct SubmitError {
    /// Transport or decoding detail.
    pub detail: String,
}
