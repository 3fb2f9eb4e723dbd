//! Feature pages.
pub(crate) mod authority;
