//! Core, DOM-free primitives and helpers for the console UI.
pub mod auth;
pub mod binding;
pub mod endpoints;
pub mod navigation;
pub mod session;
pub mod store;
