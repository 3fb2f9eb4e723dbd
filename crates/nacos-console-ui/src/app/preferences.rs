//! Persistence and environment helpers for the app shell.
//!
//! Values are stored as raw strings so they interoperate with whatever the
//! login page and earlier console versions wrote.

use crate::core::auth::{AccessToken, TOKEN_KEY, credential_from_storage};
use crate::core::session::{SessionStore, StorageError};
use crate::i18n::{LANGUAGE_KEY, LanguagePreference, LocaleCode, resolve_language};
use gloo::console;
use gloo::utils::window;
use web_sys::Storage;

fn local_storage() -> Result<Storage, StorageError> {
    match window().local_storage() {
        Ok(Some(storage)) => Ok(storage),
        Ok(None) => Err(StorageError {
            detail: "localStorage is disabled".to_string(),
        }),
        Err(err) => Err(StorageError {
            detail: format!("{err:?}"),
        }),
    }
}

fn get_storage(key: &'static str) -> Option<String> {
    let storage = local_storage()
        .map_err(|err| log_storage_error("get", key, &err.detail))
        .ok()?;
    match storage.get_item(key) {
        Ok(value) => value,
        Err(err) => {
            log_storage_error("get", key, &format!("{err:?}"));
            None
        }
    }
}

fn set_storage(key: &'static str, value: &str) {
    match local_storage() {
        Ok(storage) => {
            if let Err(err) = storage.set_item(key, value) {
                log_storage_error("set", key, &format!("{err:?}"));
            }
        }
        Err(err) => log_storage_error("set", key, &err.detail),
    }
}

fn delete_storage(key: &'static str) {
    if let Ok(storage) = local_storage() {
        if let Err(err) = storage.remove_item(key) {
            log_storage_error("delete", key, &format!("{err:?}"));
        }
    }
}

fn log_storage_error(operation: &'static str, key: &'static str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}

/// Resolve the active language, writing the default back on a first visit.
pub(crate) fn bootstrap_language() -> LocaleCode {
    let stored = get_storage(LANGUAGE_KEY);
    let navigator = window().navigator().language();
    let LanguagePreference { locale, persist } =
        resolve_language(stored.as_deref(), navigator.as_deref());
    if persist {
        set_storage(LANGUAGE_KEY, locale.code());
    }
    locale
}

pub(crate) fn persist_language(locale: LocaleCode) {
    set_storage(LANGUAGE_KEY, locale.code());
}

pub(crate) fn load_credential() -> Option<AccessToken> {
    credential_from_storage(get_storage(TOKEN_KEY))
}

pub(crate) fn persist_credential(token: &AccessToken) {
    set_storage(TOKEN_KEY, &token.token);
}

pub(crate) fn clear_credential() {
    delete_storage(TOKEN_KEY);
}

/// Browser `localStorage` as the session guard's purge target.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalSessionStore;

impl SessionStore for LocalSessionStore {
    fn clear(&self) -> Result<(), StorageError> {
        local_storage()?.clear().map_err(|err| StorageError {
            detail: format!("{err:?}"),
        })
    }
}
