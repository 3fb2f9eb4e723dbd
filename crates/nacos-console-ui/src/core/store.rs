//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Mutations go through [`StoreCommand`]; [`reduce`] is pure so it is tested natively.

use crate::core::auth::AccessToken;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode};
use nacos_console_api_models::{NamespaceEntry, RoleEntry};
use std::rc::Rc;
use yewdux::prelude::Reducer;
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Eq, Store)]
pub struct AppStore {
    /// Active console language.
    pub locale: LocaleCode,
    /// Signed-in credential, if any.
    pub session: Option<AccessToken>,
    /// Namespaces loaded from the console API.
    pub namespaces: Vec<NamespaceEntry>,
    /// First page of role bindings, shared by the authority pages.
    pub role_bindings: Vec<RoleEntry>,
}

impl Default for AppStore {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE,
            session: None,
            namespaces: Vec::new(),
            role_bindings: Vec::new(),
        }
    }
}

impl AppStore {
    /// Whether a usable credential is present.
    #[must_use]
    pub fn signed_in(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(AccessToken::has_credentials)
    }
}

/// Typed mutations accepted by the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreCommand {
    /// Switch the active language.
    ChangeLanguage(LocaleCode),
    /// Record a credential after login or bootstrap.
    SignedIn(AccessToken),
    /// Drop the credential and any data loaded under it.
    SignedOut,
    /// Replace the known namespace list.
    NamespacesLoaded(Vec<NamespaceEntry>),
    /// Replace the known role bindings.
    RoleBindingsLoaded(Vec<RoleEntry>),
}

/// Apply `command` to `store`, returning the next state.
#[must_use]
pub fn reduce(store: &AppStore, command: StoreCommand) -> AppStore {
    let mut next = store.clone();
    match command {
        StoreCommand::ChangeLanguage(locale) => next.locale = locale,
        StoreCommand::SignedIn(token) => {
            next.session = Some(token).filter(AccessToken::has_credentials);
        }
        StoreCommand::SignedOut => {
            next.session = None;
            next.namespaces.clear();
            next.role_bindings.clear();
        }
        StoreCommand::NamespacesLoaded(namespaces) => next.namespaces = namespaces,
        StoreCommand::RoleBindingsLoaded(bindings) => next.role_bindings = bindings,
    }
    next
}

impl Reducer<AppStore> for StoreCommand {
    fn apply(self, state: Rc<AppStore>) -> Rc<AppStore> {
        tracing::debug!(command = ?self, "store command");
        Rc::new(reduce(&state, self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn namespace(id: &str) -> NamespaceEntry {
        NamespaceEntry {
            namespace: id.to_string(),
            namespace_show_name: id.to_uppercase(),
        }
    }

    #[test]
    fn language_change_only_touches_locale() {
        let store = AppStore {
            session: Some(AccessToken::new("abc")),
            ..AppStore::default()
        };
        let next = reduce(&store, StoreCommand::ChangeLanguage(LocaleCode::ZhCn));
        assert_eq!(next.locale, LocaleCode::ZhCn);
        assert_eq!(next.session, store.session);
    }

    #[test]
    fn blank_credentials_do_not_sign_in() {
        let next = reduce(&AppStore::default(), StoreCommand::SignedIn(AccessToken::new("  ")));
        assert!(!next.signed_in());
        let next = reduce(&next, StoreCommand::SignedIn(AccessToken::new("abc")));
        assert!(next.signed_in());
    }

    #[test]
    fn sign_out_drops_session_data() {
        let store = reduce(&AppStore::default(), StoreCommand::SignedIn(AccessToken::new("abc")));
        let store = reduce(&store, StoreCommand::NamespacesLoaded(vec![namespace("prod")]));
        let store = reduce(
            &store,
            StoreCommand::RoleBindingsLoaded(vec![RoleEntry {
                role: "ROLE_DEV".to_string(),
                username: "alice".to_string(),
            }]),
        );
        assert_eq!(store.namespaces.len(), 1);
        assert_eq!(store.role_bindings.len(), 1);
        let next = reduce(&store, StoreCommand::SignedOut);
        assert_eq!(next.session, None);
        assert!(next.namespaces.is_empty());
        assert!(next.role_bindings.is_empty());
        assert_eq!(next.locale, store.locale);
    }

    #[test]
    fn reducer_impl_matches_pure_reduce() {
        let state = Rc::new(AppStore::default());
        let command = StoreCommand::NamespacesLoaded(vec![namespace("dev"), namespace("prod")]);
        let expected = reduce(&state, command.clone());
        assert_eq!(*command.apply(state), expected);
    }
}
