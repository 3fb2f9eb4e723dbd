//! Navigation guard applied before any route renders.
//!
//! # Design
//! - The route table is data; this module only decides render vs redirect.
//! - The decision reads the credential, it never writes it.

use crate::core::auth::AccessToken;

/// Whether a route may render without a credential.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    /// Reachable without signing in (the login screen).
    Public,
    /// Requires a stored credential.
    Guarded,
    /// Bare root; always forwarded to the welcome page.
    Root,
}

/// Result of running the guard for a navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavDecision {
    /// Render the requested screen.
    Render,
    /// Send the operator to the login screen.
    RedirectToLogin,
    /// Send the operator to the welcome screen.
    RedirectToWelcome,
}

/// Decide what a navigation to a route with `access` should do.
#[must_use]
pub fn guard(access: RouteAccess, credential: Option<&AccessToken>) -> NavDecision {
    let signed_in = credential.is_some_and(AccessToken::has_credentials);
    match access {
        RouteAccess::Public => NavDecision::Render,
        RouteAccess::Root if signed_in => NavDecision::RedirectToWelcome,
        RouteAccess::Root | RouteAccess::Guarded if !signed_in => NavDecision::RedirectToLogin,
        RouteAccess::Root | RouteAccess::Guarded => NavDecision::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_never_redirects() {
        assert_eq!(guard(RouteAccess::Public, None), NavDecision::Render);
        let token = AccessToken::new("t");
        assert_eq!(guard(RouteAccess::Public, Some(&token)), NavDecision::Render);
    }

    #[test]
    fn guarded_routes_require_a_usable_token() {
        assert_eq!(guard(RouteAccess::Guarded, None), NavDecision::RedirectToLogin);
        let blank = AccessToken::new("  ");
        assert_eq!(
            guard(RouteAccess::Guarded, Some(&blank)),
            NavDecision::RedirectToLogin
        );
        let token = AccessToken::new("t");
        assert_eq!(guard(RouteAccess::Guarded, Some(&token)), NavDecision::Render);
    }

    #[test]
    fn root_forwards_to_welcome_once_signed_in() {
        let token = AccessToken::new("t");
        assert_eq!(
            guard(RouteAccess::Root, Some(&token)),
            NavDecision::RedirectToWelcome
        );
        assert_eq!(guard(RouteAccess::Root, None), NavDecision::RedirectToLogin);
    }
}
