//! Routing definitions for the console.
use crate::core::navigation::RouteAccess;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/welcome")]
    Welcome,
    #[at("/namespace")]
    Namespace,
    #[at("/configurationManagement")]
    Configurations,
    #[at("/serviceManagement")]
    Services,
    #[at("/clusterManagement")]
    Cluster,
    #[at("/userManagement")]
    Users,
    #[at("/rolesManagement")]
    Roles,
    #[at("/permissionsManagement")]
    Permissions,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub(crate) const fn access(&self) -> RouteAccess {
        match self {
            Self::Login => RouteAccess::Public,
            Self::Home => RouteAccess::Root,
            _ => RouteAccess::Guarded,
        }
    }

    /// Sidebar entries with their label keys.
    pub(crate) const NAV: [(Self, &'static str); 8] = [
        (Self::Welcome, "nav.welcome"),
        (Self::Namespace, "nav.namespace"),
        (Self::Configurations, "nav.config"),
        (Self::Services, "nav.service"),
        (Self::Cluster, "nav.cluster"),
        (Self::Users, "nav.users"),
        (Self::Roles, "nav.roles"),
        (Self::Permissions, "nav.permissions"),
    ];
}
