//! Application shell: bootstrap, shared contexts, routing and the navigation guard.
//!
//! # Design
//! - Bootstrap runs once per mount and installs the session guard; unmount detaches it.
//! - The guard reads the credential from storage on every navigation.
//! - Store mutations go through [`StoreCommand`] only.

use crate::app::api::ApiCtx;
use crate::components::login::LoginPage;
use crate::components::shell::AppShell;
use crate::config::ConsoleConfig;
use crate::core::auth::AccessToken;
use crate::core::navigation::{NavDecision, guard};
use crate::core::store::{AppStore, StoreCommand};
use crate::features::authority::permissions::PermissionsPage;
use crate::features::authority::roles::RolesPage;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use gloo::console;
use preferences::{
    bootstrap_language, clear_credential, load_credential, persist_credential, persist_language,
};
pub(crate) use routes::Route;
use session::{install_session_guard, remove_session_guard};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

pub(crate) mod api;
mod preferences;
mod routes;
mod session;

#[function_component(ConsoleApp)]
fn console_app() -> Html {
    let config = use_memo(|_| ConsoleConfig::embedded(), ());
    let dispatch = Dispatch::<AppStore>::new();
    let locale = use_selector(|store: &AppStore| store.locale);
    let username = use_selector(|store: &AppStore| {
        store
            .session
            .as_ref()
            .and_then(|session| session.username.clone())
    });
    let api_ctx = {
        let base_url = config.api_base_url.clone();
        use_memo(
            move |_| {
                let ctx = ApiCtx::new(base_url);
                ctx.client.set_credential(load_credential());
                ctx
            },
            (),
        )
    };
    let bundle = use_memo(|locale| TranslationBundle::new(*locale), *locale);

    {
        let dispatch = dispatch.clone();
        let close_gap_ms = config.session.close_gap_ms;
        use_effect_with_deps(
            move |_| {
                dispatch.apply(StoreCommand::ChangeLanguage(bootstrap_language()));
                if let Some(token) = load_credential() {
                    dispatch.apply(StoreCommand::SignedIn(token));
                }
                install_session_guard(close_gap_ms);
                remove_session_guard
            },
            (),
        );
    }

    let toggle_language = {
        let dispatch = dispatch.clone();
        let current = *locale;
        Callback::from(move |()| {
            let next = current.toggled();
            persist_language(next);
            dispatch.apply(StoreCommand::ChangeLanguage(next));
        })
    };

    let sign_in = {
        let dispatch = dispatch.clone();
        let api_ctx = api_ctx.clone();
        Callback::from(move |token: AccessToken| {
            persist_credential(&token);
            api_ctx.client.set_credential(Some(token.clone()));
            dispatch.apply(StoreCommand::SignedIn(token));
        })
    };

    let sign_out = {
        let api_ctx = api_ctx.clone();
        Callback::from(move |()| {
            clear_credential();
            api_ctx.client.set_credential(None);
            dispatch.apply(StoreCommand::SignedOut);
        })
    };

    let render = {
        let username = (*username).clone();
        move |route: Route| {
            let credential = load_credential();
            match guard(route.access(), credential.as_ref()) {
                NavDecision::RedirectToLogin => html! { <Redirect<Route> to={Route::Login} /> },
                NavDecision::RedirectToWelcome => html! { <Redirect<Route> to={Route::Welcome} /> },
                NavDecision::Render => match route {
                    Route::Login => html! { <LoginPage on_submit={sign_in.clone()} /> },
                    route => html! {
                        <AppShell
                            active={route.clone()}
                            username={username.clone()}
                            on_toggle_language={toggle_language.clone()}
                            on_logout={sign_out.clone()}
                        >
                            {page(&route)}
                        </AppShell>
                    },
                },
            }
        }
    };

    html! {
        <ContextProvider<ConsoleConfig> context={(*config).clone()}>
            <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
                <ContextProvider<TranslationBundle> context={(*bundle).clone()}>
                    <HashRouter>
                        <Switch<Route> render={render} />
                    </HashRouter>
                </ContextProvider<TranslationBundle>>
            </ContextProvider<ApiCtx>>
        </ContextProvider<ConsoleConfig>>
    }
}

fn page(route: &Route) -> Html {
    match route {
        Route::Roles => html! { <RolesPage /> },
        Route::Permissions => html! { <PermissionsPage /> },
        Route::Welcome => html! { <Placeholder title="welcome.title" body="welcome.body" /> },
        Route::NotFound => html! { <Placeholder title="" body="placeholder.not_found" /> },
        other => {
            let title = Route::NAV
                .into_iter()
                .find(|(candidate, _)| candidate == other)
                .map_or("", |(_, key)| key);
            html! { <Placeholder {title} body="placeholder.body" /> }
        }
    }
}

#[function_component(Placeholder)]
fn placeholder(props: &PlaceholderProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    html! {
        <div class="placeholder">
            <h2>{bundle.text(props.title, "")}</h2>
            <p class="muted">{bundle.text(props.body, "")}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct PlaceholderProps {
    pub title: &'static str,
    pub body: &'static str,
}

/// Mount the console into `#root` (or `<body>` when absent).
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Err(err) = tracing_wasm::try_set_as_global_default() {
        console::warn!("tracing subscriber already installed", err.to_string());
    }
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<ConsoleApp>::with_root(root).render();
    } else {
        yew::Renderer::<ConsoleApp>::new().render();
    }
}
