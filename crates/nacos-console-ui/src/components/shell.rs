//! Console chrome: sidebar navigation, language switch and sign-out.
use crate::app::Route;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq)]
pub(crate) struct ShellProps {
    pub children: Children,
    pub active: Route,
    pub username: Option<String>,
    pub on_toggle_language: Callback<()>,
    pub on_logout: Callback<()>,
}

#[function_component(AppShell)]
pub(crate) fn app_shell(props: &ShellProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let nav_open = use_state(|| false);
    let toggle_nav = {
        let nav_open = nav_open.clone();
        Callback::from(move |_| nav_open.set(!*nav_open))
    };
    let toggle_language = props.on_toggle_language.reform(|_: MouseEvent| ());
    let logout = props.on_logout.reform(|_: MouseEvent| ());

    html! {
        <div class="app-shell">
            <aside class={classes!("sidebar", if *nav_open { "open" } else { "closed" })}>
                <div class="brand">
                    <button class="ghost mobile-only" onclick={toggle_nav.clone()} aria-label="Close navigation">{"✕"}</button>
                    <strong>{"Nacos"}</strong>
                </div>
                <nav>
                    {for Route::NAV.into_iter().map(|(route, key)| {
                        nav_item(route, &bundle.text(key, ""), &props.active)
                    })}
                </nav>
            </aside>
            <div class="main">
                <header class="topbar">
                    <button class="ghost mobile-only" aria-label="Open navigation" onclick={toggle_nav}>{"☰"}</button>
                    <div class="top-actions">
                        <button class="ghost" title={bundle.text("nav.language", "")} onclick={toggle_language}>
                            {bundle.locale.toggled().label()}
                        </button>
                        {props.username.clone().map_or_else(|| html! {}, |name| html! {
                            <span class="pill subtle">{name}</span>
                        })}
                        <button class="ghost" onclick={logout}>{bundle.text("nav.logout", "Log out")}</button>
                    </div>
                </header>
                <main>
                    {for props.children.iter()}
                </main>
            </div>
        </div>
    }
}

fn nav_item(route: Route, label: &str, active: &Route) -> Html {
    let classes = classes!("nav-item", (*active == route).then_some("active"));
    html! {
        <Link<Route> to={route} classes={classes}>{label}</Link<Route>>
    }
}
