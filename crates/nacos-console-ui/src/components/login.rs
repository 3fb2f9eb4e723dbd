//! Sign-in screen. Accepts an access token issued by the server.
use crate::app::Route;
use crate::core::auth::AccessToken;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;
use yew_router::prelude::use_navigator;

#[derive(Properties, PartialEq)]
pub(crate) struct LoginProps {
    pub on_submit: Callback<AccessToken>,
}

#[function_component(LoginPage)]
pub(crate) fn login_page(props: &LoginProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let token = use_state(String::new);
    let error = use_state(|| None as Option<String>);
    let navigator = use_navigator();

    let submit = {
        let token = token.clone();
        let error = error.clone();
        let on_submit = props.on_submit.clone();
        let required = t("login.error_required");
        Callback::from(move |_: MouseEvent| {
            let credential = AccessToken::new(token.trim());
            if !credential.has_credentials() {
                error.set(Some(required.clone()));
                return;
            }
            error.set(None);
            on_submit.emit(credential);
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Welcome);
            }
        })
    };

    let on_input = {
        let token = token.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                token.set(input.value());
            }
        })
    };

    html! {
        <div class="auth-overlay" role="dialog" aria-modal="true">
            <div class="card">
                <header>
                    <h3>{t("login.title")}</h3>
                </header>
                <p class="muted">{t("login.body")}</p>
                <label class="stack">
                    <span>{t("login.token")}</span>
                    <input type="password" placeholder={t("login.token_placeholder")} oninput={on_input} />
                </label>
                {if let Some(err) = &*error {
                    html! { <p class="error-text">{err}</p> }
                } else { html! {} }}
                <div class="actions">
                    <button class="solid" onclick={submit}>{t("login.submit")}</button>
                </div>
            </div>
        </div>
    }
}
