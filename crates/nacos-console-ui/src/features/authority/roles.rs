//! Role management page: binds users to roles.
use crate::app::api::ApiCtx;
use crate::components::binding_dialog::{BindingDialog, Shared};
use crate::config::ConsoleConfig;
use crate::core::binding::presets::USER_ROLE;
use crate::core::binding::{BindingHost, BindingSettings, CandidateLookup};
use crate::core::endpoints::{Endpoint, bound_users};
use crate::features::authority::{ApiBindingHost, use_role_bindings};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::services::api::ApiLookup;
use std::rc::Rc;
use yew::prelude::*;

fn bind_role(values: &[String]) -> Option<Endpoint<'_>> {
    match values {
        [role, username] => Some(Endpoint::BindRole { role, username }),
        _ => None,
    }
}

#[function_component(RolesPage)]
pub(crate) fn roles_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let config = use_context::<ConsoleConfig>().unwrap_or_default();
    let api = use_context::<ApiCtx>();
    let visible = use_state(|| false);
    let banner = use_state(|| None as Option<String>);
    let (bindings, reload) = use_role_bindings();
    let seed = use_memo(|bindings| bound_users(bindings), Rc::clone(&bindings));

    let wiring = {
        let visible = visible.clone();
        let banner = banner.clone();
        use_memo(
            move |api: &Option<ApiCtx>| {
                api.as_ref().map(|api| {
                    let lookup: Rc<dyn CandidateLookup> = Rc::new(ApiLookup::new(
                        Rc::clone(&api.client),
                        USER_ROLE.lookup,
                    ));
                    let host: Rc<dyn BindingHost> = Rc::new(ApiBindingHost::new(
                        Rc::clone(&api.client),
                        bind_role,
                        Callback::from(move |()| visible.set(false)),
                        Callback::from(move |message| {
                            banner.set(Some(message));
                            reload.emit(());
                        }),
                    ));
                    (Shared(lookup), Shared(host))
                })
            },
            api,
        )
    };

    let open = {
        let visible = visible.clone();
        Callback::from(move |_: MouseEvent| visible.set(true))
    };

    html! {
        <section class="authority-page">
            <header class="page-header">
                <h2>{bundle.text("roles.title", "")}</h2>
                <button class="btn btn-primary" onclick={open}>{bundle.text("roles.bind_button", "")}</button>
            </header>
            {(*banner).clone().map_or_else(|| html! {}, |message| html! {
                <div class="alert alert-success">{message}</div>
            })}
            {if bindings.is_empty() {
                html! { <p class="muted">{bundle.text("roles.empty", "")}</p> }
            } else {
                html! {
                    <table class="table">
                        <thead>
                            <tr>
                                <th>{bundle.text("roles.role", "")}</th>
                                <th>{bundle.text("roles.username", "")}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for bindings.iter().map(|entry| html! {
                                <tr>
                                    <td>{entry.role.clone()}</td>
                                    <td>{entry.username.clone()}</td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                }
            }}
            {(*wiring).clone().map_or_else(|| html! {}, |(lookup, host)| html! {
                <BindingDialog
                    spec={USER_ROLE}
                    visible={*visible}
                    settings={BindingSettings::from_config(&config)}
                    seed={(*seed).clone()}
                    {lookup}
                    {host}
                />
            })}
        </section>
    }
}
