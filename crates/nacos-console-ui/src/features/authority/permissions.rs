//! Permission management page: grants roles access to namespaces.
use crate::app::api::ApiCtx;
use crate::components::binding_dialog::{BindingDialog, Shared};
use crate::config::ConsoleConfig;
use crate::core::binding::presets::{ROLE_PERMISSION, namespace_choices};
use crate::core::binding::{BindingHost, BindingSettings, CandidateLookup};
use crate::core::endpoints::{Endpoint, bound_roles};
use crate::core::store::{AppStore, StoreCommand};
use crate::features::authority::{ApiBindingHost, use_role_bindings};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::services::api::ApiLookup;
use std::rc::Rc;
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

fn grant_permission(values: &[String]) -> Option<Endpoint<'_>> {
    match values {
        [role, resource, action] => Some(Endpoint::GrantPermission {
            role,
            resource,
            action,
        }),
        _ => None,
    }
}

#[function_component(PermissionsPage)]
pub(crate) fn permissions_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let config = use_context::<ConsoleConfig>().unwrap_or_default();
    let api = use_context::<ApiCtx>();
    let namespaces = use_selector(|store: &AppStore| namespace_choices(&store.namespaces));
    let visible = use_state(|| false);
    let banner = use_state(|| None as Option<String>);
    let (bindings, _) = use_role_bindings();
    let seed = use_memo(|bindings| bound_roles(bindings), bindings);

    {
        let api = api.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(api) = api {
                    spawn_local(async move {
                        match api.client.fetch_namespaces().await {
                            Ok(list) => {
                                Dispatch::<AppStore>::new().apply(StoreCommand::NamespacesLoaded(list));
                            }
                            Err(err) => tracing::warn!(error = %err, "namespace list unavailable"),
                        }
                    });
                }
                || ()
            },
            (),
        );
    }

    let wiring = {
        let visible = visible.clone();
        let banner = banner.clone();
        use_memo(
            move |api: &Option<ApiCtx>| {
                api.as_ref().map(|api| {
                    let lookup: Rc<dyn CandidateLookup> = Rc::new(ApiLookup::new(
                        Rc::clone(&api.client),
                        ROLE_PERMISSION.lookup,
                    ));
                    let host: Rc<dyn BindingHost> = Rc::new(ApiBindingHost::new(
                        Rc::clone(&api.client),
                        grant_permission,
                        Callback::from(move |()| visible.set(false)),
                        Callback::from(move |message| banner.set(Some(message))),
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
                <h2>{bundle.text("permissions.title", "")}</h2>
                <button class="btn btn-primary" onclick={open}>{bundle.text("permissions.add_button", "")}</button>
            </header>
            {(*banner).clone().map_or_else(|| html! {}, |message| html! {
                <div class="alert alert-success">{message}</div>
            })}
            <p class="muted">{bundle.text("permissions.empty", "")}</p>
            {(*wiring).clone().map_or_else(|| html! {}, |(lookup, host)| html! {
                <BindingDialog
                    spec={ROLE_PERMISSION}
                    visible={*visible}
                    settings={BindingSettings::from_config(&config)}
                    namespace_choices={(*namespaces).clone()}
                    seed={(*seed).clone()}
                    {lookup}
                    {host}
                />
            })}
        </section>
    }
}
