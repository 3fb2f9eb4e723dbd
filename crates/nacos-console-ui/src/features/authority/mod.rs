//! Role and permission management pages.
//!
//! # Design
//! - Each page owns the dialog's visibility and implements [`BindingHost`].
//! - HTTP calls stay in this feature layer; the dialog only sees the trait.
//! - Role bindings live in the store and seed both dialogs.

pub(crate) mod permissions;
pub(crate) mod roles;

use crate::app::api::ApiCtx;
use crate::config::ConsoleConfig;
use crate::core::binding::{
    BindingHost, BindingSettings, BindingSubmission, SubmitError, SubmitResponse,
};
use crate::core::endpoints::Endpoint;
use crate::core::store::{AppStore, StoreCommand};
use crate::services::api::ApiClient;
use async_trait::async_trait;
use nacos_console_api_models::RoleEntry;
use std::rc::Rc;
use yew::functional::hook;
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

/// Maps submitted values, in field order, to the write call.
pub(crate) type WriteEndpoint = for<'a> fn(&'a [String]) -> Option<Endpoint<'a>>;

/// [`BindingHost`] that performs the write through the console API.
pub(crate) struct ApiBindingHost {
    client: Rc<ApiClient>,
    endpoint: WriteEndpoint,
    on_hide: Callback<()>,
    on_created: Callback<String>,
}

impl ApiBindingHost {
    pub(crate) const fn new(
        client: Rc<ApiClient>,
        endpoint: WriteEndpoint,
        on_hide: Callback<()>,
        on_created: Callback<String>,
    ) -> Self {
        Self {
            client,
            endpoint,
            on_hide,
            on_created,
        }
    }
}

#[async_trait(?Send)]
impl BindingHost for ApiBindingHost {
    async fn submit(&self, submission: BindingSubmission) -> Result<SubmitResponse, SubmitError> {
        let Some(endpoint) = (self.endpoint)(&submission.values) else {
            return Err(SubmitError {
                detail: format!("unexpected value count {}", submission.values.len()),
            });
        };
        let status = self
            .client
            .post_status(&endpoint)
            .await
            .map_err(|err| SubmitError {
                detail: err.to_string(),
            })?;
        if (200..300).contains(&status) {
            self.on_created.emit(submission.success_message.clone());
        }
        Ok(SubmitResponse { status })
    }

    fn cancel(&self) {
        self.on_hide.emit(());
    }
}

/// Role bindings from the store plus a callback that reloads them.
///
/// The first page is fetched on mount.
#[hook]
pub(crate) fn use_role_bindings() -> (Rc<Vec<RoleEntry>>, Callback<()>) {
    let api = use_context::<ApiCtx>();
    let config = use_context::<ConsoleConfig>().unwrap_or_default();
    let bindings = use_selector(|store: &AppStore| store.role_bindings.clone());
    let reload = {
        let page = BindingSettings::from_config(&config).first_page;
        Callback::from(move |()| {
            let Some(api) = api.clone() else {
                return;
            };
            spawn_local(async move {
                match api.client.fetch_roles(page).await {
                    Ok(page) => {
                        Dispatch::<AppStore>::new()
                            .apply(StoreCommand::RoleBindingsLoaded(page.page_items));
                    }
                    Err(err) => tracing::warn!(error = %err, "role bindings unavailable"),
                }
            });
        })
    };
    {
        let reload = reload.clone();
        use_effect_with_deps(
            move |_| {
                reload.emit(());
                || ()
            },
            (),
        );
    }
    (bindings, reload)
}
