//! Generic "create a binding" dialog.
//!
//! # Design
//! - Rendering only; every state transition goes through [`BindingDialogController`].
//! - One controller per mount; language, lookup and settings changes are pushed into it.
//! - Async work runs on `spawn_local` and repaints through a forced update.

use crate::core::binding::{
    BindingDialogController, BindingHost, BindingMessages, BindingSettings, BindingSpec,
    Candidate, CandidateLookup, ChoiceSource, ConfirmOutcome, DialogPhase, FieldInput, FieldSpec,
};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::platform::spawn_local;
use yew::prelude::*;

/// Reference-counted handle compared by identity.
pub(crate) struct Shared<T: ?Sized>(pub Rc<T>);

impl<T: ?Sized> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct BindingDialogProps {
    pub spec: BindingSpec,
    pub visible: bool,
    pub settings: BindingSettings,
    pub lookup: Shared<dyn CandidateLookup>,
    pub host: Shared<dyn BindingHost>,
    /// Options for [`ChoiceSource::Namespaces`] fields.
    #[prop_or_default]
    pub namespace_choices: Vec<Candidate>,
    /// Values the parent already knows for the dependent field.
    #[prop_or_default]
    pub seed: Vec<Candidate>,
}

#[function_component(BindingDialog)]
pub(crate) fn binding_dialog(props: &BindingDialogProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let force = use_force_update();
    let locale = bundle.locale;

    let controller = {
        let spec = props.spec;
        let settings = props.settings;
        let lookup = Rc::clone(&props.lookup.0);
        let bundle = bundle.clone();
        use_memo(
            move |_| {
                BindingDialogController::new(
                    spec,
                    BindingMessages::resolve(&spec, &bundle),
                    settings,
                    lookup,
                )
            },
            (),
        )
    };

    {
        let controller = Rc::clone(&controller);
        let force = force.clone();
        let spec = props.spec;
        let bundle = bundle.clone();
        use_effect_with_deps(
            move |_| {
                controller.set_messages(BindingMessages::resolve(&spec, &bundle));
                force.force_update();
                || ()
            },
            locale,
        );
    }

    {
        let controller = Rc::clone(&controller);
        let force = force.clone();
        use_effect_with_deps(
            move |(lookup, settings): &(Shared<dyn CandidateLookup>, BindingSettings)| {
                controller.reconfigure(*settings, Rc::clone(&lookup.0));
                spawn_local(async move {
                    controller.activate().await;
                    force.force_update();
                });
                || ()
            },
            (props.lookup.clone(), props.settings),
        );
    }

    {
        let controller = Rc::clone(&controller);
        let force = force.clone();
        use_effect_with_deps(
            move |seed: &Vec<Candidate>| {
                if controller.seed(seed.clone()) {
                    force.force_update();
                }
                || ()
            },
            props.seed.clone(),
        );
    }

    {
        let controller = Rc::clone(&controller);
        let force = force.clone();
        use_effect_with_deps(
            move |visible| {
                controller.set_visible(*visible);
                force.force_update();
                || ()
            },
            props.visible,
        );
    }

    if controller.phase() == DialogPhase::Closed {
        return html! {};
    }

    let on_confirm = {
        let controller = Rc::clone(&controller);
        let host = Rc::clone(&props.host.0);
        let force = force.clone();
        Callback::from(move |_: MouseEvent| {
            let controller = Rc::clone(&controller);
            let host = Rc::clone(&host);
            let force = force.clone();
            spawn_local(async move {
                if let ConfirmOutcome::Conflict { alert } = controller.confirm(&*host).await {
                    gloo::dialogs::alert(&alert);
                }
                force.force_update();
            });
            force.force_update();
        })
    };

    let on_cancel = {
        let controller = Rc::clone(&controller);
        let host = Rc::clone(&props.host.0);
        let force = force.clone();
        Callback::from(move |_: MouseEvent| {
            controller.cancel(&*host);
            force.force_update();
        })
    };

    let submitting = controller.submission_outstanding();
    let fields = props.spec.fields.iter().map(|field| {
        let input = render_input(field, &controller, &force, &bundle, &props.namespace_choices);
        let error = controller.error(field.name);
        html! {
            <label class={classes!("form-control", error.is_some().then_some("has-error"))}>
                <span class="label-text">{bundle.text(field.label_key, field.name)}</span>
                {input}
                {error.map_or_else(|| html! {}, |message| html! {
                    <span class="field-error">{message}</span>
                })}
            </label>
        }
    });

    html! {
        <div class="modal modal-open" role="dialog">
            <div class="modal-box">
                <h3 class="modal-title">{bundle.text(props.spec.title_key, "")}</h3>
                {controller.notice().map_or_else(|| html! {}, |notice| html! {
                    <div class="alert alert-warning">{notice}</div>
                })}
                <form class="binding-form" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
                    {for fields}
                </form>
                <div class="modal-action">
                    <button class="btn" type="button" onclick={on_cancel}>
                        {bundle.text("common.cancel", "Cancel")}
                    </button>
                    <button class="btn btn-primary" type="button" disabled={submitting} onclick={on_confirm}>
                        {bundle.text("common.ok", "OK")}
                    </button>
                </div>
            </div>
        </div>
    }
}

fn render_input(
    field: &'static FieldSpec,
    controller: &Rc<BindingDialogController>,
    force: &UseForceUpdateHandle,
    bundle: &TranslationBundle,
    namespace_choices: &[Candidate],
) -> Html {
    let value = controller.value(field.name);
    let placeholder = bundle.text(field.placeholder_key, "");
    match field.input {
        FieldInput::Text => {
            let controller = Rc::clone(controller);
            let force = force.clone();
            let oninput = Callback::from(move |e: InputEvent| {
                if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                    edit(&controller, field.name, input.value());
                    force.force_update();
                }
            });
            html! { <input class="input" type="text" {placeholder} {value} {oninput} /> }
        }
        FieldInput::Dependent => {
            let list_id = format!("{}-candidates", field.name);
            let options = controller.candidates();
            let controller = Rc::clone(controller);
            let force = force.clone();
            let oninput = Callback::from(move |e: InputEvent| {
                let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                    return;
                };
                let query = input.value();
                edit(&controller, field.name, query.clone());
                force.force_update();
                let controller = Rc::clone(&controller);
                let force = force.clone();
                spawn_local(async move {
                    controller.search(&query).await;
                    force.force_update();
                });
            });
            html! {
                <>
                    <input class="input" type="search" list={list_id.clone()} {placeholder} {value} {oninput} />
                    <datalist id={list_id}>
                        {for options.into_iter().map(|option| html! {
                            <option value={option.value}>{option.label}</option>
                        })}
                    </datalist>
                </>
            }
        }
        FieldInput::Choice(source) => {
            let options: Vec<Candidate> = match source {
                ChoiceSource::Namespaces => namespace_choices.to_vec(),
                ChoiceSource::Fixed(pairs) => pairs
                    .iter()
                    .map(|(code, label_key)| Candidate {
                        value: (*code).to_string(),
                        label: bundle.text(label_key, code),
                    })
                    .collect(),
            };
            let controller = Rc::clone(controller);
            let force = force.clone();
            let onchange = Callback::from(move |e: Event| {
                if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                    edit(&controller, field.name, select.value());
                    force.force_update();
                }
            });
            html! {
                <select class="select" {onchange}>
                    <option value="" selected={value.is_empty()} disabled=true>{placeholder}</option>
                    {for options.into_iter().map(|option| {
                        let selected = option.value == value;
                        html! { <option value={option.value} {selected}>{option.label}</option> }
                    })}
                </select>
            }
        }
    }
}

fn edit(controller: &BindingDialogController, field: &str, value: String) {
    if let Err(err) = controller.edit(field, value) {
        tracing::warn!(error = %err, "binding dialog edit rejected");
    }
}
