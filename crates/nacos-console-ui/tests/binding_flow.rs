//! End-to-end binding dialog flows through the public API.

use async_trait::async_trait;
use nacos_console_api_models::{NamespaceEntry, Page, PageQuery, RoleEntry, UserEntry};
use nacos_console_ui::config::ConsoleConfig;
use nacos_console_ui::core::binding::presets::{ROLE_PERMISSION, USER_ROLE, namespace_choices};
use nacos_console_ui::core::binding::{
    BindingDialogController, BindingHost, BindingMessages, BindingSettings, BindingSpec,
    BindingSubmission, Candidate, CandidateLookup, ConfirmOutcome, DialogPhase, LookupError,
    SearchOutcome, SubmitError, SubmitResponse,
};
use nacos_console_ui::core::endpoints::{
    Endpoint, bound_roles, build_url, role_candidates, user_candidates,
};
use nacos_console_ui::i18n::{LocaleCode, TranslationBundle};
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;

/// In-memory stand-in for the console API.
#[derive(Default)]
struct FakeConsole {
    users: Vec<&'static str>,
    roles: Vec<(&'static str, &'static str)>,
    bindings: RefCell<BTreeSet<String>>,
    requests: RefCell<Vec<String>>,
}

impl FakeConsole {
    fn record(&self, endpoint: &Endpoint<'_>) {
        self.requests
            .borrow_mut()
            .push(build_url("/nacos", endpoint, None));
    }
}

struct FakeLookup {
    console: Rc<FakeConsole>,
    users: bool,
}

#[async_trait(?Send)]
impl CandidateLookup for FakeLookup {
    async fn first_page(&self, page: PageQuery) -> Result<Vec<Candidate>, LookupError> {
        if self.users {
            self.console.record(&Endpoint::Users(page));
            Ok(user_candidates(Page {
                page_items: self
                    .console
                    .users
                    .iter()
                    .map(|name| UserEntry {
                        username: (*name).to_string(),
                    })
                    .collect(),
                ..Page::default()
            }))
        } else {
            self.console.record(&Endpoint::Roles(page));
            Ok(role_candidates(Page {
                page_items: self
                    .console
                    .roles
                    .iter()
                    .map(|(role, username)| RoleEntry {
                        role: (*role).to_string(),
                        username: (*username).to_string(),
                    })
                    .collect(),
                ..Page::default()
            }))
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<Candidate>, LookupError> {
        let values: Vec<String> = if self.users {
            self.console.record(&Endpoint::UserSearch(query));
            self.console
                .users
                .iter()
                .filter(|name| name.contains(query))
                .map(|name| (*name).to_string())
                .collect()
        } else {
            self.console.record(&Endpoint::RoleSearch(query));
            self.console
                .roles
                .iter()
                .map(|(role, _)| *role)
                .filter(|role| role.contains(query))
                .map(ToString::to_string)
                .collect()
        };
        Ok(values.into_iter().map(Candidate::plain).collect())
    }
}

struct FakeHost {
    console: Rc<FakeConsole>,
    hidden: Cell<u32>,
    created: RefCell<Vec<String>>,
}

#[async_trait(?Send)]
impl BindingHost for FakeHost {
    async fn submit(&self, submission: BindingSubmission) -> Result<SubmitResponse, SubmitError> {
        let key = submission.values.join("|");
        let fresh = self.console.bindings.borrow_mut().insert(key);
        if fresh {
            self.created
                .borrow_mut()
                .push(submission.success_message.clone());
        }
        Ok(SubmitResponse {
            status: if fresh { 200 } else { 400 },
        })
    }

    fn cancel(&self) {
        self.hidden.set(self.hidden.get() + 1);
    }
}

fn console() -> Rc<FakeConsole> {
    Rc::new(FakeConsole {
        users: vec!["nacos", "alice", "albert"],
        roles: vec![
            ("ROLE_ADMIN", "nacos"),
            ("ROLE_DEV", "alice"),
            ("ROLE_DEV", "albert"),
            ("ROLE_OPS", "alice"),
        ],
        ..FakeConsole::default()
    })
}

fn dialog(
    spec: BindingSpec,
    console: &Rc<FakeConsole>,
    locale: LocaleCode,
) -> (BindingDialogController, FakeHost) {
    let lookup = Rc::new(FakeLookup {
        console: Rc::clone(console),
        users: spec.lookup == USER_ROLE.lookup,
    });
    let controller = BindingDialogController::new(
        spec,
        BindingMessages::resolve(&spec, &TranslationBundle::new(locale)),
        BindingSettings::from_config(&ConsoleConfig::embedded()),
        lookup,
    );
    let host = FakeHost {
        console: Rc::clone(console),
        hidden: Cell::new(0),
        created: RefCell::new(Vec::new()),
    };
    (controller, host)
}

#[tokio::test(flavor = "current_thread")]
async fn user_role_binding_round_trip() {
    let console = console();
    let (dialog, host) = dialog(USER_ROLE, &console, LocaleCode::EnUs);

    assert_eq!(dialog.activate().await, SearchOutcome::Applied { candidates: 3 });
    assert_eq!(
        console.requests.borrow()[0],
        "/nacos/v1/auth/users?pageNo=1&pageSize=100"
    );

    dialog.set_visible(true);
    assert_eq!(dialog.search("al").await, SearchOutcome::Applied { candidates: 2 });
    dialog.edit("role", "ROLE_QA").expect("role field");
    dialog.edit("username", "alice").expect("username field");

    assert_eq!(dialog.confirm(&host).await, ConfirmOutcome::Accepted);
    assert_eq!(host.hidden.get(), 1);
    assert_eq!(*host.created.borrow(), ["Role bound."]);
    assert_eq!(dialog.phase(), DialogPhase::Closed);
    assert!(dialog.form().is_clean());

    dialog.set_visible(true);
    dialog.edit("role", "ROLE_QA").expect("role field");
    dialog.edit("username", "alice").expect("username field");
    let outcome = dialog.confirm(&host).await;
    assert!(matches!(outcome, ConfirmOutcome::Conflict { .. }));
    assert_eq!(host.hidden.get(), 1);
    assert_eq!(dialog.value("username"), "alice");
    assert_eq!(dialog.phase(), DialogPhase::Open);
}

#[tokio::test(flavor = "current_thread")]
async fn role_permission_grant_hides_admin_and_validates_all_fields() {
    let console = console();
    let (dialog, host) = dialog(ROLE_PERMISSION, &console, LocaleCode::ZhCn);

    assert_eq!(dialog.activate().await, SearchOutcome::Applied { candidates: 2 });
    let roles: Vec<String> = dialog.candidates().into_iter().map(|c| c.value).collect();
    assert_eq!(roles, ["ROLE_DEV", "ROLE_OPS"]);

    assert_eq!(dialog.search("ROLE").await, SearchOutcome::Applied { candidates: 3 });
    assert!(dialog.candidates().iter().all(|c| c.value != "ROLE_ADMIN"));

    dialog.set_visible(true);
    let outcome = dialog.confirm(&host).await;
    assert_eq!(
        outcome,
        ConfirmOutcome::Invalid {
            missing: vec![
                "role".to_string(),
                "resource".to_string(),
                "action".to_string()
            ]
        }
    );
    assert!(console.bindings.borrow().is_empty());

    let resources = namespace_choices(&[NamespaceEntry {
        namespace: "prod".to_string(),
        namespace_show_name: "Production".to_string(),
    }]);
    dialog.edit("role", "ROLE_DEV").expect("role field");
    dialog
        .edit("resource", resources[0].value.clone())
        .expect("resource field");
    dialog.edit("action", "rw").expect("action field");
    assert_eq!(dialog.error("role"), None);

    assert_eq!(dialog.confirm(&host).await, ConfirmOutcome::Accepted);
    assert!(console.bindings.borrow().contains("ROLE_DEV|prod:*:*|rw"));
    assert_eq!(host.hidden.get(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn cancel_discards_in_progress_values() {
    let console = console();
    let (dialog, host) = dialog(ROLE_PERMISSION, &console, LocaleCode::EnUs);
    dialog.set_visible(true);
    dialog.edit("role", "ROLE_OPS").expect("role field");
    let _ = dialog.confirm(&host).await;
    assert!(dialog.error("resource").is_some());

    dialog.cancel(&host);
    dialog.set_visible(true);
    assert!(dialog.form().is_clean());
    assert_eq!(host.hidden.get(), 1);
    assert!(console.bindings.borrow().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn known_roles_seed_the_dialog_but_admin_stays_out() {
    let console = console();
    let (dialog, host) = dialog(ROLE_PERMISSION, &console, LocaleCode::EnUs);
    let known: Vec<RoleEntry> = console
        .roles
        .iter()
        .map(|(role, username)| RoleEntry {
            role: (*role).to_string(),
            username: (*username).to_string(),
        })
        .collect();
    assert!(dialog.seed(bound_roles(&known)));
    let seeded: Vec<String> = dialog.candidates().into_iter().map(|c| c.value).collect();
    assert_eq!(seeded, ["ROLE_DEV", "ROLE_OPS"]);
    assert!(console.requests.borrow().is_empty());

    dialog.set_visible(true);
    dialog.edit("role", "ROLE_ADMIN").expect("role field");
    dialog.edit("resource", ":*:*").expect("resource field");
    dialog.edit("action", "rw").expect("action field");
    assert_eq!(
        dialog.confirm(&host).await,
        ConfirmOutcome::Disallowed {
            field: "role".to_string()
        }
    );
    assert!(console.bindings.borrow().is_empty());
    assert_eq!(dialog.phase(), DialogPhase::Open);
}
