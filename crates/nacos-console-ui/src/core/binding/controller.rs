//! Binding dialog controller: field state, dependent lookup, submission.
//!
//! # Design
//! - State lives in a `RefCell` owned by one controller; borrows never span an `.await`.
//! - Lookups carry a [`SearchTicket`]; only the latest issued ticket may update the
//!   candidate data source, whatever order responses arrive in.
//! - Close (cancel or accepted submission) is the single reset point.
//! - At most one submission is outstanding per controller, across close and reopen.
//!   A reply only touches the dialog when no close happened since it was issued.

use super::error::{BindingError, LookupError, SubmitError};
use super::form::BindingForm;
use super::search::{SearchSequence, SearchTicket};
use super::{BindingMessages, BindingSpec, Candidate};
use crate::config::ConsoleConfig;
use async_trait::async_trait;
use nacos_console_api_models::PageQuery;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Read side of the remote API used to fill the dependent dropdown.
#[async_trait(?Send)]
pub trait CandidateLookup {
    /// Fetch one page of the dataset.
    async fn first_page(&self, page: PageQuery) -> Result<Vec<Candidate>, LookupError>;
    /// Free-text search over the dataset.
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, LookupError>;
}

/// Parent screen contract: performs the write and owns visibility.
#[async_trait(?Send)]
pub trait BindingHost {
    /// Create the binding (`onOk`).
    async fn submit(&self, submission: BindingSubmission) -> Result<SubmitResponse, SubmitError>;
    /// Ask the parent to hide the dialog (`onCancel`).
    fn cancel(&self);
}

/// Values handed to [`BindingHost::submit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingSubmission {
    /// Required field values in field order.
    pub values: Vec<String>,
    /// Localized message to show once the binding exists.
    pub success_message: String,
}

impl BindingSubmission {
    /// Field values followed by the success message.
    #[must_use]
    pub fn arguments(&self) -> Vec<String> {
        let mut args = self.values.clone();
        args.push(self.success_message.clone());
        args
    }
}

/// Server reply to a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitResponse {
    /// HTTP status code.
    pub status: u16,
}

/// Lifecycle phase of a dialog instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogPhase {
    /// Hidden; fields and errors are empty.
    Closed,
    /// Visible and editable.
    Open,
    /// A submission is awaiting its reply.
    Submitting,
}

/// Result of a dependent lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Empty query; nothing was issued.
    Skipped,
    /// The response replaced the candidate data source.
    Applied {
        /// Number of candidates now offered.
        candidates: usize,
    },
    /// A newer lookup was issued first; the response was dropped.
    Stale,
    /// The lookup failed; candidates were left untouched.
    Failed,
}

/// Result of a confirm action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The dialog is not open.
    Ignored,
    /// A previous submission is still outstanding.
    Busy,
    /// Required fields are empty; nothing was submitted.
    Invalid {
        /// Keys of the empty fields.
        missing: Vec<String>,
    },
    /// The dependent field holds a value the dialog never offers.
    Disallowed {
        /// Key of the offending field.
        field: String,
    },
    /// The binding already exists; show `alert` and keep the dialog open.
    Conflict {
        /// Blocking alert text.
        alert: String,
    },
    /// The binding was created and the dialog closed.
    Accepted,
    /// The submission never produced a reply; an inline notice is shown.
    Failed,
    /// The dialog was closed before the reply arrived; the reply was dropped.
    Superseded,
}

/// Tunables taken from [`ConsoleConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BindingSettings {
    /// Page loaded on first activation.
    pub first_page: PageQuery,
    /// Status meaning "binding already exists".
    pub conflict_status: u16,
}

impl BindingSettings {
    /// Derive settings from the console configuration.
    #[must_use]
    pub const fn from_config(config: &ConsoleConfig) -> Self {
        Self {
            first_page: PageQuery::new(config.lookup.page_no, config.lookup.page_size),
            conflict_status: config.conflict_status,
        }
    }
}

impl Default for BindingSettings {
    fn default() -> Self {
        Self::from_config(&ConsoleConfig::default())
    }
}

#[derive(Debug)]
struct DialogState {
    phase: DialogPhase,
    form: BindingForm,
    candidates: Vec<Candidate>,
    search: SearchSequence,
    notice: Option<String>,
    activated: bool,
    /// Whether any lookup result has replaced the candidates yet.
    applied: bool,
    /// Bumped by every close.
    generation: u64,
    /// Set while `host.submit` is pending, even after a close.
    outstanding: bool,
}

/// Controller for one binding dialog instance.
pub struct BindingDialogController {
    spec: BindingSpec,
    messages: RefCell<BindingMessages>,
    settings: Cell<BindingSettings>,
    lookup: RefCell<Rc<dyn CandidateLookup>>,
    state: RefCell<DialogState>,
}

impl std::fmt::Debug for BindingDialogController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingDialogController")
            .field("spec", &self.spec.title_key)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl BindingDialogController {
    /// Build a closed controller.
    pub fn new(
        spec: BindingSpec,
        messages: BindingMessages,
        settings: BindingSettings,
        lookup: Rc<dyn CandidateLookup>,
    ) -> Self {
        Self {
            spec,
            messages: RefCell::new(messages),
            settings: Cell::new(settings),
            lookup: RefCell::new(lookup),
            state: RefCell::new(DialogState {
                phase: DialogPhase::Closed,
                form: BindingForm::default(),
                candidates: Vec::new(),
                search: SearchSequence::default(),
                notice: None,
                activated: false,
                applied: false,
                generation: 0,
                outstanding: false,
            }),
        }
    }

    /// Offer candidates the parent already knows.
    ///
    /// Ignored once a lookup result has been applied. Returns whether the seed was used.
    pub fn seed(&self, seed: Vec<Candidate>) -> bool {
        if self.state.borrow().applied {
            return false;
        }
        let candidates = self.filter_candidates(seed);
        self.state.borrow_mut().candidates = candidates;
        true
    }

    /// Static description driving this dialog.
    #[must_use]
    pub const fn spec(&self) -> &BindingSpec {
        &self.spec
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> DialogPhase {
        self.state.borrow().phase
    }

    /// Whether a submission is still awaiting its reply.
    #[must_use]
    pub fn submission_outstanding(&self) -> bool {
        self.state.borrow().outstanding
    }

    /// Snapshot of the form.
    #[must_use]
    pub fn form(&self) -> BindingForm {
        self.state.borrow().form.clone()
    }

    /// Current value of `field`.
    #[must_use]
    pub fn value(&self, field: &str) -> String {
        self.state.borrow().form.value(field).to_string()
    }

    /// Error attached to `field`, if any.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<String> {
        self.state.borrow().form.error(field).map(ToString::to_string)
    }

    /// Options currently offered by the dependent dropdown.
    #[must_use]
    pub fn candidates(&self) -> Vec<Candidate> {
        self.state.borrow().candidates.clone()
    }

    /// Inline, non-blocking notice (lookup or transport failure).
    #[must_use]
    pub fn notice(&self) -> Option<String> {
        self.state.borrow().notice.clone()
    }

    /// Swap in strings for another language, keeping values and errors.
    ///
    /// Errors and notices already shown are re-worded in place.
    pub fn set_messages(&self, messages: BindingMessages) {
        let previous = self.messages.replace(messages);
        let current = self.messages.borrow();
        let mut state = self.state.borrow_mut();
        for ((field, old), (_, new)) in previous.required.iter().zip(&current.required) {
            state.form.relabel(field, old, new);
        }
        if let Some(field) = self.spec.dependent_field() {
            state
                .form
                .relabel(field.name, &previous.disallowed, &current.disallowed);
        }
        let notice = match state.notice.as_deref() {
            Some(text) if text == previous.search_failed => Some(current.search_failed.clone()),
            Some(text) if text == previous.submit_failed => Some(current.submit_failed.clone()),
            other => other.map(ToString::to_string),
        };
        state.notice = notice;
    }

    /// Point the dialog at another data source or settings.
    ///
    /// Returns `false` when nothing changed. Otherwise pending lookups are
    /// superseded and the next [`activate`](Self::activate) reloads the first page.
    pub fn reconfigure(&self, settings: BindingSettings, lookup: Rc<dyn CandidateLookup>) -> bool {
        let same_lookup = Rc::ptr_eq(&self.lookup.borrow(), &lookup);
        if same_lookup && self.settings.get() == settings {
            return false;
        }
        tracing::debug!(dialog = self.spec.title_key, "binding dialog reconfigured");
        self.settings.set(settings);
        *self.lookup.borrow_mut() = lookup;
        let mut state = self.state.borrow_mut();
        state.search.issue();
        state.activated = false;
        state.applied = false;
        true
    }

    /// Follow the parent's visibility flag.
    ///
    /// Showing never resets; hiding closes (and resets) the dialog.
    pub fn set_visible(&self, visible: bool) {
        let phase = self.phase();
        match (visible, phase) {
            (true, DialogPhase::Closed) => {
                self.state.borrow_mut().phase = DialogPhase::Open;
            }
            (false, DialogPhase::Open | DialogPhase::Submitting) => self.close(),
            _ => {}
        }
    }

    /// Update one field from user input.
    ///
    /// # Errors
    /// Returns [`BindingError::UnknownField`] when the dialog has no such field.
    pub fn edit(&self, field: &str, value: impl Into<String>) -> Result<(), BindingError> {
        if self.spec.field(field).is_none() {
            return Err(BindingError::UnknownField {
                field: field.to_string(),
            });
        }
        self.state.borrow_mut().form.set(field, value);
        Ok(())
    }

    /// Load the first page of the dependent dataset, once per data source.
    pub async fn activate(&self) -> SearchOutcome {
        let ticket = {
            let mut state = self.state.borrow_mut();
            if state.activated {
                return SearchOutcome::Skipped;
            }
            state.activated = true;
            state.search.issue()
        };
        let first_page = self.settings.get().first_page;
        tracing::debug!(
            dialog = self.spec.title_key,
            page_no = first_page.page_no,
            page_size = first_page.page_size,
            "loading initial candidates"
        );
        let lookup = Rc::clone(&self.lookup.borrow());
        let result = lookup.first_page(first_page).await;
        self.apply_lookup(ticket, result)
    }

    /// React to typing in the dependent field.
    ///
    /// An empty query issues nothing and keeps the current candidates.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        if query.is_empty() {
            return SearchOutcome::Skipped;
        }
        let ticket = self.state.borrow_mut().search.issue();
        tracing::debug!(dialog = self.spec.title_key, ?ticket, query, "candidate search issued");
        let lookup = Rc::clone(&self.lookup.borrow());
        let result = lookup.search(query).await;
        self.apply_lookup(ticket, result)
    }

    /// Validate and, when every required field is filled, submit through `host`.
    pub async fn confirm(&self, host: &dyn BindingHost) -> ConfirmOutcome {
        let (submission, issued) = {
            let messages = self.messages.borrow();
            let mut state = self.state.borrow_mut();
            match state.phase {
                DialogPhase::Closed => return ConfirmOutcome::Ignored,
                DialogPhase::Submitting => return ConfirmOutcome::Busy,
                DialogPhase::Open if state.outstanding => return ConfirmOutcome::Busy,
                DialogPhase::Open => {}
            }
            let values = match state.form.validate(&messages.required) {
                Err(missing) => return ConfirmOutcome::Invalid { missing },
                Ok(values) => values,
            };
            if let Some(field) = self.disallowed_field(&state.form) {
                state.form.set_error(field, messages.disallowed.clone());
                return ConfirmOutcome::Disallowed {
                    field: field.to_string(),
                };
            }
            state.phase = DialogPhase::Submitting;
            state.outstanding = true;
            state.notice = None;
            let submission = BindingSubmission {
                values,
                success_message: messages.success.clone(),
            };
            (submission, state.generation)
        };

        let result = host.submit(submission).await;

        let current = {
            let mut state = self.state.borrow_mut();
            state.outstanding = false;
            state.generation == issued
        };
        if !current {
            tracing::debug!(dialog = self.spec.title_key, "dropping reply for a closed dialog");
            return ConfirmOutcome::Superseded;
        }

        match result {
            Ok(response) if response.status == self.settings.get().conflict_status => {
                tracing::debug!(dialog = self.spec.title_key, "binding already exists");
                self.state.borrow_mut().phase = DialogPhase::Open;
                ConfirmOutcome::Conflict {
                    alert: self.messages.borrow().conflict.clone(),
                }
            }
            Ok(response) => {
                tracing::debug!(
                    dialog = self.spec.title_key,
                    status = response.status,
                    "binding created"
                );
                host.cancel();
                self.close();
                ConfirmOutcome::Accepted
            }
            Err(err) => {
                tracing::warn!(dialog = self.spec.title_key, error = %err, "binding submission failed");
                let notice = self.messages.borrow().submit_failed.clone();
                let mut state = self.state.borrow_mut();
                state.phase = DialogPhase::Open;
                state.notice = Some(notice);
                ConfirmOutcome::Failed
            }
        }
    }

    /// Cancel button / close icon: ask the parent to hide, then reset.
    pub fn cancel(&self, host: &dyn BindingHost) {
        host.cancel();
        self.close();
    }

    /// Reset fields, errors and notices and mark the dialog closed.
    pub fn close(&self) {
        let mut state = self.state.borrow_mut();
        state.form.reset();
        state.notice = None;
        state.phase = DialogPhase::Closed;
        state.generation += 1;
    }

    fn apply_lookup(
        &self,
        ticket: SearchTicket,
        result: Result<Vec<Candidate>, LookupError>,
    ) -> SearchOutcome {
        if !self.state.borrow().search.is_current(ticket) {
            tracing::debug!(dialog = self.spec.title_key, ?ticket, "dropping superseded lookup");
            return SearchOutcome::Stale;
        }
        let search_failed = self.messages.borrow().search_failed.clone();
        match result {
            Ok(items) => {
                let candidates = self.filter_candidates(items);
                let count = candidates.len();
                let mut state = self.state.borrow_mut();
                state.candidates = candidates;
                state.applied = true;
                if state.notice.as_deref() == Some(search_failed.as_str()) {
                    state.notice = None;
                }
                SearchOutcome::Applied { candidates: count }
            }
            Err(err) => {
                tracing::warn!(dialog = self.spec.title_key, error = %err, "candidate lookup failed");
                self.state.borrow_mut().notice = Some(search_failed);
                SearchOutcome::Failed
            }
        }
    }

    fn is_excluded(&self, value: &str) -> bool {
        self.spec.excluded_candidates.iter().any(|excluded| *excluded == value)
    }

    fn disallowed_field(&self, form: &BindingForm) -> Option<&'static str> {
        self.spec
            .dependent_field()
            .map(|field| field.name)
            .filter(|name| self.is_excluded(form.value(name).trim()))
    }

    fn filter_candidates(&self, items: Vec<Candidate>) -> Vec<Candidate> {
        items
            .into_iter()
            .filter(|candidate| !self.is_excluded(&candidate.value))
            .collect()
    }
}
