use crate::classify::{BoundForms, ClickAction, ClickDecision, ClickRules};
use crate::client::IntakeClient;
use crate::config::BinderConfig;
use crate::error::BinderError;
use crate::modal::{ModalEvent, ModalState};
use crate::page::{Element, Field, FormRef, Message, NodeId, Page, Timer};
use crate::selector::Selector;
use plint_contact::SubmitQueryRequest;
use plint_kernel::prelude::{MAX_QUERY_WORDS, is_valid_email, word_count};
use plint_waitlist::JoinWaitlistRequest;
use serde::Deserialize;
use tracing::debug;

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const QUERY_REQUIRED: &str = "Please enter your query";
pub const JOINING_LABEL: &str = "Joining...";
pub const SUBMITTING_LABEL: &str = "Submitting...";
/// Host message type that opens the modal.
pub const OPEN_MODAL_MESSAGE: &str = "OPEN_WAITLIST_MODAL";

#[derive(Debug, Deserialize)]
struct HostMessage {
    #[serde(rename = "type")]
    kind: String,
}

/// Wires a landing page to the intake endpoints.
///
/// The host forwards clicks, submits, key presses, timers and frame messages; the binder
/// decides what they mean and drives the [`Page`] and [`IntakeClient`] accordingly.
#[derive(Debug)]
pub struct FormBinder<P, C> {
    page: P,
    client: C,
    config: BinderConfig,
    rules: ClickRules,
    waitlist_forms: Selector,
    contact_forms: Selector,
    forms: BoundForms,
    modal: ModalState,
    opened: u64,
    toasts: u64,
}

impl<P: Page, C: IntakeClient> FormBinder<P, C> {
    /// # Errors
    /// [`BinderError`] when a configured selector or pattern does not parse.
    pub fn new(page: P, client: C, config: BinderConfig) -> Result<Self, BinderError> {
        Ok(Self {
            rules: ClickRules::compile(&config)?,
            waitlist_forms: Selector::any(&config.form_selectors)?,
            contact_forms: Selector::any(&config.contact_form_selectors)?,
            page,
            client,
            config,
            forms: BoundForms::default(),
            modal: ModalState::Closed,
            opened: 0,
            toasts: 0,
        })
    }

    /// Creates the modal and toast when the page lacks them, then binds forms.
    /// Returns the number of newly bound forms.
    pub fn init(&mut self) -> usize {
        if !self.page.has_element(&self.config.modal_id) {
            self.page.create_modal(&self.config.modal_id);
        }
        if !self.page.has_element(&self.config.toast_id) {
            self.page.create_toast(&self.config.toast_id);
        }
        self.rebind()
    }

    /// Binds forms that appeared since the last call. Already bound forms are skipped.
    pub fn rebind(&mut self) -> usize {
        let mut bound = 0;
        for form in self.page.query_all(&self.contact_forms) {
            if self.forms.bind_contact(form) {
                self.page.watch_submit(form);
                bound += 1;
            }
        }
        for form in self.page.query_all(&self.waitlist_forms) {
            if self.forms.bind_waitlist(form) {
                self.page.watch_submit(form);
                bound += 1;
            }
        }

        debug!(bound, total = self.forms.len(), "Forms bound");
        bound
    }

    #[must_use]
    pub const fn modal(&self) -> ModalState {
        self.modal
    }

    #[must_use]
    pub const fn page(&self) -> &P {
        &self.page
    }

    pub const fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn open_modal(&mut self) {
        self.transition(ModalEvent::Trigger);
    }

    pub fn close_modal(&mut self) {
        self.transition(ModalEvent::CloseButton);
    }

    /// Shows `message` in the toast and schedules its removal.
    pub fn show_toast(&mut self, message: &Message) {
        self.toasts += 1;
        self.page.render_toast(Some(message));
        self.page.schedule(self.config.toast_duration(), Timer::HideToast(self.toasts));
    }

    /// Routes a click. The caller must honour [`ClickDecision::prevent_default`].
    pub async fn on_click(&mut self, path: &[Element]) -> ClickDecision {
        let decision = self
            .rules
            .classify(path, &self.forms, |root, selector| self.page.query_first(root, selector));
        debug!(action = ?decision.action, "Click classified");

        match decision.action {
            ClickAction::Ignore => {},
            ClickAction::OpenModal => self.transition(ModalEvent::Trigger),
            ClickAction::CloseModal => {
                let event = if self.is_backdrop(path) {
                    ModalEvent::Backdrop
                } else {
                    ModalEvent::CloseButton
                };
                self.transition(event);
            },
            ClickAction::SubmitModal => self.submit_modal().await,
            ClickAction::SubmitWaitlist(form) => self.submit_waitlist_form(form).await,
            ClickAction::SubmitContact(form) => self.submit_contact(form).await,
        }
        decision
    }

    /// Handles a submit event from a watched form (keyboard submission).
    /// Returns whether the default submission must be suppressed.
    pub async fn on_submit(&mut self, form: NodeId) -> bool {
        if self.forms.is_contact(form) {
            self.submit_contact(form).await;
            true
        } else if self.forms.is_waitlist(form) {
            self.submit_waitlist_form(form).await;
            true
        } else {
            false
        }
    }

    /// Returns whether the key was consumed.
    pub fn on_key(&mut self, key: &str) -> bool {
        if key == "Escape" && self.modal.is_open() {
            self.transition(ModalEvent::Escape);
            return true;
        }
        false
    }

    pub fn on_timer(&mut self, timer: Timer) {
        match timer {
            Timer::AutoClose(opening) if opening == self.opened && self.modal.is_open() => {
                self.transition(ModalEvent::AutoClose);
            },
            Timer::HideToast(toast) if toast == self.toasts => self.page.render_toast(None),
            stale => debug!(?stale, "Ignoring stale timer"),
        }
    }

    /// Handles a message posted by an enclosing frame. Only `{"type":"OPEN_WAITLIST_MODAL"}`
    /// is understood; anything else is ignored.
    pub fn on_host_message(&mut self, data: &str) -> bool {
        match serde_json::from_str::<HostMessage>(data) {
            Ok(message) if message.kind == OPEN_MODAL_MESSAGE => {
                self.transition(ModalEvent::Trigger);
                true
            },
            _ => false,
        }
    }

    fn is_backdrop(&self, path: &[Element]) -> bool {
        path.first().and_then(|target| target.id.as_deref()) == Some(self.config.modal_id.as_str())
    }

    fn transition(&mut self, event: ModalEvent) {
        let next = self.modal.next(event);
        match (self.modal, next) {
            (ModalState::Closed, ModalState::Open) => {
                self.opened += 1;
                self.page.set_modal_visible(true);
                debug!("Modal opened");
            },
            (ModalState::Open, ModalState::Closed) => {
                self.page.set_modal_visible(false);
                self.page.reset_form(FormRef::Modal);
                self.page.render_message(None);
                debug!(?event, "Modal closed");
            },
            _ => {},
        }
        self.modal = next;
    }

    /// Submission from the modal. Email presence is the only client-side check here.
    async fn submit_modal(&mut self) {
        let Some(email) = self.read(FormRef::Modal, Field::Email) else {
            self.page.render_message(Some(&Message::error(EMAIL_REQUIRED)));
            return;
        };
        let request = JoinWaitlistRequest {
            email: Some(email),
            full_name: self.read(FormRef::Modal, Field::Name),
            referral_source: None,
        };

        let control = self.page.submit_control(FormRef::Modal);
        let restore = self.busy(control, JOINING_LABEL);
        let outcome = self.client.join_waitlist(request).await;
        self.settle(control, restore);

        let accepted = outcome.is_accepted();
        self.page.render_message(Some(&outcome.into_message()));
        if accepted {
            self.page.reset_form(FormRef::Modal);
            self.page.schedule(self.config.auto_close(), Timer::AutoClose(self.opened));
        }
    }

    async fn submit_waitlist_form(&mut self, form: NodeId) {
        let target = FormRef::Page(form);
        let Some(email) = self.read(target, Field::Email) else {
            self.show_toast(&Message::error(EMAIL_REQUIRED));
            return;
        };
        if !is_valid_email(&email) {
            self.show_toast(&Message::error(INVALID_EMAIL));
            return;
        }
        let request = JoinWaitlistRequest {
            email: Some(email),
            full_name: self.read(target, Field::Name),
            referral_source: None,
        };

        let control = self.page.submit_control(target);
        let restore = self.busy(control, JOINING_LABEL);
        let outcome = self.client.join_waitlist(request).await;
        self.settle(control, restore);

        self.finish_page_form(target, outcome.is_accepted(), outcome.into_message());
    }

    async fn submit_contact(&mut self, form: NodeId) {
        let target = FormRef::Page(form);
        let Some(email) = self.read(target, Field::Email) else {
            self.show_toast(&Message::error(EMAIL_REQUIRED));
            return;
        };
        let Some(query) = self.read(target, Field::Query) else {
            self.show_toast(&Message::error(QUERY_REQUIRED));
            return;
        };
        let words = word_count(&query);
        if words > MAX_QUERY_WORDS {
            self.show_toast(&Message::error(format!(
                "Query exceeds {MAX_QUERY_WORDS} words limit. Current: {words} words"
            )));
            return;
        }

        let control = self.page.submit_control(target);
        let restore = self.busy(control, SUBMITTING_LABEL);
        let outcome = self.client.submit_query(SubmitQueryRequest::new(email, query)).await;
        self.settle(control, restore);

        self.finish_page_form(target, outcome.is_accepted(), outcome.into_message());
    }

    fn finish_page_form(&mut self, form: FormRef, accepted: bool, message: Message) {
        self.show_toast(&message);
        if accepted {
            self.page.reset_form(form);
        }
    }

    /// Trimmed field value, `None` when empty.
    fn read(&self, form: FormRef, field: Field) -> Option<String> {
        self.page
            .field(form, field)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
    }

    /// Disables `control` and swaps its label. Returns the label to restore.
    fn busy(&mut self, control: Option<NodeId>, label: &str) -> Option<String> {
        let control = control?;
        let original = self.page.label(control);
        self.page.set_disabled(control, true);
        self.page.set_label(control, label);
        original
    }

    fn settle(&mut self, control: Option<NodeId>, original: Option<String>) {
        if let Some(control) = control {
            self.page.set_disabled(control, false);
            if let Some(label) = original {
                self.page.set_label(control, &label);
            }
        }
    }
}
