use plint_binder::{
    BinderConfig, ClickAction, EMAIL_REQUIRED, Element, Field, FormBinder, FormRef, INVALID_EMAIL,
    IntakeClient, JOINING_LABEL, Message, ModalState, NodeId, Outcome, Page, SUBMITTING_LABEL,
    Selector, Timer,
};
use plint_contact::SubmitQueryRequest;
use plint_waitlist::JoinWaitlistRequest;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const BODY: NodeId = NodeId(0);
const HERO: NodeId = NodeId(1);
const TEXT_BUTTON_LABEL: NodeId = NodeId(4);
const WAITLIST_FORM: NodeId = NodeId(10);
const WAITLIST_SUBMIT: NodeId = NodeId(11);
const CONTACT_FORM: NodeId = NodeId(20);
const CONTACT_SUBMIT: NodeId = NodeId(21);
const PRICING_LINK: NodeId = NodeId(30);
const NAV: NodeId = NodeId(50);
const NAV_LINK: NodeId = NodeId(51);
const NAV_ICON: NodeId = NodeId(52);
const MODAL: NodeId = NodeId(100);
const MODAL_CLOSE: NodeId = NodeId(101);
const MODAL_FORM: NodeId = NodeId(102);
const MODAL_SUBMIT: NodeId = NodeId(103);
const TOAST: NodeId = NodeId(110);

#[derive(Debug, Default)]
struct FakePage {
    nodes: BTreeMap<NodeId, Element>,
    parents: HashMap<NodeId, NodeId>,
    created: Vec<String>,
    watched: Vec<NodeId>,
    visibility: Vec<bool>,
    fields: HashMap<(FormRef, Field), String>,
    resets: Vec<FormRef>,
    controls: HashMap<FormRef, NodeId>,
    labels: HashMap<NodeId, String>,
    label_history: Vec<(NodeId, String)>,
    disabled_history: Vec<(NodeId, bool)>,
    message: Option<Message>,
    toast: Option<Message>,
    scheduled: Vec<(Duration, Timer)>,
}

impl FakePage {
    fn landing() -> Self {
        let mut page = Self::default();
        page.add(Element::new(BODY, "body"), None);
        page.add(Element::new(HERO, "div").with_id("1cv54m"), Some(BODY));
        page.add(Element::new(NodeId(2), "span").with_text("Get access"), Some(HERO));
        page.add(Element::new(NodeId(3), "button"), Some(BODY));
        page.add(
            Element::new(TEXT_BUTTON_LABEL, "span").with_text("Get  Access"),
            Some(NodeId(3)),
        );
        page.add(Element::new(NodeId(5), "p").with_text("get access today"), Some(BODY));

        page.add(Element::new(WAITLIST_FORM, "form").with_class("framer-a2xppx"), Some(BODY));
        page.add(
            Element::new(WAITLIST_SUBMIT, "button").with_attr("type", "submit"),
            Some(WAITLIST_FORM),
        );
        page.add(Element::new(NodeId(12), "p").with_text("Join"), Some(WAITLIST_SUBMIT));
        page.controls.insert(FormRef::Page(WAITLIST_FORM), WAITLIST_SUBMIT);
        page.labels.insert(WAITLIST_SUBMIT, "Join".to_owned());

        page.add(Element::new(CONTACT_FORM, "form").with_class("framer-exiu6h"), Some(BODY));
        page.add(
            Element::new(CONTACT_SUBMIT, "button").with_attr("type", "submit"),
            Some(CONTACT_FORM),
        );
        page.controls.insert(FormRef::Page(CONTACT_FORM), CONTACT_SUBMIT);
        page.labels.insert(CONTACT_SUBMIT, "Send".to_owned());

        page.add(
            Element::new(PRICING_LINK, "a").with_attr("href", "/pricing").with_text("Pricing"),
            Some(BODY),
        );

        page.add(Element::new(NAV, "div").with_class("framer-1hhz98c-container"), Some(BODY));
        page.add(Element::new(NAV_LINK, "a").with_attr("href", "/waitlist?ref=nav"), Some(NAV));
        page.add(Element::new(NAV_ICON, "svg"), Some(NAV));
        page
    }

    fn add(&mut self, element: Element, parent: Option<NodeId>) {
        if let Some(parent) = parent {
            self.parents.insert(element.node, parent);
        }
        self.nodes.insert(element.node, element);
    }

    /// Target followed by its ancestors.
    fn path(&self, node: NodeId) -> Vec<Element> {
        let mut path = Vec::new();
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            path.push(self.nodes[&current].clone());
            cursor = self.parents.get(&current).copied();
        }
        path
    }

    fn fill(&mut self, form: FormRef, field: Field, value: &str) {
        self.fields.insert((form, field), value.to_owned());
    }

    fn modal_visible(&self) -> bool {
        self.visibility.last().copied().unwrap_or(false)
    }
}

impl Page for FakePage {
    fn has_element(&self, id: &str) -> bool {
        self.nodes.values().any(|element| element.id.as_deref() == Some(id))
    }

    fn create_modal(&mut self, id: &str) {
        self.created.push(id.to_owned());
        self.add(Element::new(MODAL, "div").with_id(id), Some(BODY));
        self.add(Element::new(MODAL_CLOSE, "button").with_class("waitlist-modal-close"), Some(MODAL));
        self.add(Element::new(MODAL_FORM, "form").with_class("waitlist-modal-form"), Some(MODAL));
        self.add(
            Element::new(MODAL_SUBMIT, "button").with_class("waitlist-submit-btn"),
            Some(MODAL_FORM),
        );
        self.controls.insert(FormRef::Modal, MODAL_SUBMIT);
        self.labels.insert(MODAL_SUBMIT, "Submit".to_owned());
    }

    fn create_toast(&mut self, id: &str) {
        self.created.push(id.to_owned());
        self.add(Element::new(TOAST, "div").with_id(id), Some(BODY));
    }

    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.nodes.keys().copied().filter(|node| selector.matches(&self.path(*node))).collect()
    }

    fn query_first(&self, root: NodeId, selector: &Selector) -> Option<Element> {
        self.nodes
            .keys()
            .filter(|node| **node != root)
            .map(|node| self.path(*node))
            .find(|path| path.iter().any(|element| element.node == root) && selector.matches(path))
            .map(|path| path[0].clone())
    }

    fn watch_submit(&mut self, form: NodeId) {
        self.watched.push(form);
    }

    fn set_modal_visible(&mut self, visible: bool) {
        self.visibility.push(visible);
    }

    fn field(&self, form: FormRef, field: Field) -> Option<String> {
        self.fields.get(&(form, field)).cloned()
    }

    fn reset_form(&mut self, form: FormRef) {
        self.fields.retain(|(owner, _), _| *owner != form);
        self.resets.push(form);
    }

    fn submit_control(&self, form: FormRef) -> Option<NodeId> {
        self.controls.get(&form).copied()
    }

    fn label(&self, control: NodeId) -> Option<String> {
        self.labels.get(&control).cloned()
    }

    fn set_label(&mut self, control: NodeId, label: &str) {
        self.labels.insert(control, label.to_owned());
        self.label_history.push((control, label.to_owned()));
    }

    fn set_disabled(&mut self, control: NodeId, disabled: bool) {
        self.disabled_history.push((control, disabled));
    }

    fn render_message(&mut self, message: Option<&Message>) {
        self.message = message.cloned();
    }

    fn render_toast(&mut self, message: Option<&Message>) {
        self.toast = message.cloned();
    }

    fn schedule(&mut self, delay: Duration, timer: Timer) {
        self.scheduled.push((delay, timer));
    }
}

#[derive(Debug, Clone, Default)]
struct FakeClient {
    replies: Arc<Mutex<VecDeque<Outcome>>>,
    waitlist: Arc<Mutex<Vec<JoinWaitlistRequest>>>,
    contact: Arc<Mutex<Vec<SubmitQueryRequest>>>,
}

impl FakeClient {
    fn reply(&self, outcome: Outcome) {
        self.replies.lock().unwrap().push_back(outcome);
    }

    fn next(&self, fallback: &str) -> Outcome {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Outcome::Accepted(fallback.to_owned()))
    }

    fn waitlist_calls(&self) -> Vec<JoinWaitlistRequest> {
        self.waitlist.lock().unwrap().clone()
    }

    fn contact_calls(&self) -> Vec<SubmitQueryRequest> {
        self.contact.lock().unwrap().clone()
    }
}

impl IntakeClient for FakeClient {
    fn join_waitlist(&self, request: JoinWaitlistRequest) -> impl Future<Output = Outcome> + Send {
        self.waitlist.lock().unwrap().push(request);
        let outcome = self.next("Successfully joined the waitlist!");
        async move { outcome }
    }

    fn submit_query(&self, request: SubmitQueryRequest) -> impl Future<Output = Outcome> + Send {
        self.contact.lock().unwrap().push(request);
        let outcome = self.next("Your query has been submitted successfully!");
        async move { outcome }
    }
}

fn binder() -> (FormBinder<FakePage, FakeClient>, FakeClient) {
    let client = FakeClient::default();
    let mut binder =
        FormBinder::new(FakePage::landing(), client.clone(), BinderConfig::default()).unwrap();
    assert_eq!(binder.init(), 2);
    (binder, client)
}

#[test]
fn init_creates_missing_elements_once() {
    let (mut binder, _) = binder();
    assert_eq!(binder.page().created, ["waitlist-modal", "waitlist-toast"]);

    assert_eq!(binder.init(), 0);
    assert_eq!(binder.page().created.len(), 2);
    assert_eq!(binder.page().watched, [CONTACT_FORM, WAITLIST_FORM]);
}

#[test]
fn rebind_only_picks_up_new_forms() {
    let (mut binder, _) = binder();
    assert_eq!(binder.rebind(), 0);

    let late = NodeId(40);
    binder.page_mut().add(Element::new(late, "form").with_class("framer-a2xppx"), Some(BODY));
    assert_eq!(binder.rebind(), 1);
    assert_eq!(binder.rebind(), 0);
    assert_eq!(binder.page().watched, [CONTACT_FORM, WAITLIST_FORM, late]);
}

#[tokio::test]
async fn get_access_text_opens_modal_once_and_suppresses_navigation() {
    let (mut binder, _) = binder();
    let path = binder.page().path(TEXT_BUTTON_LABEL);

    let decision = binder.on_click(&path).await;
    assert_eq!(decision.action, ClickAction::OpenModal);
    assert!(decision.prevent_default);
    assert_eq!(binder.modal(), ModalState::Open);

    binder.on_click(&path).await;
    assert_eq!(binder.page().visibility, [true]);
}

#[tokio::test]
async fn nav_container_opens_modal_from_any_child() {
    for node in [NAV_ICON, NAV_LINK] {
        let (mut binder, _) = binder();
        let path = binder.page().path(node);

        let decision = binder.on_click(&path).await;
        assert_eq!(decision.action, ClickAction::OpenModal);
        assert!(decision.prevent_default);
        assert_eq!(binder.modal(), ModalState::Open);
    }
}

#[tokio::test]
async fn plain_text_and_unrelated_links_pass_through() {
    let (mut binder, _) = binder();

    for node in [NodeId(5), PRICING_LINK] {
        let path = binder.page().path(node);
        let decision = binder.on_click(&path).await;
        assert!(!decision.prevent_default);
    }
    assert_eq!(binder.modal(), ModalState::Closed);
}

#[tokio::test]
async fn modal_submission_renders_inline_and_auto_closes() {
    let (mut binder, client) = binder();
    binder.open_modal();
    binder.page_mut().fill(FormRef::Modal, Field::Email, "  Ada@Example.com ");
    binder.page_mut().fill(FormRef::Modal, Field::Name, " Ada ");

    let path = binder.page().path(MODAL_SUBMIT);
    assert_eq!(binder.on_click(&path).await.action, ClickAction::SubmitModal);

    let calls = client.waitlist_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].email.as_deref(), Some("Ada@Example.com"));
    assert_eq!(calls[0].full_name.as_deref(), Some("Ada"));

    let page = binder.page();
    assert_eq!(
        page.label_history,
        [(MODAL_SUBMIT, JOINING_LABEL.to_owned()), (MODAL_SUBMIT, "Submit".to_owned())]
    );
    assert_eq!(page.disabled_history, [(MODAL_SUBMIT, true), (MODAL_SUBMIT, false)]);
    assert_eq!(page.message, Some(Message::success("Successfully joined the waitlist!")));
    assert_eq!(page.resets, [FormRef::Modal]);
    assert_eq!(page.scheduled, [(Duration::from_secs(2), Timer::AutoClose(1))]);
    assert!(page.toast.is_none());

    binder.on_timer(Timer::AutoClose(1));
    assert_eq!(binder.modal(), ModalState::Closed);
    assert!(!binder.page().modal_visible());
    assert!(binder.page().message.is_none());
}

#[tokio::test]
async fn modal_requires_email_but_not_its_shape() {
    let (mut binder, client) = binder();
    binder.open_modal();
    let path = binder.page().path(MODAL_SUBMIT);

    binder.on_click(&path).await;
    assert_eq!(binder.page().message, Some(Message::error(EMAIL_REQUIRED)));
    assert!(client.waitlist_calls().is_empty());

    client.reply(Outcome::Rejected("Invalid email format".to_owned()));
    binder.page_mut().fill(FormRef::Modal, Field::Email, "not-an-email");
    binder.on_click(&path).await;

    assert_eq!(client.waitlist_calls().len(), 1);
    assert_eq!(binder.page().message, Some(Message::error("Invalid email format")));
    assert!(binder.page().scheduled.is_empty());
    assert_eq!(binder.modal(), ModalState::Open);
}

#[tokio::test]
async fn page_form_checks_shape_and_reports_through_toast() {
    let (mut binder, client) = binder();
    let path = binder.page().path(NodeId(12));

    binder.page_mut().fill(FormRef::Page(WAITLIST_FORM), Field::Email, "not-an-email");
    let decision = binder.on_click(&path).await;
    assert_eq!(decision.action, ClickAction::SubmitWaitlist(WAITLIST_FORM));
    assert_eq!(binder.page().toast, Some(Message::error(INVALID_EMAIL)));
    assert!(client.waitlist_calls().is_empty());

    client.reply(Outcome::Rejected("This email is already on the waitlist".to_owned()));
    binder.page_mut().fill(FormRef::Page(WAITLIST_FORM), Field::Email, "ada@example.com");
    binder.on_click(&path).await;

    let page = binder.page();
    assert_eq!(page.toast, Some(Message::error("This email is already on the waitlist")));
    assert!(page.resets.is_empty());
    assert_eq!(page.labels[&WAITLIST_SUBMIT], "Join");
    assert_eq!(page.label_history[0], (WAITLIST_SUBMIT, JOINING_LABEL.to_owned()));
    assert!(page.message.is_none());
}

#[tokio::test]
async fn contact_enforces_word_ceiling_before_calling() {
    let (mut binder, client) = binder();
    let form = FormRef::Page(CONTACT_FORM);
    binder.page_mut().fill(form, Field::Email, "bob@example.com");
    binder.page_mut().fill(form, Field::Query, &vec!["word"; 201].join(" "));

    let path = binder.page().path(CONTACT_SUBMIT);
    assert_eq!(binder.on_click(&path).await.action, ClickAction::SubmitContact(CONTACT_FORM));
    assert_eq!(
        binder.page().toast,
        Some(Message::error("Query exceeds 200 words limit. Current: 201 words"))
    );
    assert!(client.contact_calls().is_empty());

    binder.page_mut().fill(form, Field::Query, " When do invites go out? ");
    binder.on_click(&path).await;

    let calls = client.contact_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].email.as_deref(), Some("bob@example.com"));
    assert_eq!(calls[0].query.as_deref(), Some("When do invites go out?"));

    let page = binder.page();
    assert_eq!(page.toast, Some(Message::success("Your query has been submitted successfully!")));
    assert_eq!(page.resets, [form]);
    assert_eq!(
        page.label_history,
        [(CONTACT_SUBMIT, SUBMITTING_LABEL.to_owned()), (CONTACT_SUBMIT, "Send".to_owned())]
    );
}

#[tokio::test]
async fn keyboard_submit_routes_by_bound_form() {
    let (mut binder, client) = binder();
    let form = FormRef::Page(CONTACT_FORM);
    binder.page_mut().fill(form, Field::Email, "bob@example.com");

    assert!(binder.on_submit(CONTACT_FORM).await);
    assert_eq!(binder.page().toast, Some(Message::error("Please enter your query")));
    assert!(!binder.on_submit(NodeId(999)).await);
    assert!(client.contact_calls().is_empty());
}

#[tokio::test]
async fn close_paths_reset_the_modal() {
    let (mut binder, _) = binder();

    assert!(!binder.on_key("Escape"));

    binder.open_modal();
    binder.page_mut().fill(FormRef::Modal, Field::Email, "half-typed");
    assert!(binder.on_key("Escape"));
    assert_eq!(binder.modal(), ModalState::Closed);
    assert_eq!(binder.page().field(FormRef::Modal, Field::Email), None);

    binder.open_modal();
    let backdrop = binder.page().path(MODAL);
    assert_eq!(binder.on_click(&backdrop).await.action, ClickAction::CloseModal);
    assert_eq!(binder.modal(), ModalState::Closed);

    binder.open_modal();
    let close = binder.page().path(MODAL_CLOSE);
    binder.on_click(&close).await;
    assert_eq!(binder.modal(), ModalState::Closed);
    assert_eq!(binder.page().visibility, [true, false, true, false, true, false]);
}

#[tokio::test]
async fn auto_close_from_an_earlier_opening_is_ignored() {
    let (mut binder, _) = binder();
    binder.open_modal();
    binder.page_mut().fill(FormRef::Modal, Field::Email, "ada@example.com");
    let path = binder.page().path(MODAL_SUBMIT);
    binder.on_click(&path).await;

    binder.close_modal();
    binder.open_modal();
    binder.on_timer(Timer::AutoClose(1));
    assert_eq!(binder.modal(), ModalState::Open);
}

#[test]
fn toast_hides_only_for_the_latest_timer() {
    let (mut binder, _) = binder();
    binder.show_toast(&Message::success("first"));
    binder.show_toast(&Message::error("second"));
    assert_eq!(
        binder.page().scheduled,
        [(Duration::from_secs(4), Timer::HideToast(1)), (Duration::from_secs(4), Timer::HideToast(2))]
    );

    binder.on_timer(Timer::HideToast(1));
    assert_eq!(binder.page().toast, Some(Message::error("second")));
    binder.on_timer(Timer::HideToast(2));
    assert!(binder.page().toast.is_none());
}

#[test]
fn host_message_opens_modal() {
    let (mut binder, _) = binder();

    assert!(!binder.on_host_message("not json"));
    assert!(!binder.on_host_message(r#"{"type":"RESIZE"}"#));
    assert_eq!(binder.modal(), ModalState::Closed);

    assert!(binder.on_host_message(r#"{"type":"OPEN_WAITLIST_MODAL","source":"frame"}"#));
    assert_eq!(binder.modal(), ModalState::Open);
}

#[test]
fn malformed_configuration_is_rejected_up_front() {
    let config = BinderConfig {
        form_selectors: vec!["form >".to_owned()],
        ..BinderConfig::default()
    };
    assert!(FormBinder::new(FakePage::landing(), FakeClient::default(), config).is_err());
}
