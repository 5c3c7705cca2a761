//! The binder's view of the host page.
//!
//! A [`Page`] implementation owns the real document (a browser DOM, a headless test
//! double, a native webview bridge). The binder never touches markup directly; it asks
//! the page to create, show, fill and reset things and reacts to the events the host
//! forwards to it.

use crate::selector::Selector;
use std::time::Duration;

/// Class of the close control inside the modal created by [`Page::create_modal`].
pub const MODAL_CLOSE_CLASS: &str = "waitlist-modal-close";
/// Class of the modal's submit control.
pub const MODAL_SUBMIT_CLASS: &str = "waitlist-submit-btn";

/// Opaque handle for an element, assigned by the [`Page`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

/// Snapshot of one element on a click path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub node: NodeId,
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
    /// Rendered text content, descendants included.
    pub text: String,
}

impl Element {
    pub fn new(node: NodeId, tag: impl Into<String>) -> Self {
        Self {
            node,
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            text: String::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Which form a field read or reset targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormRef {
    /// The form inside the binder-created modal.
    Modal,
    /// A pre-existing form on the page.
    Page(NodeId),
}

/// Logical form fields. The page maps them to its own inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Success,
    Error,
}

impl Tone {
    /// Style hook appended to the message or toast class list.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Feedback rendered in the modal message region or the toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub tone: Tone,
    pub text: String,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self { tone: Tone::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { tone: Tone::Error, text: text.into() }
    }
}

/// Deferred work the binder asks the host to hand back via `FormBinder::on_timer`.
///
/// The counter identifies the modal opening or toast it was scheduled for, so a timer
/// that outlived its owner is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    AutoClose(u64),
    HideToast(u64),
}

/// Host page operations used by the binder.
pub trait Page {
    /// Whether an element with this `id` attribute exists.
    fn has_element(&self, id: &str) -> bool;

    /// Inserts the modal markup under `id`: the root doubles as the backdrop and holds a
    /// [`MODAL_CLOSE_CLASS`] control, a form with name and email inputs, a message region
    /// and a [`MODAL_SUBMIT_CLASS`] control.
    fn create_modal(&mut self, id: &str);

    fn create_toast(&mut self, id: &str);

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &Selector) -> Vec<NodeId>;

    /// First descendant of `root` matching `selector`, in document order.
    fn query_first(&self, root: NodeId, selector: &Selector) -> Option<Element>;

    /// Forwards submit events of `form` to the binder from now on.
    fn watch_submit(&mut self, form: NodeId);

    /// Shows or hides the modal and locks or releases page scrolling with it.
    fn set_modal_visible(&mut self, visible: bool);

    fn field(&self, form: FormRef, field: Field) -> Option<String>;

    fn reset_form(&mut self, form: FormRef);

    /// The control that submits `form`, if it has one.
    fn submit_control(&self, form: FormRef) -> Option<NodeId>;

    fn label(&self, control: NodeId) -> Option<String>;

    fn set_label(&mut self, control: NodeId, label: &str);

    fn set_disabled(&mut self, control: NodeId, disabled: bool);

    /// Renders into the modal message region; `None` hides it.
    fn render_message(&mut self, message: Option<&Message>);

    /// Renders the toast; `None` hides it.
    fn render_toast(&mut self, message: Option<&Message>);

    fn schedule(&mut self, delay: Duration, timer: Timer);
}
