use plint_kernel::prelude::{CONTACT_ROUTE, WAITLIST_ROUTE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Binder settings. Every field has a default, so a host can override a subset
/// (for example from a JSON blob embedded in the page).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BinderConfig {
    pub waitlist_endpoint: String,
    pub contact_endpoint: String,
    /// Elements that open the modal when clicked (or clicked inside).
    pub trigger_selectors: Vec<String>,
    /// Pre-existing waitlist forms.
    pub form_selectors: Vec<String>,
    pub contact_form_selectors: Vec<String>,
    /// Case-insensitive regex matched against the text of a clicked link or button.
    pub trigger_text: String,
    /// Regexes matched against `href` of a clicked link.
    pub link_patterns: Vec<String>,
    /// Navigation button wrappers. A click anywhere inside one opens the modal when the
    /// `href` of its first link matches one of `nav_link_patterns`.
    pub nav_containers: Vec<String>,
    pub nav_link_patterns: Vec<String>,
    pub modal_id: String,
    pub toast_id: String,
    pub auto_close_ms: u64,
    pub toast_ms: u64,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            waitlist_endpoint: WAITLIST_ROUTE.to_owned(),
            contact_endpoint: CONTACT_ROUTE.to_owned(),
            trigger_selectors: vec!["#1cv54m".to_owned(), "#zk9qad".to_owned()],
            form_selectors: vec!["form.framer-a2xppx".to_owned()],
            contact_form_selectors: vec!["form.framer-exiu6h".to_owned()],
            trigger_text: r"get\s*access".to_owned(),
            link_patterns: vec!["join-waitlist".to_owned(), "/waitlist".to_owned()],
            nav_containers: vec![
                ".framer-1hhz98c-container".to_owned(),
                ".framer-1t490rx-container".to_owned(),
            ],
            nav_link_patterns: vec!["waitlist".to_owned()],
            modal_id: "waitlist-modal".to_owned(),
            toast_id: "waitlist-toast".to_owned(),
            auto_close_ms: 2_000,
            toast_ms: 4_000,
        }
    }
}

impl BinderConfig {
    /// Delay between a successful modal submission and the modal closing.
    #[must_use]
    pub const fn auto_close(&self) -> Duration {
        Duration::from_millis(self.auto_close_ms)
    }

    /// How long a toast stays visible.
    #[must_use]
    pub const fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }
}
