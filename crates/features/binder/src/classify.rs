//! Single entry point for click routing.

use crate::config::BinderConfig;
use crate::error::{BinderError, BinderErrorExt};
use crate::page::{Element, MODAL_CLOSE_CLASS, MODAL_SUBMIT_CLASS, NodeId};
use crate::selector::Selector;
use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;

/// What a click should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    Ignore,
    OpenModal,
    CloseModal,
    SubmitModal,
    SubmitWaitlist(NodeId),
    SubmitContact(NodeId),
}

/// Routing result for one click. When `prevent_default` is set the host must cancel the
/// default action and stop propagation before anything else sees the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickDecision {
    pub action: ClickAction,
    pub prevent_default: bool,
}

impl ClickDecision {
    pub const IGNORE: Self = Self { action: ClickAction::Ignore, prevent_default: false };

    const fn handle(action: ClickAction) -> Self {
        Self { action, prevent_default: true }
    }
}

/// Forms registered by `FormBinder::rebind`.
#[derive(Debug, Clone, Default)]
pub struct BoundForms {
    waitlist: BTreeSet<NodeId>,
    contact: BTreeSet<NodeId>,
}

impl BoundForms {
    /// Returns `false` when the form was already bound.
    pub fn bind_waitlist(&mut self, form: NodeId) -> bool {
        !self.contact.contains(&form) && self.waitlist.insert(form)
    }

    pub fn bind_contact(&mut self, form: NodeId) -> bool {
        !self.waitlist.contains(&form) && self.contact.insert(form)
    }

    #[must_use]
    pub fn is_waitlist(&self, form: NodeId) -> bool {
        self.waitlist.contains(&form)
    }

    #[must_use]
    pub fn is_contact(&self, form: NodeId) -> bool {
        self.contact.contains(&form)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.waitlist.len() + self.contact.len()
    }
}

/// Compiled click rules.
#[derive(Debug, Clone)]
pub struct ClickRules {
    modal_root: Selector,
    modal_close: Selector,
    modal_submit: Selector,
    triggers: Selector,
    submit_button: Selector,
    link: Selector,
    text_host: Selector,
    trigger_text: Regex,
    link_patterns: Vec<Regex>,
    nav_containers: Vec<Selector>,
    nav_link_patterns: Vec<Regex>,
}

impl ClickRules {
    /// # Errors
    /// [`BinderError::Selector`] or [`BinderError::Pattern`] for malformed configuration.
    pub fn compile(config: &BinderConfig) -> Result<Self, BinderError> {
        let modal = format!("#{}", config.modal_id);

        Ok(Self {
            modal_root: Selector::parse(&modal)?,
            modal_close: Selector::parse(&format!("{modal} .{MODAL_CLOSE_CLASS}"))?,
            modal_submit: Selector::parse(&format!("{modal} .{MODAL_SUBMIT_CLASS}"))?,
            triggers: Selector::any(&config.trigger_selectors)?,
            submit_button: Selector::parse(r#"button[type="submit"]"#)?,
            link: Selector::parse("a")?,
            text_host: Selector::parse("a, button")?,
            trigger_text: case_insensitive(&config.trigger_text).context("trigger_text")?,
            link_patterns: case_insensitive_all(&config.link_patterns).context("link_patterns")?,
            nav_containers: config
                .nav_containers
                .iter()
                .map(|source| Selector::parse(source))
                .collect::<Result<Vec<_>, BinderError>>()?,
            nav_link_patterns: case_insensitive_all(&config.nav_link_patterns)
                .context("nav_link_patterns")?,
        })
    }

    /// Routes a click. `path` is the target followed by its ancestors, nearest first.
    /// `descendant` resolves the first element under a node matching a selector; it is
    /// consulted for navigation containers whose link is not on the path.
    #[must_use]
    pub fn classify<F>(&self, path: &[Element], forms: &BoundForms, descendant: F) -> ClickDecision
    where
        F: Fn(NodeId, &Selector) -> Option<Element>,
    {
        let Some(target) = path.first() else {
            return ClickDecision::IGNORE;
        };

        // Modal internals first; nothing inside the modal may re-trigger it.
        if self.modal_root.matches(path) {
            return ClickDecision::handle(ClickAction::CloseModal);
        }
        if self.modal_root.closest(path).is_some() {
            if self.modal_close.closest(path).is_some() {
                return ClickDecision::handle(ClickAction::CloseModal);
            }
            if self.modal_submit.closest(path).is_some() {
                return ClickDecision::handle(ClickAction::SubmitModal);
            }
            return ClickDecision::IGNORE;
        }

        if let Some(button) = self.submit_button.closest(path) {
            let owner = path[button + 1..].iter().map(|element| element.node);
            for form in owner {
                if forms.is_contact(form) {
                    return ClickDecision::handle(ClickAction::SubmitContact(form));
                }
                if forms.is_waitlist(form) {
                    return ClickDecision::handle(ClickAction::SubmitWaitlist(form));
                }
            }
        }

        if self.triggers.closest(path).is_some() {
            return ClickDecision::handle(ClickAction::OpenModal);
        }

        for container in &self.nav_containers {
            let Some(index) = container.closest(path) else {
                continue;
            };
            let link = descendant(path[index].node, &self.link);
            let href = link.as_ref().and_then(|link| link.attr("href")).unwrap_or_default();
            if self.nav_link_patterns.iter().any(|pattern| pattern.is_match(href)) {
                return ClickDecision::handle(ClickAction::OpenModal);
            }
        }

        if let Some(link) = self.link.closest(path) {
            let href = path[link].attr("href").unwrap_or_default();
            if self.link_patterns.iter().any(|pattern| pattern.is_match(href)) {
                return ClickDecision::handle(ClickAction::OpenModal);
            }
        }

        if self.trigger_text.is_match(&target.text) && self.text_host.closest(path).is_some() {
            return ClickDecision::handle(ClickAction::OpenModal);
        }

        ClickDecision::IGNORE
    }
}

fn case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

fn case_insensitive_all(patterns: &[String]) -> Result<Vec<Regex>, regex::Error> {
    patterns.iter().map(|pattern| case_insensitive(pattern)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(node: u64, tag: &str) -> Element {
        Element::new(NodeId(node), tag)
    }

    fn rules() -> ClickRules {
        ClickRules::compile(&BinderConfig::default()).unwrap()
    }

    fn no_descendants(_: NodeId, _: &Selector) -> Option<Element> {
        None
    }

    #[test]
    fn text_match_requires_link_or_button_ancestor() {
        let rules = rules();
        let forms = BoundForms::default();

        let in_button =
            [el(2, "span").with_text("Get  Access"), el(1, "button"), el(0, "body")];
        assert_eq!(rules.classify(&in_button, &forms, no_descendants).action, ClickAction::OpenModal);

        let in_paragraph = [el(2, "p").with_text("get access today"), el(0, "body")];
        assert_eq!(rules.classify(&in_paragraph, &forms, no_descendants), ClickDecision::IGNORE);
    }

    #[test]
    fn trigger_ids_match_clicks_inside_them() {
        let path = [el(3, "p").with_text("Start"), el(2, "div").with_id("zk9qad"), el(0, "body")];
        let decision = rules().classify(&path, &BoundForms::default(), no_descendants);
        assert_eq!(decision.action, ClickAction::OpenModal);
        assert!(decision.prevent_default);
    }

    #[test]
    fn link_patterns_check_href() {
        let rules = rules();
        let forms = BoundForms::default();
        let link = |href: &str| [el(1, "a").with_attr("href", href), el(0, "body")];

        for href in [
            "./Join-Waitlist",
            "/waitlist",
            "/waitlist?ref=nav",
            "/waitlist#top",
            "https://plint.app/waitlist/",
        ] {
            let decision = rules.classify(&link(href), &forms, no_descendants);
            assert_eq!(decision.action, ClickAction::OpenModal, "href {href}");
        }
        assert_eq!(rules.classify(&link("/pricing"), &forms, no_descendants), ClickDecision::IGNORE);
        assert_eq!(rules.classify(&link("waitlist.html"), &forms, no_descendants), ClickDecision::IGNORE);
    }

    #[test]
    fn nav_containers_open_on_any_click_when_their_link_targets_the_waitlist() {
        let rules = rules();
        let forms = BoundForms::default();
        let nav = |node: u64| el(node, "div").with_class("framer-1t490rx-container");
        let links = |root: NodeId, selector: &Selector| {
            let link = match root.0 {
                1 => el(2, "a").with_attr("href", "https://plint.app/Waitlist"),
                5 => el(6, "a").with_attr("href", "/pricing"),
                _ => return None,
            };
            selector.matches(std::slice::from_ref(&link)).then_some(link)
        };

        let icon = [el(3, "svg"), nav(1), el(0, "body")];
        let decision = rules.classify(&icon, &forms, links);
        assert_eq!(decision.action, ClickAction::OpenModal);
        assert!(decision.prevent_default);

        let other = [el(7, "span"), nav(5), el(0, "body")];
        assert_eq!(rules.classify(&other, &forms, links), ClickDecision::IGNORE);

        let linkless = [el(9, "span"), nav(8), el(0, "body")];
        assert_eq!(rules.classify(&linkless, &forms, links), ClickDecision::IGNORE);
    }

    #[test]
    fn submit_buttons_route_to_their_bound_form() {
        let rules = rules();
        let mut forms = BoundForms::default();
        assert!(forms.bind_contact(NodeId(10)));
        assert!(forms.bind_waitlist(NodeId(20)));

        let submit = |form: u64| {
            [
                el(3, "p").with_text("Submit"),
                el(2, "button").with_attr("type", "submit"),
                el(form, "form"),
                el(0, "body"),
            ]
        };

        let routed = |form: u64| rules.classify(&submit(form), &forms, no_descendants).action;
        assert_eq!(routed(10), ClickAction::SubmitContact(NodeId(10)));
        assert_eq!(routed(20), ClickAction::SubmitWaitlist(NodeId(20)));
        assert_eq!(rules.classify(&submit(30), &forms, no_descendants), ClickDecision::IGNORE);
    }

    #[test]
    fn modal_internals_never_reopen() {
        let rules = rules();
        let forms = BoundForms::default();
        let modal = || el(100, "div").with_id("waitlist-modal");

        assert_eq!(rules.classify(&[modal()], &forms, no_descendants).action, ClickAction::CloseModal);

        let close = [el(102, "button").with_class(MODAL_CLOSE_CLASS), el(101, "div"), modal()];
        assert_eq!(rules.classify(&close, &forms, no_descendants).action, ClickAction::CloseModal);

        let submit = [
            el(104, "button").with_class(MODAL_SUBMIT_CLASS).with_text("Get access"),
            el(103, "form"),
            modal(),
        ];
        assert_eq!(rules.classify(&submit, &forms, no_descendants).action, ClickAction::SubmitModal);

        let heading = [el(105, "a").with_text("Get access"), el(101, "div"), modal()];
        assert_eq!(rules.classify(&heading, &forms, no_descendants), ClickDecision::IGNORE);
    }

    #[test]
    fn a_form_binds_to_one_kind_once() {
        let mut forms = BoundForms::default();
        assert!(forms.bind_waitlist(NodeId(1)));
        assert!(!forms.bind_waitlist(NodeId(1)));
        assert!(!forms.bind_contact(NodeId(1)));
        assert_eq!(forms.len(), 1);
    }

    #[test]
    fn bad_pattern_reports_its_setting() {
        let config = BinderConfig { trigger_text: "(".to_owned(), ..BinderConfig::default() };
        let err = ClickRules::compile(&config).unwrap_err();
        assert!(matches!(err, BinderError::Pattern { .. }));
        assert!(err.to_string().contains("trigger_text"));
    }
}
