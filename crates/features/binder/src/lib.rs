//! Client side of the intake platform.
//!
//! [`FormBinder`] turns a landing page into a waitlist and contact front end: it creates
//! the waitlist modal and toast, routes clicks through one classifier, binds pre-existing
//! forms once, validates input, calls the backend through an [`IntakeClient`] and renders
//! the outcome. The page itself is reached only through the [`Page`] trait.
//!
//! With the `client` feature, [`HttpIntakeClient`] talks to the server over `reqwest`.
mod binder;
pub mod classify;
pub mod client;
mod config;
mod error;
pub mod modal;
pub mod page;
pub mod selector;

pub use binder::{
    EMAIL_REQUIRED, FormBinder, INVALID_EMAIL, JOINING_LABEL, OPEN_MODAL_MESSAGE, QUERY_REQUIRED,
    SUBMITTING_LABEL,
};
pub use classify::{ClickAction, ClickDecision};
#[cfg(feature = "client")]
pub use client::HttpIntakeClient;
pub use client::{GENERIC_FAILURE, IntakeClient, Outcome};
pub use config::BinderConfig;
pub use error::{BinderError, BinderErrorExt};
pub use modal::ModalState;
pub use page::{Element, Field, FormRef, Message, NodeId, Page, Timer, Tone};
pub use selector::Selector;
