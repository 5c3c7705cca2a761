//! # Domain Models
//!
//! Pure types shared by the server, the feature slices and the client binder.
//! Keep it lean: no I/O, networking, or heavy logic. Just data and simple helpers.

pub mod config;
pub mod constants;
pub mod registry;
pub mod status;
