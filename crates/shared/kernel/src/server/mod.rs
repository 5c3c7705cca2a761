//! HTTP boundary shared by every slice: state, error mapping, envelopes and system routes.

pub mod error;
mod health;
pub mod response;
pub mod router;
pub mod state;
