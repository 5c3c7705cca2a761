//! Common imports for feature slices.

pub use crate::domain::constants::*;
pub use crate::domain::status::SubmissionStatus;
pub use crate::input::lenient_string;
pub use crate::safe_nanoid;
pub use crate::validation::{is_valid_email, non_blank, normalize_email, word_count};

#[cfg(feature = "server")]
pub use crate::server::{
    error::{ApiError, ApiErrorExt, ErrorResponse},
    response::IntakeResponse,
    state::ApiState,
};
