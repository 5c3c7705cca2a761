use std::borrow::Cow;

pub(crate) const EMAIL_REQUIRED: &str = "Email is required";
pub(crate) const INVALID_EMAIL: &str = "Please enter a valid email address";
pub(crate) const QUERY_REQUIRED: &str = "Query is required";
#[cfg(feature = "server")]
pub(crate) const STORAGE_FAILED: &str = "Failed to submit query. Please try again.";

/// Contact error type.
#[plint_derive::plint_error]
pub enum ContactError {
    #[error("Invalid contact query{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[cfg(feature = "server")]
    #[error("Contact storage error{}: {source}", format_context(.context))]
    Storage { source: plint_database::DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ContactError {
    pub(crate) fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }
}

#[cfg(feature = "server")]
impl From<ContactError> for plint_kernel::server::error::ApiError {
    fn from(error: ContactError) -> Self {
        match error {
            ContactError::Validation { message, .. } => Self::validation(message),
            ContactError::Storage { .. } => Self::storage(STORAGE_FAILED, &error),
            ContactError::Internal { .. } => Self::Internal {
                message: error.to_string().into(),
                context: None,
            },
        }
    }
}
