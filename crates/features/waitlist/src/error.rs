use std::borrow::Cow;

pub(crate) const EMAIL_REQUIRED: &str = "Email is required";
pub(crate) const INVALID_EMAIL: &str = "Invalid email format";
#[cfg(feature = "server")]
pub(crate) const ALREADY_LISTED: &str = "This email is already on the waitlist";
#[cfg(feature = "server")]
pub(crate) const STORAGE_FAILED: &str = "Failed to add to waitlist. Please try again.";

/// Waitlist error type.
#[plint_derive::plint_error]
pub enum WaitlistError {
    #[error("Invalid waitlist signup{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Duplicate waitlist signup{}: {email}", format_context(.context))]
    AlreadyListed { email: String, context: Option<Cow<'static, str>> },

    #[cfg(feature = "server")]
    #[error("Waitlist storage error{}: {source}", format_context(.context))]
    Storage { source: plint_database::DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl WaitlistError {
    pub(crate) const fn validation(message: &'static str) -> Self {
        Self::Validation { message: Cow::Borrowed(message), context: None }
    }
}

#[cfg(feature = "server")]
impl From<WaitlistError> for plint_kernel::server::error::ApiError {
    fn from(error: WaitlistError) -> Self {
        match error {
            WaitlistError::Validation { message, .. } => Self::validation(message),
            WaitlistError::AlreadyListed { email, .. } => Self::Conflict {
                message: ALREADY_LISTED.into(),
                context: Some(email.into()),
            },
            WaitlistError::Storage { .. } => Self::storage(STORAGE_FAILED, &error),
            WaitlistError::Internal { .. } => Self::Internal {
                message: error.to_string().into(),
                context: None,
            },
        }
    }
}
