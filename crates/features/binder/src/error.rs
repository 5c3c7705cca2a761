use std::borrow::Cow;

/// Binder error type.
///
/// Only construction can fail. Once a [`crate::FormBinder`] exists every event handler
/// degrades to user-facing feedback instead of returning an error.
#[plint_derive::plint_error]
pub enum BinderError {
    #[error("Invalid selector{}: {message}", format_context(.context))]
    Selector { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid pattern{}: {source}", format_context(.context))]
    Pattern { source: regex::Error, context: Option<Cow<'static, str>> },

    #[cfg(feature = "client")]
    #[error("HTTP client error{}: {source}", format_context(.context))]
    Http { source: reqwest::Error, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl BinderError {
    pub(crate) fn selector(message: impl Into<Cow<'static, str>>, selector: &str) -> Self {
        Self::Selector { message: message.into(), context: Some(selector.to_owned().into()) }
    }
}
