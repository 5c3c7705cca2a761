use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use plint_derive::api_model;
use plint_domain::config::DatabaseConfig;
use std::borrow::Cow;
use tracing::{debug, error, info};

pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";
pub const CONFIGURATION_MESSAGE: &str = "Server configuration error";
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Failure body returned by every intake endpoint.
#[api_model]
pub struct ErrorResponse {
    /// Human readable reason
    pub error: String,
}

/// Errors crossing the HTTP boundary.
///
/// `message` is what the caller sees; `context` carries the cause and is only logged.
#[plint_derive::plint_error]
pub enum ApiError {
    #[error("Validation failed{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Conflict{}: {message}", format_context(.context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Configuration error{}: {message}", format_context(.context))]
    Configuration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Storage failure{}: {message}", format_context(.context))]
    Storage { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ApiError {
    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }

    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Conflict { message: message.into(), context: None }
    }

    /// Storage failure with a public `message`; `cause` is logged, never returned.
    pub fn storage(message: impl Into<Cow<'static, str>>, cause: impl ToString) -> Self {
        Self::Storage { message: message.into(), context: Some(cause.to_string().into()) }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Configuration { .. } | Self::Storage { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    /// Text safe to show to the caller.
    #[must_use]
    pub fn public_message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::Conflict { message, .. }
            | Self::Configuration { message, .. }
            | Self::Storage { message, .. } => message,
            Self::Internal { .. } => INTERNAL_MESSAGE,
        }
    }
}

/// Fails when the datastore settings needed to serve intake requests are absent.
///
/// # Errors
/// Returns [`ApiError::Configuration`] naming the missing setting in its context.
pub fn ensure_store_configured(database: &DatabaseConfig) -> Result<(), ApiError> {
    match database.missing_setting() {
        Some(setting) => Err(ApiError::Configuration {
            message: CONFIGURATION_MESSAGE.into(),
            context: Some(format!("missing {setting}").into()),
        }),
        None => Ok(()),
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation {
            message: INVALID_BODY_MESSAGE.into(),
            context: Some(rejection.body_text().into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Validation { .. } => debug!(error = %self, "Request rejected"),
            Self::Conflict { .. } => info!(error = %self, "Request conflicts with stored data"),
            _ => error!(error = %self, "Request failed"),
        }

        (status, Json(ErrorResponse { error: self.public_message().to_owned() })).into_response()
    }
}
