//! Backend access for the binder.

use crate::page::Message;
use plint_contact::SubmitQueryRequest;
use plint_waitlist::JoinWaitlistRequest;
use serde::Deserialize;
use std::future::Future;

/// Shown when the backend gave no usable message or could not be reached.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Result of one intake call, already reduced to what the user should read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted(String),
    Rejected(String),
}

impl Outcome {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Accepted(message) | Self::Rejected(message) => message,
        }
    }

    #[must_use]
    pub fn into_message(self) -> Message {
        match self {
            Self::Accepted(text) => Message::success(text),
            Self::Rejected(text) => Message::error(text),
        }
    }
}

/// Intake endpoints as seen by the binder. Never fails: transport and decoding problems
/// come back as [`Outcome::Rejected`].
pub trait IntakeClient {
    fn join_waitlist(&self, request: JoinWaitlistRequest) -> impl Future<Output = Outcome> + Send;

    fn submit_query(&self, request: SubmitQueryRequest) -> impl Future<Output = Outcome> + Send;
}

/// Which endpoint produced a response; picks the fallback wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Waitlist,
    Contact,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseBody {
    message: Option<String>,
    error: Option<String>,
}

impl Endpoint {
    const fn accepted_fallback(self) -> &'static str {
        match self {
            Self::Waitlist => "Successfully joined the waitlist!",
            Self::Contact => "Your query has been submitted successfully!",
        }
    }

    const fn rejected_fallback(self) -> &'static str {
        match self {
            Self::Waitlist => "Failed to join waitlist",
            Self::Contact => "Failed to submit query",
        }
    }

    /// Reads an HTTP response. A body that is not JSON yields [`GENERIC_FAILURE`]
    /// whatever the status.
    #[must_use]
    pub fn outcome(self, success: bool, body: &[u8]) -> Outcome {
        let Ok(body) = serde_json::from_slice::<ResponseBody>(body) else {
            return Outcome::Rejected(GENERIC_FAILURE.to_owned());
        };

        if success {
            Outcome::Accepted(body.message.unwrap_or_else(|| self.accepted_fallback().to_owned()))
        } else {
            Outcome::Rejected(body.error.unwrap_or_else(|| self.rejected_fallback().to_owned()))
        }
    }
}

#[cfg(feature = "client")]
pub use http::HttpIntakeClient;

#[cfg(feature = "client")]
mod http {
    use super::{Endpoint, GENERIC_FAILURE, IntakeClient, Outcome};
    use crate::config::BinderConfig;
    use crate::error::{BinderError, BinderErrorExt};
    use plint_contact::SubmitQueryRequest;
    use plint_waitlist::JoinWaitlistRequest;
    use serde::Serialize;
    use std::future::Future;
    use tracing::{debug, warn};

    /// [`IntakeClient`] over HTTP with `reqwest`. No timeout and no retry.
    #[derive(Debug, Clone)]
    pub struct HttpIntakeClient {
        http: reqwest::Client,
        waitlist_url: String,
        contact_url: String,
    }

    impl HttpIntakeClient {
        /// Builds a client posting to `base_url` joined with the configured endpoints.
        ///
        /// # Errors
        /// [`BinderError::Http`] when the TLS backend cannot be initialized.
        pub fn new(base_url: &str, config: &BinderConfig) -> Result<Self, BinderError> {
            let http = reqwest::Client::builder().build().context("Building HTTP client")?;
            let base = base_url.trim_end_matches('/');

            Ok(Self {
                http,
                waitlist_url: format!("{base}{}", config.waitlist_endpoint),
                contact_url: format!("{base}{}", config.contact_endpoint),
            })
        }

        async fn post<T>(&self, url: &str, body: &T, endpoint: Endpoint) -> Outcome
        where
            T: Serialize + Sync,
        {
            debug!(url, "Posting intake request");

            let response = match self.http.post(url).json(body).send().await {
                Ok(response) => response,
                Err(err) => {
                    warn!(url, error = %err, "Intake request failed");
                    return Outcome::Rejected(GENERIC_FAILURE.to_owned());
                },
            };

            let status = response.status();
            match response.bytes().await {
                Ok(bytes) => endpoint.outcome(status.is_success(), &bytes),
                Err(err) => {
                    warn!(url, %status, error = %err, "Intake response unreadable");
                    Outcome::Rejected(GENERIC_FAILURE.to_owned())
                },
            }
        }
    }

    impl IntakeClient for HttpIntakeClient {
        fn join_waitlist(
            &self,
            request: JoinWaitlistRequest,
        ) -> impl Future<Output = Outcome> + Send {
            async move { self.post(&self.waitlist_url, &request, Endpoint::Waitlist).await }
        }

        fn submit_query(&self, request: SubmitQueryRequest) -> impl Future<Output = Outcome> + Send {
            async move { self.post(&self.contact_url, &request, Endpoint::Contact).await }
        }
    }
}
