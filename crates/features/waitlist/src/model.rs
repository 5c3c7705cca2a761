use crate::error::{EMAIL_REQUIRED, INVALID_EMAIL, WaitlistError};
use plint_derive::api_model;
use plint_kernel::prelude::{SubmissionStatus, is_valid_email, lenient_string, non_blank, normalize_email};

/// Body of `POST /api/waitlist`.
///
/// Fields are optional at the wire level so a missing or non-string `email` reaches
/// validation and gets a precise message instead of a generic parse failure.
#[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
#[derive(Default, Clone)]
pub struct JoinWaitlistRequest {
    /// Address to register
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    /// Optional display name
    #[serde(default, deserialize_with = "lenient_string")]
    pub full_name: Option<String>,
    /// Optional free-form attribution
    #[serde(default, deserialize_with = "lenient_string")]
    pub referral_source: Option<String>,
}

impl JoinWaitlistRequest {
    pub fn with_email(email: impl Into<String>) -> Self {
        Self { email: Some(email.into()), ..Self::default() }
    }
}

/// A stored waitlist row as returned in the `data` field.
#[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct WaitlistEntry {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_source: Option<String>,
    #[cfg_attr(feature = "server", schema(value_type = String, example = "pending"))]
    pub status: SubmissionStatus,
    /// RFC 3339 UTC timestamp
    pub created_at: String,
}

/// A signup that passed validation: normalized email, trimmed optional fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistSignup {
    pub email: String,
    pub full_name: Option<String>,
    pub referral_source: Option<String>,
}

impl WaitlistSignup {
    /// Validates a raw request.
    ///
    /// # Errors
    /// [`WaitlistError::Validation`] when the email is missing, blank or malformed.
    pub fn parse(request: JoinWaitlistRequest) -> Result<Self, WaitlistError> {
        let email = non_blank(request.email.as_deref())
            .map(normalize_email)
            .ok_or(WaitlistError::validation(EMAIL_REQUIRED))?;

        if !is_valid_email(&email) {
            return Err(WaitlistError::validation(INVALID_EMAIL));
        }

        Ok(Self {
            email,
            full_name: non_blank(request.full_name.as_deref()).map(str::to_owned),
            referral_source: request.referral_source.filter(|source| !source.is_empty()),
        })
    }

    /// Stamps the signup with its record key and creation time.
    #[must_use]
    pub fn into_entry(self, id: String, created_at: String) -> WaitlistEntry {
        WaitlistEntry {
            id,
            email: self.email,
            full_name: self.full_name,
            referral_source: self.referral_source,
            status: SubmissionStatus::Pending,
            created_at,
        }
    }
}
