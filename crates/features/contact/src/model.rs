use crate::error::{ContactError, EMAIL_REQUIRED, INVALID_EMAIL, QUERY_REQUIRED};
use plint_derive::api_model;
use plint_kernel::prelude::{
    MAX_QUERY_WORDS, SubmissionStatus, is_valid_email, lenient_string, non_blank, normalize_email,
    word_count,
};

/// Body of `POST /api/contact`.
#[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
#[derive(Default, Clone)]
pub struct SubmitQueryRequest {
    /// Reply-to address
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    /// Free text, at most 200 words
    #[serde(default, deserialize_with = "lenient_string")]
    pub query: Option<String>,
}

impl SubmitQueryRequest {
    pub fn new(email: impl Into<String>, query: impl Into<String>) -> Self {
        Self { email: Some(email.into()), query: Some(query.into()) }
    }
}

/// A stored contact query as returned in the `data` field.
#[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct ContactQuery {
    pub id: String,
    pub email: String,
    pub query: String,
    #[cfg_attr(feature = "server", schema(value_type = String, example = "pending"))]
    pub status: SubmissionStatus,
    /// RFC 3339 UTC timestamp
    pub created_at: String,
}

/// A query that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub email: String,
    pub query: String,
}

impl ContactSubmission {
    /// Validates a raw request: email presence and shape, query presence and word ceiling.
    ///
    /// # Errors
    /// [`ContactError::Validation`] carrying the first rule that failed.
    pub fn parse(request: SubmitQueryRequest) -> Result<Self, ContactError> {
        let email = non_blank(request.email.as_deref())
            .map(normalize_email)
            .ok_or_else(|| ContactError::validation(EMAIL_REQUIRED))?;
        if !is_valid_email(&email) {
            return Err(ContactError::validation(INVALID_EMAIL));
        }

        let query = non_blank(request.query.as_deref())
            .ok_or_else(|| ContactError::validation(QUERY_REQUIRED))?;
        let words = word_count(query);
        if words > MAX_QUERY_WORDS {
            return Err(ContactError::validation(format!(
                "Query exceeds {MAX_QUERY_WORDS} words limit. Current: {words} words"
            )));
        }

        Ok(Self { email, query: query.to_owned() })
    }

    #[must_use]
    pub fn into_query(self, id: String, created_at: String) -> ContactQuery {
        ContactQuery {
            id,
            email: self.email,
            query: self.query,
            status: SubmissionStatus::Pending,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    fn rejection(request: SubmitQueryRequest) -> String {
        match ContactSubmission::parse(request) {
            Err(ContactError::Validation { message, .. }) => message.into_owned(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn exactly_the_word_limit_is_accepted() {
        let submission =
            ContactSubmission::parse(SubmitQueryRequest::new("a@b.com", words(200))).unwrap();
        assert_eq!(word_count(&submission.query), 200);
    }

    #[test]
    fn one_word_over_reports_the_count() {
        assert_eq!(
            rejection(SubmitQueryRequest::new("a@b.com", words(201))),
            "Query exceeds 200 words limit. Current: 201 words"
        );
    }

    #[test]
    fn rules_apply_in_order() {
        assert_eq!(rejection(SubmitQueryRequest::default()), EMAIL_REQUIRED);
        assert_eq!(rejection(SubmitQueryRequest::new(" ", "hello")), EMAIL_REQUIRED);
        assert_eq!(rejection(SubmitQueryRequest::new("nope", "")), INVALID_EMAIL);
        assert_eq!(rejection(SubmitQueryRequest::new("a@b.com", "  \n ")), QUERY_REQUIRED);
        assert_eq!(
            rejection(SubmitQueryRequest { email: Some("a@b.com".to_owned()), query: None }),
            QUERY_REQUIRED
        );
    }

    #[test]
    fn values_are_normalized() {
        let submission =
            ContactSubmission::parse(SubmitQueryRequest::new(" Bob@Example.COM ", "  Pricing?  "))
                .unwrap();
        assert_eq!(submission.email, "bob@example.com");
        assert_eq!(submission.query, "Pricing?");
    }

    #[test]
    fn name_field_is_ignored() {
        let request: SubmitQueryRequest =
            serde_json::from_str(r#"{"name":"Bob","email":"bob@example.com","query":"hi"}"#).unwrap();
        assert!(ContactSubmission::parse(request).is_ok());
    }
}
