use plint_domain::constants::{
    CONTACT_ROUTE, CONTACT_TABLE, MAX_QUERY_WORDS, WAITLIST_ROUTE, WAITLIST_TABLE,
};
use plint_domain::status::SubmissionStatus;

#[test]
fn constants_match_public_contract() {
    assert_eq!(WAITLIST_ROUTE, "/api/waitlist");
    assert_eq!(CONTACT_ROUTE, "/api/contact");
    assert_eq!(WAITLIST_TABLE, "waitlist");
    assert_eq!(CONTACT_TABLE, "contact_query");
    assert_eq!(MAX_QUERY_WORDS, 200);
}

#[test]
fn status_serializes_as_lowercase_tag() {
    assert_eq!(serde_json::to_value(SubmissionStatus::Pending).unwrap(), "pending");
    assert_eq!(SubmissionStatus::default().to_string(), "pending");
}
