//! Shared literals: routes, tables, tags and intake limits.

/// `OpenAPI` tag for platform endpoints.
pub const SYSTEM_TAG: &str = "System";
pub const WAITLIST_TAG: &str = "Waitlist";
pub const CONTACT_TAG: &str = "Contact";

pub const WAITLIST_ROUTE: &str = "/api/waitlist";
pub const CONTACT_ROUTE: &str = "/api/contact";

pub const WAITLIST_TABLE: &str = "waitlist";
pub const CONTACT_TABLE: &str = "contact_query";

/// Basic `local@domain.tld` shape shared by server and client validation.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Maximum number of whitespace-delimited words in a contact query.
pub const MAX_QUERY_WORDS: usize = 200;
