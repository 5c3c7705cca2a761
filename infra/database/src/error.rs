use std::borrow::Cow;

/// Fragment `SurrealDB` puts in the message of a unique index violation.
const UNIQUE_VIOLATION_MARKER: &str = "already contains";
/// Fragment of the message for a transaction that lost an optimistic commit race.
const WRITE_CONFLICT_MARKER: &str = "read or write conflict";

/// A specialized [`DatabaseError`] enum of this crate.
#[plint_derive::plint_error]
pub enum DatabaseError {
    /// Validation errors.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Occurs when connectivity or health checks fail.
    #[error("Database connection failed{}: {message}", format_context(.context))]
    Connection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Occurs when authentication fails.
    #[error("Authentication failed{}: {message}", format_context(.context))]
    Auth { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A wrapper for underlying `SurrealDB` engine errors.
    #[error("SurrealDB error{}: {source}", format_context(.context))]
    Surreal {
        #[source]
        source: surrealdb::Error,
        context: Option<Cow<'static, str>>,
    },

    /// Migration failures or invariant violations.
    #[error("Migration error{}: {message}", format_context(.context))]
    Migration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal database error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl DatabaseError {
    /// Whether the error was raised by a `UNIQUE` index rejecting a duplicate value.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Surreal { source, .. } => source.to_string().contains(UNIQUE_VIOLATION_MARKER),
            _ => false,
        }
    }

    /// Whether the transaction was rolled back because a concurrent one committed first.
    /// The statement may succeed, or hit a different error, when retried.
    #[must_use]
    pub fn is_write_conflict(&self) -> bool {
        match self {
            Self::Surreal { source, .. } => source.to_string().contains(WRITE_CONFLICT_MARKER),
            _ => false,
        }
    }
}
