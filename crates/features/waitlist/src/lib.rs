//! Waitlist feature slice.
//!
//! Accepts `{email, full_name?, referral_source?}`, normalizes the email, rejects
//! duplicates and stores a `pending` signup. The `UNIQUE` index on `email` is the
//! authoritative duplicate guard; the lookup before insert only saves a round trip
//! on the common path.
mod error;
#[cfg(feature = "server")]
mod handler;
pub mod model;
#[cfg(feature = "server")]
mod repository;

pub use error::{WaitlistError, WaitlistErrorExt};
pub use model::{JoinWaitlistRequest, WaitlistEntry, WaitlistSignup};

#[cfg(feature = "server")]
pub use server::*;

#[cfg(feature = "server")]
mod server {
    use crate::error::{WaitlistError, WaitlistErrorExt};
    use crate::handler;
    use crate::model::{JoinWaitlistRequest, WaitlistEntry, WaitlistSignup};
    use crate::repository::WaitlistRepository;
    use chrono::{SecondsFormat, Utc};
    use plint_database::{Database, Migration};
    use plint_kernel::domain::registry::InitializedSlice;
    use plint_kernel::prelude::{ApiState, safe_nanoid};
    use tracing::{debug, info};
    use utoipa_axum::router::OpenApiRouter;
    use utoipa_axum::routes;

    /// Inserts tried per signup when concurrent transactions keep conflicting.
    const INSERT_ATTEMPTS: u32 = 3;

    /// Schema scripts owned by this slice, in application order.
    pub const MIGRATIONS: &[Migration] = &[Migration::new(
        "waitlist",
        "0001",
        include_str!("../migrations/0001_waitlist.surql"),
    )];

    /// Waitlist feature state.
    #[plint_derive::plint_slice]
    pub struct Waitlist {
        repository: WaitlistRepository,
    }

    impl Waitlist {
        #[must_use]
        pub fn from_database(database: &Database) -> Self {
            Self::new(WaitlistInner { repository: WaitlistRepository::new(database.clone()) })
        }

        /// Validates, deduplicates and stores a signup.
        ///
        /// # Errors
        /// * [`WaitlistError::Validation`] for a missing or malformed email; nothing is queried.
        /// * [`WaitlistError::AlreadyListed`] when the email is stored already, including
        ///   when a concurrent signup for the same email commits first.
        /// * [`WaitlistError::Storage`] for any other datastore failure.
        pub async fn join(&self, request: JoinWaitlistRequest) -> Result<WaitlistEntry, WaitlistError> {
            let signup = WaitlistSignup::parse(request)?;

            if self.repository.contains(&signup.email).await.context("Pre-insert lookup")? {
                debug!(email = %signup.email, "Signup rejected by lookup");
                return Err(WaitlistError::AlreadyListed { email: signup.email, context: None });
            }

            let entry = signup.into_entry(
                safe_nanoid!(),
                Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            );

            let mut attempt = 1;
            loop {
                let err = match self.repository.insert(&entry).await {
                    Ok(()) => return Ok(entry),
                    Err(err) => err,
                };

                if err.is_unique_violation() {
                    return Err(WaitlistError::AlreadyListed {
                        email: entry.email,
                        context: Some("unique index".into()),
                    });
                }

                // A losing commit race surfaces as a write conflict, not as the index error.
                if self.repository.contains(&entry.email).await.context("Post-insert lookup")? {
                    return Err(WaitlistError::AlreadyListed {
                        email: entry.email,
                        context: Some("concurrent signup".into()),
                    });
                }

                if !err.is_write_conflict() || attempt == INSERT_ATTEMPTS {
                    return Err(WaitlistError::Storage { source: err, context: Some("Insert".into()) });
                }
                debug!(attempt, email = %entry.email, "Insert hit a write conflict, retrying");
                attempt += 1;
            }
        }

        #[cfg(test)]
        pub(crate) fn repository(&self) -> &WaitlistRepository {
            &self.repository
        }
    }

    /// Initialize the waitlist feature.
    ///
    /// # Errors
    /// Currently infallible; the signature matches the other slices.
    pub fn init(database: &Database) -> Result<InitializedSlice, WaitlistError> {
        info!("Waitlist slice initialized");

        Ok(InitializedSlice::new(Waitlist::from_database(database)))
    }

    /// Routes served by this slice.
    pub fn router() -> OpenApiRouter<ApiState> {
        OpenApiRouter::new().routes(routes!(handler::join_waitlist))
    }
}
