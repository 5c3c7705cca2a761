//! Contact feature slice: validates and stores free-text queries from the landing page.
mod error;
#[cfg(feature = "server")]
mod handler;
pub mod model;
#[cfg(feature = "server")]
mod repository;

pub use error::{ContactError, ContactErrorExt};
pub use model::{ContactQuery, ContactSubmission, SubmitQueryRequest};

#[cfg(feature = "server")]
pub use server::*;

#[cfg(feature = "server")]
mod server {
    use crate::error::{ContactError, ContactErrorExt};
    use crate::handler;
    use crate::model::{ContactQuery, ContactSubmission, SubmitQueryRequest};
    use crate::repository::ContactRepository;
    use chrono::{SecondsFormat, Utc};
    use plint_database::{Database, Migration};
    use plint_kernel::domain::registry::InitializedSlice;
    use plint_kernel::prelude::{ApiState, safe_nanoid};
    use tracing::info;
    use utoipa_axum::router::OpenApiRouter;
    use utoipa_axum::routes;

    pub const MIGRATIONS: &[Migration] = &[Migration::new(
        "contact",
        "0001",
        include_str!("../migrations/0001_contact_query.surql"),
    )];

    /// Contact feature state.
    #[plint_derive::plint_slice]
    pub struct Contact {
        repository: ContactRepository,
    }

    impl Contact {
        #[must_use]
        pub fn from_database(database: &Database) -> Self {
            Self::new(ContactInner { repository: ContactRepository::new(database.clone()) })
        }

        /// Validates and stores a query.
        ///
        /// # Errors
        /// [`ContactError::Validation`] before any datastore call, or
        /// [`ContactError::Storage`] when the insert fails.
        pub async fn submit(&self, request: SubmitQueryRequest) -> Result<ContactQuery, ContactError> {
            let query = ContactSubmission::parse(request)?.into_query(
                safe_nanoid!(),
                Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            );

            self.repository.insert(&query).await.context("Insert")?;
            Ok(query)
        }

        #[cfg(test)]
        pub(crate) fn repository(&self) -> &ContactRepository {
            &self.repository
        }
    }

    /// Initialize the contact feature.
    ///
    /// # Errors
    /// Currently infallible; the signature matches the other slices.
    pub fn init(database: &Database) -> Result<InitializedSlice, ContactError> {
        info!("Contact slice initialized");

        Ok(InitializedSlice::new(Contact::from_database(database)))
    }

    pub fn router() -> OpenApiRouter<ApiState> {
        OpenApiRouter::new().routes(routes!(handler::submit_query))
    }
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;
    use plint_database::Database;

    async fn contact() -> Contact {
        let db = Database::builder()
            .url("mem://")
            .session("test", "contact")
            .migrations(MIGRATIONS.iter().copied())
            .init()
            .await
            .expect("mem db");
        Contact::from_database(&db)
    }

    #[tokio::test]
    async fn repeated_queries_from_one_address_are_kept() {
        let contact = contact().await;

        contact.submit(SubmitQueryRequest::new("Bob@Example.com", "first")).await.unwrap();
        contact.submit(SubmitQueryRequest::new("bob@example.com", " second ")).await.unwrap();

        let mut stored = contact.repository().by_email("bob@example.com").await.unwrap();
        stored.sort();
        assert_eq!(stored, ["first", "second"]);
    }

    #[tokio::test]
    async fn rejected_query_is_not_stored() {
        let contact = contact().await;
        let long = vec!["w"; 201].join(" ");

        let err = contact.submit(SubmitQueryRequest::new("bob@example.com", long)).await.unwrap_err();
        assert!(err.to_string().contains("201"));
        assert!(contact.repository().by_email("bob@example.com").await.unwrap().is_empty());
    }
}
