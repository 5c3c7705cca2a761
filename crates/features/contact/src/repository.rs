use crate::model::ContactQuery;
use plint_database::{Database, DatabaseError, DatabaseErrorExt};
use plint_kernel::prelude::{CONTACT_TABLE, SubmissionStatus};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ContactRecord {
    email: String,
    query: String,
    status: SubmissionStatus,
    created_at: String,
}

#[derive(Debug, Clone)]
pub(crate) struct ContactRepository {
    db: Database,
}

impl ContactRepository {
    pub(crate) const fn new(db: Database) -> Self {
        Self { db }
    }

    pub(crate) async fn insert(&self, query: &ContactQuery) -> Result<(), DatabaseError> {
        let record = ContactRecord {
            email: query.email.clone(),
            query: query.query.clone(),
            status: query.status,
            created_at: query.created_at.clone(),
        };

        self.db
            .query("CREATE type::thing($table, $id) CONTENT $content RETURN NONE")
            .bind(("table", CONTACT_TABLE))
            .bind(("id", query.id.clone()))
            .bind(("content", record))
            .await
            .and_then(|response| response.check())
            .context("Inserting contact query")?;

        Ok(())
    }

    #[cfg(test)]
    pub(crate) async fn by_email(&self, email: &str) -> Result<Vec<String>, DatabaseError> {
        self.db
            .query("SELECT VALUE query FROM type::table($table) WHERE email = $email")
            .bind(("table", CONTACT_TABLE))
            .bind(("email", email.to_owned()))
            .await
            .context("Listing contact queries")?
            .take(0)
            .context("Reading contact queries")
    }
}
