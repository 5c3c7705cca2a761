use crate::model::WaitlistEntry;
use plint_database::{Database, DatabaseError, DatabaseErrorExt};
use plint_kernel::prelude::{SubmissionStatus, WAITLIST_TABLE};
use serde::Serialize;

/// Column values written for a new signup; the record key travels separately.
#[derive(Debug, Serialize)]
struct WaitlistRecord {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    referral_source: Option<String>,
    status: SubmissionStatus,
    created_at: String,
}

impl From<&WaitlistEntry> for WaitlistRecord {
    fn from(entry: &WaitlistEntry) -> Self {
        Self {
            email: entry.email.clone(),
            full_name: entry.full_name.clone(),
            referral_source: entry.referral_source.clone(),
            status: entry.status,
            created_at: entry.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct WaitlistRepository {
    db: Database,
}

impl WaitlistRepository {
    pub(crate) const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Whether a signup with this (normalized) email is stored.
    pub(crate) async fn contains(&self, email: &str) -> Result<bool, DatabaseError> {
        let found: Vec<String> = self
            .db
            .query("SELECT VALUE email FROM type::table($table) WHERE email = $email LIMIT 1")
            .bind(("table", WAITLIST_TABLE))
            .bind(("email", email.to_owned()))
            .await
            .context("Looking up waitlist email")?
            .take(0)
            .context("Reading waitlist lookup")?;

        Ok(!found.is_empty())
    }

    /// Inserts the entry under its own id. A duplicate email fails on the unique index.
    pub(crate) async fn insert(&self, entry: &WaitlistEntry) -> Result<(), DatabaseError> {
        self.db
            .query("CREATE type::thing($table, $id) CONTENT $content RETURN NONE")
            .bind(("table", WAITLIST_TABLE))
            .bind(("id", entry.id.clone()))
            .bind(("content", WaitlistRecord::from(entry)))
            .await
            .and_then(|response| response.check())
            .context("Inserting waitlist entry")?;

        Ok(())
    }

    #[cfg(test)]
    pub(crate) async fn count(&self) -> Result<usize, DatabaseError> {
        let rows: Vec<String> = self
            .db
            .query("SELECT VALUE email FROM type::table($table)")
            .bind(("table", WAITLIST_TABLE))
            .await?
            .take(0)?;
        Ok(rows.len())
    }
}
