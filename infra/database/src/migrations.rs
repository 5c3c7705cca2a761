use crate::error::{DatabaseError, DatabaseErrorExt};
use fxhash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// Bookkeeping table for applied scripts; always defined before any slice script runs.
const BOOTSTRAP: &str = "
    DEFINE TABLE IF NOT EXISTS migration SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS slice ON migration TYPE string;
    DEFINE FIELD IF NOT EXISTS version ON migration TYPE string;
    DEFINE FIELD IF NOT EXISTS checksum ON migration TYPE string;
    DEFINE FIELD IF NOT EXISTS applied_at ON migration TYPE datetime DEFAULT time::now();
    DEFINE INDEX IF NOT EXISTS migration_key ON migration FIELDS slice, version UNIQUE;
";

/// A schema script owned by a feature slice.
///
/// Scripts are identified by `(slice, version)` and fingerprinted with SHA-256. Once
/// applied, a script must never change: the runner refuses to start when the stored
/// checksum differs from the one compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    pub slice: &'static str,
    pub version: &'static str,
    pub script: &'static str,
}

impl Migration {
    #[must_use]
    pub const fn new(slice: &'static str, version: &'static str, script: &'static str) -> Self {
        Self { slice, version, script }
    }

    /// Hex-encoded SHA-256 of the script text.
    #[must_use]
    pub fn checksum(&self) -> String {
        hex::encode(Sha256::digest(self.script.as_bytes()))
    }

    fn key(&self) -> String {
        format!("{}:{}", self.slice, self.version)
    }

    fn to_applied(self) -> AppliedMigration {
        AppliedMigration {
            slice: self.slice.to_owned(),
            version: self.version.to_owned(),
            checksum: self.checksum(),
        }
    }
}

/// Outcome of a migration pass.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub applied: Vec<AppliedMigration>,
    pub skipped: Vec<AppliedMigration>,
}

/// A row of the `migration` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppliedMigration {
    pub slice: String,
    pub version: String,
    pub checksum: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner<'a> {
    db: &'a Surreal<Any>,
}

impl<'a> MigrationRunner<'a> {
    #[must_use]
    pub(crate) const fn new(db: &'a Surreal<Any>) -> Self {
        Self { db }
    }

    pub(crate) async fn run(&self, migrations: &[Migration]) -> Result<MigrationReport, DatabaseError> {
        ensure_unique_keys(migrations)?;

        self.db
            .query(BOOTSTRAP)
            .await
            .context("Defining migration table")?
            .check()
            .context("Defining migration table")?;

        let applied_migrations = self.get_migrations_map().await?;
        let mut report = MigrationReport::default();

        for migration in migrations {
            if let Some(applied) = applied_migrations.get(&migration.key()) {
                ensure_checksum_match(migration, &applied.checksum)?;
                report.skipped.push(migration.to_applied());
                continue;
            }

            self.apply_migration(migration).await?;
            report.applied.push(migration.to_applied());
        }

        Ok(report)
    }

    async fn apply_migration(&self, migration: &Migration) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE migration CONTENT {{ slice: $slice, version: $version, checksum: $checksum }};
            COMMIT TRANSACTION;",
            migration.script,
        );

        self.db
            .query(query)
            .bind(("slice", migration.slice))
            .bind(("version", migration.version))
            .bind(("checksum", migration.checksum()))
            .await
            .and_then(|response| response.check())
            .context(format!("SQL execution failed at {}", migration.key()))?;

        Ok(())
    }

    async fn get_migrations_map(
        &self,
    ) -> Result<FxHashMap<String, AppliedMigration>, DatabaseError> {
        let entries = self
            .db
            .query("SELECT slice, version, checksum FROM migration")
            .await
            .context("Loading applied migrations")?
            .take::<Vec<AppliedMigration>>(0)
            .context("Parsing migrations map")?;

        Ok(entries
            .into_iter()
            .map(|entry| (format!("{}:{}", entry.slice, entry.version), entry))
            .collect())
    }
}

fn ensure_unique_keys(migrations: &[Migration]) -> Result<(), DatabaseError> {
    let mut seen = FxHashSet::default();
    for migration in migrations {
        if !seen.insert(migration.key()) {
            return Err(DatabaseError::Validation {
                message: format!("Duplicate migration {}", migration.key()).into(),
                context: Some("Collecting slice migrations".into()),
            });
        }
    }
    Ok(())
}

fn ensure_checksum_match(migration: &Migration, existing: &str) -> Result<(), DatabaseError> {
    let checksum = migration.checksum();
    if existing != checksum {
        return Err(DatabaseError::Migration {
            message: format!(
                "Checksum mismatch for {} (expected {}, got {})",
                migration.key(),
                existing,
                checksum
            )
            .into(),
            context: Some("Migration already applied with different checksum".into()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_is_stable_sha256_hex() {
        let migration = Migration::new("waitlist", "0001", "DEFINE TABLE waitlist;");
        let checksum = migration.checksum();

        assert_eq!(checksum.len(), 64);
        assert_eq!(checksum, migration.checksum());
        assert_ne!(checksum, Migration::new("waitlist", "0001", "DEFINE TABLE other;").checksum());
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let script = "DEFINE TABLE waitlist;";
        let migrations = [Migration::new("a", "0001", script), Migration::new("a", "0001", script)];

        let err = ensure_unique_keys(&migrations).unwrap_err();
        assert!(matches!(err, DatabaseError::Validation { .. }));
    }

    #[test]
    fn checksum_mismatch_is_reported() {
        let migration = Migration::new("contact", "0001", "DEFINE TABLE contact_query;");
        assert!(ensure_checksum_match(&migration, &migration.checksum()).is_ok());

        let err = ensure_checksum_match(&migration, "deadbeef").unwrap_err();
        assert!(err.to_string().contains("contact:0001"));
    }
}
