//! SQLite-backed key-value store.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::store::models::{NewProfileRow, ProfileRow};
use crate::store::schema;
use crate::{KeyValueStore, StoreError};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Key-value store over a single SQLite table.
///
/// A connection is opened per operation; the store is only touched at
/// startup and on onboarding.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens the database at `db_path`, creating it and applying pending
    /// migrations as needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, StoreError> {
        info!("Opening profile database");
        let store = Self { db_path };
        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Migrations failed: {}", e)))?;
        debug!(applied = applied.len(), "Migrations applied");
        Ok(store)
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Reads the full row for `key`, including its timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn row(&self, key: &str) -> Result<Option<ProfileRow>, StoreError> {
        let mut conn = self.connection()?;
        let row = schema::profiles::table
            .find(key)
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row)
    }
}

impl KeyValueStore for SqliteStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let row = self.row(key)?;
        debug!(found = row.is_some(), "Looked up key");
        Ok(row.map(|r| r.value().clone()))
    }

    #[instrument(skip(self, value))]
    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let row = NewProfileRow::new(key.to_string(), value.to_string());
        diesel::replace_into(schema::profiles::table)
            .values(&row)
            .execute(&mut conn)?;
        info!(value_length = value.len(), "Value stored");
        Ok(())
    }
}
