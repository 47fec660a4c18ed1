//! Profile persistence: a key-value backend plus the profile codec on top.

mod error;
mod memory;
mod models;
mod schema; // Diesel generated schema - internal use only
mod sqlite;

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{Language, StatsLedger};

pub use error::StoreError;
pub use memory::MemoryStore;
pub use models::ProfileRow;
pub use sqlite::SqliteStore;

/// Key under which the learner profile is stored.
pub const PROFILE_KEY: &str = "linguabird_user";

/// Minimal synchronous key-value persistence.
pub trait KeyValueStore: Send + std::fmt::Debug {
    /// Reads the value for `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// What gets persisted for the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct ProfileRecord {
    stats: StatsLedger,
    language: Language,
}

/// Loads and saves the [`ProfileRecord`] through a [`KeyValueStore`].
#[derive(Debug)]
pub struct ProfileStore {
    backend: Box<dyn KeyValueStore>,
}

impl ProfileStore {
    /// Wraps a backend.
    #[instrument(skip(backend))]
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        info!("Creating ProfileStore");
        Self {
            backend: Box::new(backend),
        }
    }

    /// Loads the stored profile.
    ///
    /// Returns `Ok(None)` on first run. A value that fails to parse is
    /// logged and treated the same as a missing one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only when the backend itself fails.
    #[instrument(skip(self))]
    pub fn load(&self) -> Result<Option<ProfileRecord>, StoreError> {
        let Some(raw) = self.backend.get(PROFILE_KEY)? else {
            debug!("No stored profile");
            return Ok(None);
        };
        match serde_json::from_str::<ProfileRecord>(&raw) {
            Ok(record) => {
                info!(language = %record.language.name(), "Profile loaded");
                Ok(Some(record))
            }
            Err(e) => {
                warn!(error = %e, "Stored profile is corrupted, starting fresh");
                Ok(None)
            }
        }
    }

    /// Saves `record`, replacing any previous profile.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if encoding or the backend write fails.
    #[instrument(skip(self, record))]
    pub fn save(&mut self, record: &ProfileRecord) -> Result<(), StoreError> {
        let raw = serde_json::to_string(record)?;
        self.backend.put(PROFILE_KEY, &raw)?;
        info!(language = %record.language.name(), "Profile saved");
        Ok(())
    }
}
