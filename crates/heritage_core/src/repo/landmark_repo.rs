//! User landmark persistence contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the full list of user landmarks as one serialized value under a
//!   fixed namespace key.
//! - Keep SQL and JSON encoding details inside the persistence boundary.
//!
//! # Invariants
//! - `save_landmarks` replaces the whole list atomically.
//! - A namespace that was never written loads as an empty list.
//! - Loaded entries must be user-generated sites; anything else is rejected
//!   as invalid data instead of being masked.
//! - `backup_landmarks` copies the stored payload byte-for-byte, readable or not.

use crate::db::DbError;
use crate::model::site::Site;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Landmark persistence error.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Encode(serde_json::Error),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "landmark list encoding failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted landmark data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Infix between the namespace and the timestamp of a backup key.
pub const BACKUP_KEY_INFIX: &str = ".backup.";

/// Repository interface for the user landmark list.
pub trait LandmarkRepository {
    /// Loads the persisted list, most-recent-first.
    fn load_landmarks(&self) -> StoreResult<Vec<Site>>;
    /// Replaces the persisted list.
    fn save_landmarks(&self, sites: &[Site]) -> StoreResult<()>;
    /// Copies the raw persisted payload aside, stamped with `taken_at_ms`.
    ///
    /// Returns the backup key, or `None` when nothing was stored.
    fn backup_landmarks(&self, taken_at_ms: i64) -> StoreResult<Option<String>>;
}

/// SQLite key-value backed landmark repository.
pub struct SqliteLandmarkRepository<'conn> {
    conn: &'conn Connection,
    namespace: String,
}

impl<'conn> SqliteLandmarkRepository<'conn> {
    pub fn new(conn: &'conn Connection, namespace: impl Into<String>) -> Self {
        Self {
            conn,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl LandmarkRepository for SqliteLandmarkRepository<'_> {
    fn load_landmarks(&self) -> StoreResult<Vec<Site>> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE namespace = ?1;",
                [self.namespace.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        let Some(payload) = stored else {
            return Ok(Vec::new());
        };

        let sites: Vec<Site> = serde_json::from_str(&payload).map_err(|err| {
            StoreError::InvalidData(format!(
                "namespace `{}` does not hold a landmark list: {err}",
                self.namespace
            ))
        })?;

        if let Some(site) = sites.iter().find(|site| !site.is_user_generated) {
            return Err(StoreError::InvalidData(format!(
                "site `{}` in namespace `{}` is not user-generated",
                site.id, self.namespace
            )));
        }

        Ok(sites)
    }

    fn save_landmarks(&self, sites: &[Site]) -> StoreResult<()> {
        let payload = serde_json::to_string(sites)?;
        self.conn.execute(
            "INSERT INTO kv_entries (namespace, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(namespace) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.namespace.as_str(), payload],
        )?;
        Ok(())
    }

    fn backup_landmarks(&self, taken_at_ms: i64) -> StoreResult<Option<String>> {
        let backup_key = format!("{}{BACKUP_KEY_INFIX}{taken_at_ms}", self.namespace);
        let copied = self.conn.execute(
            "INSERT INTO kv_entries (namespace, value, updated_at)
             SELECT ?2, value, ?3 FROM kv_entries WHERE namespace = ?1
             ON CONFLICT(namespace) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.namespace.as_str(), backup_key, taken_at_ms],
        )?;
        Ok((copied > 0).then_some(backup_key))
    }
}
