//! Flat record store for connectors, keyed by `(id, locale)`.
//!
//! The engines only ever talk to the `ConnectorStore` trait. The SQLite
//! implementation lives in `sqlite`, where the trait is implemented directly on
//! `rusqlite::Connection` so that the same engine code runs against a plain
//! connection or inside a `Transaction`.

mod sqlite;

pub use sqlite::SqliteStore;
#[cfg(test)]
pub use sqlite::create_schema;

use chrono::{DateTime, Utc};
use common::model::connector::Connector;
use common::model::locale::Locale;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The database cannot be opened, its schema is missing, or the handle is poisoned.
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    /// A record with this `(id, locale)` already exists.
    #[error("duplicate connector ({id}, {locale})")]
    DuplicateKey { id: String, locale: String },

    #[error("record store query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Which records a bulk update or delete applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchKey {
    /// Every locale variant of an item.
    Id(String),
    /// Exactly one record.
    IdLocale(String, Locale),
}

/// Fields to overwrite on matched records. `None` leaves the field untouched.
#[derive(Debug, Clone)]
pub struct ConnectorPatch {
    pub title: Option<String>,
    pub collection_name: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl ConnectorPatch {
    pub fn touch(now: DateTime<Utc>) -> Self {
        Self {
            title: None,
            collection_name: None,
            updated_at: now,
        }
    }
}

pub trait ConnectorStore {
    /// All records, optionally restricted to one locale.
    fn list_all(&self, locale: Option<&Locale>) -> StoreResult<Vec<Connector>>;

    /// Inserts one record. Fails with `DuplicateKey` instead of overwriting.
    fn create(&self, record: &Connector) -> StoreResult<()>;

    /// Returns the number of records changed.
    fn update_many(&self, key: &MatchKey, patch: &ConnectorPatch) -> StoreResult<usize>;

    /// Returns the number of records removed.
    fn delete_many(&self, key: &MatchKey) -> StoreResult<usize>;
}
