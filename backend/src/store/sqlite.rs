use super::{ConnectorPatch, ConnectorStore, MatchKey, StoreError, StoreResult};
use common::model::connector::Connector;
use common::model::locale::Locale;
use log::{debug, info};
use rusqlite::types::Type;
use rusqlite::{params, Connection, ErrorCode};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS connectors (
        id              TEXT NOT NULL,
        locale          TEXT NOT NULL,
        collection_name TEXT NOT NULL,
        title           TEXT NOT NULL,
        created_at      TEXT NOT NULL,
        updated_at      TEXT NOT NULL,
        PRIMARY KEY (id, locale)
    );
    CREATE INDEX IF NOT EXISTS connectors_by_collection
        ON connectors (collection_name, locale);
";

const SELECT_COLUMNS: &str =
    "SELECT id, collection_name, title, locale, created_at, updated_at FROM connectors";

/// Shared handle on the SQLite connector table.
///
/// One connection guarded by a mutex: every request, and every synchronization
/// pass run through `transaction`, is serialized on it.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path).map_err(|e| {
            StoreError::Unavailable(format!("cannot open {}: {}", path.display(), e))
        })?;
        info!("Opened connector store at {}", path.display());
        Ok(Self::from_connection(conn))
    }

    #[cfg(test)]
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn init_schema(&self) -> StoreResult<()> {
        let conn = self.lock()?;
        create_schema(&conn)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("connection lock poisoned".to_string()))
    }

    /// Runs `f` against the connection without opening a transaction.
    pub fn read<T, E>(&self, f: impl FnOnce(&Connection) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let conn = self.lock()?;
        f(&conn)
    }

    /// Runs `f` inside a transaction, committing only if it returns `Ok`.
    pub fn transaction<T, E>(&self, f: impl FnOnce(&Connection) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(classify)?;
        let value = f(&tx)?;
        tx.commit().map_err(classify)?;
        Ok(value)
    }
}

pub fn create_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(SCHEMA).map_err(classify)
}

/// Maps a missing table to `Unavailable`; everything else stays a query error.
fn classify(e: rusqlite::Error) -> StoreError {
    match &e {
        rusqlite::Error::SqliteFailure(_, Some(message)) if message.contains("no such table") => {
            StoreError::Unavailable(message.clone())
        }
        _ => StoreError::Query(e),
    }
}

fn row_to_connector(row: &rusqlite::Row) -> rusqlite::Result<Connector> {
    let raw_locale: String = row.get(3)?;
    let locale = Locale::parse(&raw_locale)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
    Ok(Connector {
        id: row.get(0)?,
        collection_name: row.get(1)?,
        title: row.get(2)?,
        locale,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

impl ConnectorStore for Connection {
    fn list_all(&self, locale: Option<&Locale>) -> StoreResult<Vec<Connector>> {
        let records = match locale {
            Some(locale) => {
                let mut stmt = self
                    .prepare(&format!(
                        "{} WHERE locale = ?1 ORDER BY created_at, id, locale",
                        SELECT_COLUMNS
                    ))
                    .map_err(classify)?;
                let rows = stmt.query_map(params![locale.as_str()], row_to_connector)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self
                    .prepare(&format!("{} ORDER BY created_at, id, locale", SELECT_COLUMNS))
                    .map_err(classify)?;
                let rows = stmt.query_map([], row_to_connector)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        debug!("Loaded {} connector records", records.len());
        Ok(records)
    }

    fn create(&self, record: &Connector) -> StoreResult<()> {
        let result = self.execute(
            "INSERT INTO connectors (id, locale, collection_name, title, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.id,
                record.locale.as_str(),
                record.collection_name,
                record.title,
                record.created_at,
                record.updated_at
            ],
        );
        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::DuplicateKey {
                    id: record.id.clone(),
                    locale: record.locale.to_string(),
                })
            }
            Err(e) => Err(classify(e)),
        }
    }

    fn update_many(&self, key: &MatchKey, patch: &ConnectorPatch) -> StoreResult<usize> {
        const SET: &str = "UPDATE connectors
             SET title = COALESCE(?1, title),
                 collection_name = COALESCE(?2, collection_name),
                 updated_at = ?3";
        let changed = match key {
            MatchKey::Id(id) => self.execute(
                &format!("{} WHERE id = ?4", SET),
                params![patch.title, patch.collection_name, patch.updated_at, id],
            ),
            MatchKey::IdLocale(id, locale) => self.execute(
                &format!("{} WHERE id = ?4 AND locale = ?5", SET),
                params![
                    patch.title,
                    patch.collection_name,
                    patch.updated_at,
                    id,
                    locale.as_str()
                ],
            ),
        }
        .map_err(classify)?;
        Ok(changed)
    }

    fn delete_many(&self, key: &MatchKey) -> StoreResult<usize> {
        let removed = match key {
            MatchKey::Id(id) => self.execute("DELETE FROM connectors WHERE id = ?1", params![id]),
            MatchKey::IdLocale(id, locale) => self.execute(
                "DELETE FROM connectors WHERE id = ?1 AND locale = ?2",
                params![id, locale.as_str()],
            ),
        }
        .map_err(classify)?;
        Ok(removed)
    }
}
