//! SQLite store for state the dashboard keeps on its own side of the wire.

pub mod local_state;
pub mod schema;

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

/// Shared handle to the local state database. One connection behind a mutex;
/// every access goes through [`Database::with_conn`].
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create the database file at `path` and bring its schema up to date.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        Self::prepare(Connection::open(path)?)
    }

    /// Private database that disappears with the handle.
    pub fn open_in_memory() -> Result<Self, DbError> {
        Self::prepare(Connection::open_in_memory()?)
    }

    pub fn with_conn<F, R>(&self, f: F) -> Result<R, DbError>
    where
        F: FnOnce(&Connection) -> Result<R, DbError>,
    {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        f(&conn)
    }

    fn prepare(conn: Connection) -> Result<Self, DbError> {
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA busy_timeout=5000;")?;
        schema::run_migrations(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

/// Database error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database lock poisoned")]
    LockPoisoned,

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        Database::open_in_memory().expect("Failed to create test DB")
    }

    #[test]
    fn test_open_and_migrate() {
        let db = test_db();
        assert!(!db.is_initialized().unwrap());
        assert_eq!(db.wizard_cursor().unwrap(), 0);
    }

    #[test]
    fn test_state_crud() {
        let db = test_db();
        db.set_state("key1", "value1").unwrap();
        assert_eq!(db.get_state("key1").unwrap(), Some("value1".into()));

        db.set_state("key1", "value2").unwrap();
        assert_eq!(db.get_state("key1").unwrap(), Some("value2".into()));
        assert_eq!(db.get_state("missing").unwrap(), None);
    }

    #[test]
    fn test_initialized_flag_is_sticky() {
        let db = test_db();
        assert_eq!(db.initialized_at().unwrap(), None);

        db.mark_initialized().unwrap();
        let first = db.initialized_at().unwrap().expect("timestamp recorded");
        assert!(db.is_initialized().unwrap());

        db.mark_initialized().unwrap();
        assert_eq!(db.initialized_at().unwrap(), Some(first));
    }

    #[test]
    fn test_wizard_cursor() {
        let db = test_db();
        db.set_wizard_cursor(3).unwrap();
        assert_eq!(db.wizard_cursor().unwrap(), 3);
        db.set_wizard_cursor(1).unwrap();
        assert_eq!(db.wizard_cursor().unwrap(), 1);
    }

    #[test]
    fn test_corrupt_cursor_is_invalid_data() {
        let db = test_db();
        db.set_state(local_state::WIZARD_CURSOR, "three").unwrap();
        assert!(matches!(db.wizard_cursor(), Err(DbError::InvalidData(_))));
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.db");
        {
            let db = Database::open(&path).unwrap();
            db.mark_initialized().unwrap();
            db.set_wizard_cursor(2).unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert!(db.is_initialized().unwrap());
        assert_eq!(db.wizard_cursor().unwrap(), 2);
    }
}
