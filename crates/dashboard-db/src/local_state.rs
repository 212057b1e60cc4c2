//! Client-local key-value state: the initialized flag and the wizard cursor.

use chrono::Utc;
use rusqlite::OptionalExtension;

use crate::{Database, DbError};

pub const INITIALIZED_AT: &str = "initialized_at";
pub const WIZARD_CURSOR: &str = "wizard_cursor";

impl Database {
    pub fn get_state(&self, key: &str) -> Result<Option<String>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT value FROM local_state WHERE key = ?1")?;
            let value = stmt
                .query_row([key], |row| row.get::<_, String>(0))
                .optional()?;
            Ok(value)
        })
    }

    pub fn set_state(&self, key: &str, value: &str) -> Result<(), DbError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO local_state (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = CURRENT_TIMESTAMP",
                rusqlite::params![key, value],
            )?;
            Ok(())
        })
    }

    /// When the backend was first seen fully initialized, as RFC 3339.
    pub fn initialized_at(&self) -> Result<Option<String>, DbError> {
        self.get_state(INITIALIZED_AT)
    }

    pub fn is_initialized(&self) -> Result<bool, DbError> {
        Ok(self.initialized_at()?.is_some())
    }

    /// Set the initialized flag. Never cleared by the dashboard; a second
    /// call keeps the original timestamp.
    pub fn mark_initialized(&self) -> Result<(), DbError> {
        let now = Utc::now().to_rfc3339();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO local_state (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)",
                rusqlite::params![INITIALIZED_AT, now],
            )?;
            Ok(())
        })?;
        tracing::info!("Backend initialization recorded");
        Ok(())
    }

    /// Highest wizard step completed in order; 0 before the first step.
    pub fn wizard_cursor(&self) -> Result<u8, DbError> {
        match self.get_state(WIZARD_CURSOR)? {
            Some(raw) => raw
                .parse()
                .map_err(|_| DbError::InvalidData(format!("wizard cursor: {raw:?}"))),
            None => Ok(0),
        }
    }

    pub fn set_wizard_cursor(&self, cursor: u8) -> Result<(), DbError> {
        self.set_state(WIZARD_CURSOR, &cursor.to_string())
    }
}
