//! Runtime configuration for embedding the core crate.
//!
//! # Responsibility
//! - Hold the database location and logging settings in one place.
//! - Bootstrap logging and storage from those settings.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging};
use rusqlite::Connection;
use std::path::PathBuf;

/// Default database file name, relative to the working directory.
pub const DEFAULT_DB_FILE_NAME: &str = "blog.sqlite3";

/// Where records are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    Memory,
}

/// Core configuration. File logging is disabled unless `log_dir` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db: DbLocation,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db: DbLocation::File(PathBuf::from(DEFAULT_DB_FILE_NAME)),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Starts file logging when a log directory is configured.
    ///
    /// # Errors
    /// - Returns the `init_logging` message on invalid level/directory or
    ///   conflicting re-initialization.
    pub fn init_logging(&self) -> Result<(), String> {
        let Some(log_dir) = self.log_dir.as_ref() else {
            return Ok(());
        };
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log_dir is not valid UTF-8: `{}`", log_dir.display()))?;
        init_logging(&self.log_level, log_dir)
    }

    /// Opens the configured database with migrations applied.
    pub fn open_db(&self) -> DbResult<Connection> {
        match &self.db {
            DbLocation::File(path) => open_db(path),
            DbLocation::Memory => open_db_in_memory(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_file_db_and_no_file_logging() {
        let config = CoreConfig::default();
        assert_eq!(
            config.db,
            DbLocation::File(PathBuf::from(DEFAULT_DB_FILE_NAME))
        );
        assert!(config.log_dir.is_none());
        assert_eq!(config.init_logging(), Ok(()));
    }

    #[test]
    fn memory_location_opens_migrated_db() {
        let config = CoreConfig {
            db: DbLocation::Memory,
            ..CoreConfig::default()
        };
        let conn = config.open_db().unwrap();
        let version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, crate::db::migrations::latest_version());
    }
}
