pub mod migrations;
pub mod models;
pub mod queries;
pub mod store;

pub use store::{ChatStore, StoreConnector};

use anyhow::{Result, bail};
use rusqlite::Connection;
use tracing::{debug, warn};

/// A single request-scoped SQLite connection.
///
/// The first statement opens a transaction. Dropping the value rolls back
/// anything left uncommitted and closes the connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Accepts a plain path, `sqlite://path`, `sqlite:path` or a `file:` URI.
    pub fn open(database_url: &str) -> Result<Self> {
        let target = resolve_target(database_url);
        if target.is_empty() {
            bail!("empty database location in DATABASE_URL");
        }

        let conn = Connection::open(target)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        debug!("Database connection opened at {}", target);
        Ok(Self { conn })
    }

    /// Run `f` inside the request transaction, starting it if needed.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        if self.conn.is_autocommit() {
            self.conn.execute_batch("BEGIN")?;
        }
        f(&self.conn)
    }

    pub fn in_transaction(&self) -> bool {
        !self.conn.is_autocommit()
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        if self.in_transaction() {
            if let Err(e) = self.conn.execute_batch("ROLLBACK") {
                warn!("Rollback on close failed: {}", e);
            }
        }
    }
}

fn resolve_target(database_url: &str) -> &str {
    let url = database_url.trim();
    url.strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url)
}

/// Opens one fresh [`Database`] per request; nothing is pooled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteConnector;

impl StoreConnector for SqliteConnector {
    type Store = Database;

    fn connect(&self, database_url: &str) -> Result<Database> {
        Database::open(database_url)
    }
}

/// Open a connection and bring the schema up to date. Meant for process
/// startup, not for the request path.
pub fn migrate(database_url: &str) -> Result<()> {
    let target = resolve_target(database_url);
    if target.is_empty() {
        bail!("empty database location in DATABASE_URL");
    }
    let conn = Connection::open(target)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    migrations::run(&conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_url_forms() {
        assert_eq!(resolve_target("sqlite:///tmp/a.db"), "/tmp/a.db");
        assert_eq!(resolve_target("sqlite:hearth.db"), "hearth.db");
        assert_eq!(resolve_target("hearth.db"), "hearth.db");
        assert_eq!(resolve_target("file:hearth.db?mode=ro"), "file:hearth.db?mode=ro");
        assert_eq!(resolve_target("  "), "");
    }

    #[test]
    fn empty_url_is_rejected() {
        assert!(Database::open("sqlite://").is_err());
        assert!(migrate("").is_err());
    }
}
