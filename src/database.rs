//! Database lifecycle: one versioned SQLite handle for the whole process.

use crate::contract::{COL_DESCRIPTION, COL_ID, COL_NAME, COL_SORT_ORDER, TABLE_NAME};
use eyre::{Context, Result};
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Database file name.
pub const DATABASE_NAME: &str = "tasklist.db";

/// Current schema version, stored in SQLite's `user_version` pragma.
pub const DATABASE_VERSION: i32 = 1;

/// Handle to the task database.
///
/// Constructed once at startup and handed to consumers (wrapped in an
/// `Arc`), rather than fetched from global state. The process keeps
/// exactly one open connection for its lifetime; concurrent access is
/// serialized through the interior mutex, and anything beyond that is
/// left to SQLite's own file locking.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (creating or upgrading as needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).context("Failed to create database directory")?;
        }

        let conn = Connection::open(path).context("Failed to open task database")?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database. Used by tests and ephemeral runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        initialize_schema(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Borrow the shared connection.
    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        // a poisoned lock means another thread panicked mid-statement;
        // the connection itself is still usable
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Create or upgrade the schema to [`DATABASE_VERSION`].
///
/// Every version transition needs explicit migration logic here. A stored
/// version this build does not know how to handle is a fatal
/// configuration error: refusing to proceed beats silently losing schema
/// integrity.
fn initialize_schema(conn: &Connection) -> Result<()> {
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .context("Failed to read schema version")?;
    log::debug!("initialize_schema: stored version is {version}");

    match version {
        v if v == DATABASE_VERSION => {}
        0 => {
            create_schema(conn)?;
            conn.execute_batch(&format!("PRAGMA user_version = {DATABASE_VERSION}"))
                .context("Failed to record schema version")?;
        }
        v if v > DATABASE_VERSION => {
            eyre::bail!("database schema version {v} is newer than this build supports ({DATABASE_VERSION})");
        }
        other => {
            // version 1 is the only released schema, so there is no
            // transition to write yet
            eyre::bail!("no upgrade path from schema version {other}");
        }
    }

    Ok(())
}

fn create_schema(conn: &Connection) -> Result<()> {
    let sql = format!(
        "CREATE TABLE {TABLE_NAME} (\
         {COL_ID} INTEGER PRIMARY KEY NOT NULL, \
         {COL_NAME} TEXT NOT NULL, \
         {COL_DESCRIPTION} TEXT, \
         {COL_SORT_ORDER} INTEGER)"
    );
    log::debug!("create_schema: {sql}");

    conn.execute_batch(&sql).context("Failed to create tasks table")?;
    Ok(())
}
