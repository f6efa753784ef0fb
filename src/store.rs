//! Opening, preparing and wiping the SQLite store.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::errors::Result;
use crate::schema::INIT_DDL;

/// The single connection every phase runs on.
#[derive(Debug)]
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if needed) the store file at `path`.
    ///
    /// With `recreate` set, an existing file and its WAL side files are
    /// removed first. The parent directory is created if missing. The
    /// connection is switched to WAL journaling with `NORMAL` synchronous
    /// durability and the schema is created.
    ///
    /// # Errors
    ///
    /// Fails on any filesystem, connection, pragma or DDL error.
    pub fn open(path: &Path, recreate: bool) -> Result<Self> {
        info!(path = %path.display(), recreate, "opening store");
        if recreate {
            remove_store_files(path)?;
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Self::prepare(Connection::open(path)?)
    }

    /// Open a private in-memory store with the schema applied.
    ///
    /// # Errors
    ///
    /// Fails on any pragma or DDL error.
    pub fn open_in_memory() -> Result<Self> {
        Self::prepare(Connection::open_in_memory()?)
    }

    fn prepare(conn: Connection) -> Result<Self> {
        let journal_mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        debug!(journal_mode, "store configured");
        conn.execute_batch(INIT_DDL)?;
        Ok(Self { conn })
    }

    /// Delete every row and reclaim the freed pages.
    ///
    /// # Errors
    ///
    /// Fails if either statement fails, including when a transaction is open.
    pub fn wipe(&self) -> Result<()> {
        let deleted = self.conn.execute("DELETE FROM user", [])?;
        self.conn.execute_batch("VACUUM")?;
        info!(deleted, "store wiped");
        Ok(())
    }

    /// Number of rows in the `user` table.
    ///
    /// # Errors
    ///
    /// Fails if the count query fails.
    pub fn count(&self) -> Result<u64> {
        let rows: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM user", [], |row| row.get(0))?;
        u64::try_from(rows).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Integer, Box::new(e))
                .into()
        })
    }

    /// The underlying connection.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// The underlying connection, mutably, for opening transactions.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

/// Remove the store file and its `-wal`/`-shm` companions, ignoring missing files.
fn remove_store_files(path: &Path) -> Result<()> {
    let mut targets = vec![path.to_path_buf()];
    for suffix in ["-wal", "-shm"] {
        let mut side = path.as_os_str().to_owned();
        side.push(suffix);
        targets.push(side.into());
    }
    for target in targets {
        match fs::remove_file(&target) {
            Ok(()) => debug!(path = %target.display(), "removed"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
