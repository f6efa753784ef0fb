//! The upsert and point-read contract, and its two implementations.
//!
//! [`DirectSql`] issues hand-written statements; [`Builder`] assembles the
//! same statements through [`crate::statement`]. Both leave the store in the
//! same state for the same inputs, so timing them against each other isolates
//! the cost of the statement-building layer.

mod builder;
mod direct_sql;

use core::fmt;

use rusqlite::{Connection, Row};

use crate::errors::Result;
use crate::record::UserRecord;
use crate::schema::user_columns;

pub use builder::Builder;
pub use direct_sql::DirectSql;

/// What an upsert did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The row was inserted, or an existing row was updated.
    Written,
    /// An identical row already existed; nothing was written.
    Unchanged,
}

impl Applied {
    /// Classify from the row count reported by the upsert statement.
    #[must_use]
    pub fn from_changes(changes: usize) -> Self {
        if changes == 0 {
            Applied::Unchanged
        } else {
            Applied::Written
        }
    }
}

/// Writes one record: insert if absent, update if present and different,
/// nothing if present and identical.
pub trait UpsertExecutor {
    /// Apply `record` through `conn`.
    ///
    /// `conn` may be a plain connection or a dereferenced transaction.
    ///
    /// # Errors
    ///
    /// Any store error; there is no partial outcome for one record.
    fn upsert(&self, conn: &Connection, record: &UserRecord) -> Result<Applied>;
}

/// Point lookups by key.
pub trait Reader {
    /// Read the record stored under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Any store or decoding error.
    fn read(&self, conn: &Connection, key: &str) -> Result<Option<UserRecord>>;
}

/// A complete backend: one upsert strategy paired with its reader.
pub trait Backend: UpsertExecutor + Reader {
    /// Which implementation this is.
    fn kind(&self) -> BackendKind;
}

/// The available backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Hand-written parameterized SQL.
    DirectSql,
    /// Statements assembled by [`crate::statement`].
    Builder,
}

impl BackendKind {
    /// Instantiate the backend.
    #[must_use]
    pub fn backend(self) -> Box<dyn Backend> {
        match self {
            BackendKind::DirectSql => Box::new(DirectSql),
            BackendKind::Builder => Box::new(Builder::new()),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BackendKind::DirectSql => "direct-sql",
            BackendKind::Builder => "builder",
        })
    }
}

/// Decode a row selected with the columns in [`user_columns`] order.
pub(crate) fn decode_user(row: &Row<'_>) -> rusqlite::Result<UserRecord> {
    Ok(UserRecord {
        user: row.get(user_columns::USER)?,
        city: row.get(user_columns::CITY)?,
        region: row.get(user_columns::REGION)?,
        country: row.get(user_columns::COUNTRY)?,
        area_code: row.get(user_columns::AREA_CODE)?,
        zip_code: row.get(user_columns::ZIP_CODE)?,
        year_birth: row.get(user_columns::YEAR_BIRTH)?,
        im: row.get(user_columns::IM)?,
        name: row.get(user_columns::NAME)?,
        created_tst: row.get(user_columns::CREATED_TST)?,
        changed_tst: row.get(user_columns::CHANGED_TST)?,
    })
}
