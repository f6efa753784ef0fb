//! Backend assembling its statements through the statement builder.

use rusqlite::Connection;

use super::{Applied, Backend, BackendKind, Reader, UpsertExecutor, decode_user};
use crate::errors::Result;
use crate::record::UserRecord;
use crate::schema::{user_columns, user_table, user_write_table};
use crate::statement::{Insert, Predicate, Select, Table};

/// Builds an [`Insert`] or [`Select`] per call from the `user` table descriptors.
#[derive(Debug, Clone)]
pub struct Builder {
    write_table: Table,
    read_table: Table,
    changed: Predicate,
}

impl Builder {
    /// Create the backend with the `user` table descriptors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            write_table: user_write_table(),
            read_table: user_table(),
            changed: Predicate::any_distinct_from_excluded(&user_columns::NON_KEY),
        }
    }

    fn upsert_statement<'t>(&'t self, record: &UserRecord) -> Result<Insert<'t>> {
        Ok(Insert::into_table(&self.write_table)
            .set(user_columns::USER, record.user.as_str())?
            .set(user_columns::CITY, record.city.as_ref())?
            .set(user_columns::REGION, record.region.as_ref())?
            .set(user_columns::COUNTRY, record.country.as_ref())?
            .set(user_columns::AREA_CODE, record.area_code.as_ref())?
            .set(user_columns::ZIP_CODE, record.zip_code.as_ref())?
            .set(user_columns::YEAR_BIRTH, record.year_birth)?
            .set(user_columns::IM, record.im.as_ref())?
            .set(user_columns::NAME, record.name.as_ref())?
            .on_conflict(self.write_table.pk_indices())
            .do_update_excluded(&user_columns::NON_KEY)
            .filter(self.changed.clone()))
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl UpsertExecutor for Builder {
    fn upsert(&self, conn: &Connection, record: &UserRecord) -> Result<Applied> {
        let insert = self.upsert_statement(record)?;
        Ok(Applied::from_changes(insert.execute(conn)?))
    }
}

impl Reader for Builder {
    fn read(&self, conn: &Connection, key: &str) -> Result<Option<UserRecord>> {
        Select::from_table(&self.read_table)
            .where_eq(user_columns::USER, key)
            .query_optional(conn, decode_user)
    }
}

impl Backend for Builder {
    fn kind(&self) -> BackendKind {
        BackendKind::Builder
    }
}
