//! Backend issuing constant, hand-written SQL.

use rusqlite::{Connection, OptionalExtension, params};

use super::{Applied, Backend, BackendKind, Reader, UpsertExecutor, decode_user};
use crate::errors::Result;
use crate::record::UserRecord;

/// Insert, or overwrite every non-key column when at least one of them is
/// distinct (`IS NOT`, so NULL compares equal to NULL) from the incoming row.
const UPSERT_USER: &str = "
    INSERT INTO user (
          user
        , city
        , region
        , country
        , area_code
        , zip_code
        , year_birth
        , im
        , name
    )
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
    ON CONFLICT (user)
    DO UPDATE
          SET city       = excluded.city
            , region     = excluded.region
            , country    = excluded.country
            , area_code  = excluded.area_code
            , zip_code   = excluded.zip_code
            , year_birth = excluded.year_birth
            , im         = excluded.im
            , name       = excluded.name
        WHERE city       IS NOT excluded.city
           OR region     IS NOT excluded.region
           OR country    IS NOT excluded.country
           OR area_code  IS NOT excluded.area_code
           OR zip_code   IS NOT excluded.zip_code
           OR year_birth IS NOT excluded.year_birth
           OR im         IS NOT excluded.im
           OR name       IS NOT excluded.name";

const SELECT_USER: &str = "
    SELECT user
         , city
         , region
         , country
         , area_code
         , zip_code
         , year_birth
         , im
         , name
         , created_tst
         , changed_tst
      FROM user
     WHERE user = ?1";

/// Hand-written SQL, prepared once per connection through the statement cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectSql;

impl UpsertExecutor for DirectSql {
    fn upsert(&self, conn: &Connection, record: &UserRecord) -> Result<Applied> {
        let mut stmt = conn.prepare_cached(UPSERT_USER)?;
        let changes = stmt.execute(params![
            record.user,
            record.city,
            record.region,
            record.country,
            record.area_code,
            record.zip_code,
            record.year_birth,
            record.im,
            record.name,
        ])?;
        Ok(Applied::from_changes(changes))
    }
}

impl Reader for DirectSql {
    fn read(&self, conn: &Connection, key: &str) -> Result<Option<UserRecord>> {
        let mut stmt = conn.prepare_cached(SELECT_USER)?;
        Ok(stmt.query_row([key], decode_user).optional()?)
    }
}

impl Backend for DirectSql {
    fn kind(&self) -> BackendKind {
        BackendKind::DirectSql
    }
}
