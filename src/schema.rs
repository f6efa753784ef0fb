//! DDL and the table descriptor for the `user` table.

use crate::statement::Table;

/// Name of the single table the harness writes.
pub const USER_TABLE: &str = "user";

/// SQL creating the `user` table and the trigger advancing `changed_tst`.
///
/// Timestamps are stored as text, `YYYY-MM-DD HH:MM:SS.SSS` in UTC.
///
/// The trigger only fires when an update left `changed_tst` untouched, so an
/// explicit write to `changed_tst` is kept as written.
pub const INIT_DDL: &str = "\
CREATE TABLE IF NOT EXISTS user (
    user        TEXT PRIMARY KEY NOT NULL,
    city        TEXT,
    region      TEXT,
    country     TEXT,
    area_code   TEXT,
    zip_code    TEXT,
    year_birth  INTEGER,
    im          TEXT,
    name        TEXT,
    created_tst TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
    changed_tst TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
);
CREATE TRIGGER IF NOT EXISTS user_changed_tst
AFTER UPDATE ON user
FOR EACH ROW WHEN NEW.changed_tst IS OLD.changed_tst
BEGIN
    UPDATE user
       SET changed_tst = strftime('%Y-%m-%d %H:%M:%f', 'now')
     WHERE user = NEW.user;
END;";

/// Column index constants for the `user` table, matching the DDL order.
pub mod user_columns {
    /// `user` column index (primary key).
    pub const USER: usize = 0;
    /// `city` column index.
    pub const CITY: usize = 1;
    /// `region` column index.
    pub const REGION: usize = 2;
    /// `country` column index.
    pub const COUNTRY: usize = 3;
    /// `area_code` column index.
    pub const AREA_CODE: usize = 4;
    /// `zip_code` column index.
    pub const ZIP_CODE: usize = 5;
    /// `year_birth` column index.
    pub const YEAR_BIRTH: usize = 6;
    /// `im` column index.
    pub const IM: usize = 7;
    /// `name` column index.
    pub const NAME: usize = 8;
    /// `created_tst` column index.
    pub const CREATED_TST: usize = 9;
    /// `changed_tst` column index.
    pub const CHANGED_TST: usize = 10;

    /// The columns written by an upsert, key first.
    pub const WRITTEN: [usize; 9] = [
        USER, CITY, REGION, COUNTRY, AREA_CODE, ZIP_CODE, YEAR_BIRTH, IM, NAME,
    ];

    /// The columns compared and overwritten by the update branch of an upsert.
    pub const NON_KEY: [usize; 8] = [CITY, REGION, COUNTRY, AREA_CODE, ZIP_CODE, YEAR_BIRTH, IM, NAME];
}

/// Descriptor of the `user` table as seen by an upsert: the written columns only.
///
/// The timestamps are left to their defaults and the trigger.
#[must_use]
pub fn user_write_table() -> Table {
    Table::new(
        USER_TABLE,
        &[
            "user",
            "city",
            "region",
            "country",
            "area_code",
            "zip_code",
            "year_birth",
            "im",
            "name",
        ],
        &[user_columns::USER],
    )
}

/// Descriptor of every column of the `user` table, timestamps included.
#[must_use]
pub fn user_table() -> Table {
    Table::new(
        USER_TABLE,
        &[
            "user",
            "city",
            "region",
            "country",
            "area_code",
            "zip_code",
            "year_birth",
            "im",
            "name",
            "created_tst",
            "changed_tst",
        ],
        &[user_columns::USER],
    )
}
