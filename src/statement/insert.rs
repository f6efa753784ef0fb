//! Submodule defining a builder for an insert statement with an optional
//! conflict clause.

use core::fmt::Write;

use rusqlite::{Connection, params_from_iter};

use super::{Predicate, Table, Value, quote_identifier};
use crate::errors::{Error, Result};

/// `ON CONFLICT (target) DO UPDATE SET .. [WHERE ..]`
#[derive(Debug, Clone, PartialEq, Eq)]
struct OnConflict {
    target: Vec<usize>,
    set_excluded: Vec<usize>,
    filter: Option<Predicate>,
}

/// Builder for an `INSERT` of one row into a [`Table`].
///
/// Every column is written; columns that were never [`set`](Insert::set)
/// are bound as NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insert<'t> {
    table: &'t Table,
    values: Vec<Value>,
    on_conflict: Option<OnConflict>,
}

impl<'t> Insert<'t> {
    /// Starts an insert into `table` with every column NULL.
    #[must_use]
    pub fn into_table(table: &'t Table) -> Self {
        Self {
            table,
            values: vec![Value::Null; table.number_of_columns()],
            on_conflict: None,
        }
    }

    /// Sets the value for a specific column by index.
    ///
    /// # Errors
    ///
    /// * `ColumnIndexOutOfBounds` - If the provided column index is out of bounds for the table.
    pub fn set(mut self, col_idx: usize, value: impl Into<Value>) -> Result<Self> {
        if col_idx >= self.values.len() {
            return Err(Error::ColumnIndexOutOfBounds(col_idx, self.values.len()));
        }
        self.values[col_idx] = value.into();
        Ok(self)
    }

    /// Declares the conflict target (normally the primary key columns).
    ///
    /// Without a following [`do_update_excluded`](Insert::do_update_excluded)
    /// the conflict resolves as `DO NOTHING`.
    #[must_use]
    pub fn on_conflict(mut self, target: &[usize]) -> Self {
        self.on_conflict = Some(OnConflict {
            target: target.to_vec(),
            set_excluded: Vec::new(),
            filter: None,
        });
        self
    }

    /// On conflict, overwrite `columns` with the incoming (`excluded`) values.
    ///
    /// Has no effect unless [`on_conflict`](Insert::on_conflict) was called first.
    #[must_use]
    pub fn do_update_excluded(mut self, columns: &[usize]) -> Self {
        if let Some(conflict) = self.on_conflict.as_mut() {
            conflict.set_excluded = columns.to_vec();
        }
        self
    }

    /// Only take the update branch when `predicate` holds.
    ///
    /// Has no effect unless [`on_conflict`](Insert::on_conflict) was called first.
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        if let Some(conflict) = self.on_conflict.as_mut() {
            conflict.filter = Some(predicate);
        }
        self
    }

    /// The values bound to `?1..?n`, in column order.
    #[must_use]
    pub fn params(&self) -> &[Value] {
        &self.values
    }

    /// Render the statement with numbered placeholders.
    ///
    /// # Errors
    ///
    /// * `ColumnIndexOutOfBounds` - If a conflict clause names an unknown column.
    pub fn sql(&self) -> Result<String> {
        let table = self.table;
        let mut sql = String::new();
        write!(sql, "INSERT INTO {}", quote_identifier(table.name())).unwrap();

        sql.push_str(" (");
        for (i, name) in table.column_names().iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&quote_identifier(name));
        }
        sql.push_str(") VALUES (");
        for i in 1..=self.values.len() {
            if i > 1 {
                sql.push_str(", ");
            }
            write!(sql, "?{i}").unwrap();
        }
        sql.push(')');

        let Some(conflict) = &self.on_conflict else {
            return Ok(sql);
        };

        sql.push_str(" ON CONFLICT (");
        for (i, &col_idx) in conflict.target.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&quote_identifier(table.checked_column(col_idx)?));
        }
        sql.push(')');

        if conflict.set_excluded.is_empty() {
            sql.push_str(" DO NOTHING");
            return Ok(sql);
        }

        sql.push_str(" DO UPDATE SET ");
        for (i, &col_idx) in conflict.set_excluded.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            let column = quote_identifier(table.checked_column(col_idx)?);
            write!(sql, "{column} = excluded.{column}").unwrap();
        }

        if let Some(filter) = &conflict.filter {
            sql.push_str(" WHERE ");
            filter.write_sql(table, &mut sql)?;
        }
        Ok(sql)
    }

    /// Execute against `conn` and return the number of rows written.
    ///
    /// An upsert whose update branch is suppressed by its filter writes zero rows.
    ///
    /// # Errors
    ///
    /// Fails if the statement cannot be rendered, prepared or executed.
    pub fn execute(&self, conn: &Connection) -> Result<usize> {
        let sql = self.sql()?;
        let mut stmt = conn.prepare_cached(&sql)?;
        Ok(stmt.execute(params_from_iter(self.values.iter()))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::new("kv", &["k", "a", "b"], &[0])
    }

    #[test]
    fn plain_insert() {
        let table = table();
        let insert = Insert::into_table(&table).set(0, "x").unwrap();
        assert_eq!(
            insert.sql().unwrap(),
            "INSERT INTO \"kv\" (\"k\", \"a\", \"b\") VALUES (?1, ?2, ?3)"
        );
        assert_eq!(insert.params(), &[Value::from("x"), Value::Null, Value::Null]);
    }

    #[test]
    fn conflict_without_update_is_do_nothing() {
        let table = table();
        let sql = Insert::into_table(&table).on_conflict(&[0]).sql().unwrap();
        assert!(sql.ends_with("ON CONFLICT (\"k\") DO NOTHING"), "{sql}");
    }

    #[test]
    fn set_out_of_bounds() {
        let table = table();
        assert!(matches!(
            Insert::into_table(&table).set(3, 1i64),
            Err(Error::ColumnIndexOutOfBounds(3, 3))
        ));
    }

    #[test]
    fn conflict_target_out_of_bounds() {
        let table = table();
        let insert = Insert::into_table(&table).on_conflict(&[7]);
        assert!(matches!(
            insert.sql(),
            Err(Error::ColumnIndexOutOfBounds(7, 3))
        ));
    }

    #[test]
    fn filtered_upsert_skips_identical_rows() {
        let table = table();
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE kv (k TEXT PRIMARY KEY, a TEXT, b INTEGER)")
            .unwrap();

        let upsert = |a: Option<&str>, b: Option<i64>| {
            Insert::into_table(&table)
                .set(0, "x")
                .unwrap()
                .set(1, a)
                .unwrap()
                .set(2, b)
                .unwrap()
                .on_conflict(&[0])
                .do_update_excluded(&[1, 2])
                .filter(Predicate::any_distinct_from_excluded(&[1, 2]))
                .execute(&conn)
                .unwrap()
        };

        assert_eq!(upsert(None, Some(1)), 1);
        assert_eq!(upsert(None, Some(1)), 0);
        assert_eq!(upsert(Some("y"), Some(1)), 1);
        assert_eq!(upsert(Some("y"), None), 1);
        assert_eq!(upsert(Some("y"), None), 0);
    }
}
