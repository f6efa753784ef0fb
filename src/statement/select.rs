//! Submodule defining a builder for a point `SELECT`.

use core::fmt::Write;

use rusqlite::{Connection, OptionalExtension, Row, params_from_iter};

use super::{Table, Value, quote_identifier};
use crate::errors::Result;

/// Builder for `SELECT cols FROM table WHERE col = ? [AND ..]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select<'t> {
    table: &'t Table,
    columns: Vec<usize>,
    filter: Vec<(usize, Value)>,
}

impl<'t> Select<'t> {
    /// Select every column of `table`, unfiltered.
    #[must_use]
    pub fn from_table(table: &'t Table) -> Self {
        Self {
            table,
            columns: (0..table.number_of_columns()).collect(),
            filter: Vec::new(),
        }
    }

    /// Restrict the projection to `columns`, in the given order.
    #[must_use]
    pub fn columns(mut self, columns: &[usize]) -> Self {
        self.columns = columns.to_vec();
        self
    }

    /// Add an equality condition, joined to earlier ones with `AND`.
    #[must_use]
    pub fn where_eq(mut self, col_idx: usize, value: impl Into<Value>) -> Self {
        self.filter.push((col_idx, value.into()));
        self
    }

    /// Render the statement with numbered placeholders.
    ///
    /// # Errors
    ///
    /// * `ColumnIndexOutOfBounds` - If the projection or filter names an unknown column.
    pub fn sql(&self) -> Result<String> {
        let table = self.table;
        let mut sql = String::from("SELECT ");
        for (i, &col_idx) in self.columns.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&quote_identifier(table.checked_column(col_idx)?));
        }
        write!(sql, " FROM {}", quote_identifier(table.name())).unwrap();
        for (i, (col_idx, _)) in self.filter.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            write!(
                sql,
                "{} = ?{}",
                quote_identifier(table.checked_column(*col_idx)?),
                i + 1
            )
            .unwrap();
        }
        Ok(sql)
    }

    /// Run the query and map the first row, if any.
    ///
    /// # Errors
    ///
    /// Fails if the statement cannot be rendered, prepared or executed, or if
    /// `map` fails on the returned row.
    pub fn query_optional<T>(
        &self,
        conn: &Connection,
        map: impl FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Option<T>> {
        let sql = self.sql()?;
        let mut stmt = conn.prepare_cached(&sql)?;
        Ok(stmt
            .query_row(params_from_iter(self.filter.iter().map(|(_, v)| v)), map)
            .optional()?)
    }
}
