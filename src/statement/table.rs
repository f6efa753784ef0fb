//! Table descriptors used to render statements.

use crate::errors::{Error, Result};

/// A table's name, its column names in order, and its primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    pk_indices: Vec<usize>,
}

impl Table {
    /// Create a new table descriptor.
    ///
    /// # Arguments
    ///
    /// * `name` - The table name.
    /// * `columns` - The column names in order.
    /// * `pk_indices` - Indices of primary key columns (in PK order).
    ///
    /// # Panics
    ///
    /// Panics if any `pk_indices` value is out of bounds.
    #[must_use]
    pub fn new(name: impl Into<String>, columns: &[&str], pk_indices: &[usize]) -> Self {
        for &col_idx in pk_indices {
            assert!(col_idx < columns.len(), "PK index out of bounds");
        }
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| (*c).to_owned()).collect(),
            pk_indices: pk_indices.to_vec(),
        }
    }

    /// The table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of columns.
    #[must_use]
    pub fn number_of_columns(&self) -> usize {
        self.columns.len()
    }

    /// The column names, in order.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Get a column name by index.
    #[must_use]
    pub fn column_name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    /// Indices of the primary key columns, in PK order.
    #[must_use]
    pub fn pk_indices(&self) -> &[usize] {
        &self.pk_indices
    }

    /// Like [`Table::column_name`], but failing with
    /// [`Error::ColumnIndexOutOfBounds`] for an unknown index.
    pub(crate) fn checked_column(&self, index: usize) -> Result<&str> {
        self.column_name(index)
            .ok_or(Error::ColumnIndexOutOfBounds(index, self.columns.len()))
    }
}
