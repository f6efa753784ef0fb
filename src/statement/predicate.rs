//! Predicates for the `WHERE` clause of an upsert's update branch.

use core::fmt::Write;

use super::{Table, quote_identifier};
use crate::errors::Result;

/// A boolean condition over the existing row and the `excluded` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `"col" IS NOT excluded."col"`: null-aware inequality between the
    /// stored value and the incoming one.
    DistinctFromExcluded(usize),
    /// Disjunction of the inner predicates.
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Null-aware inequality of one column against its incoming value.
    #[must_use]
    pub fn distinct_from_excluded(col_idx: usize) -> Self {
        Predicate::DistinctFromExcluded(col_idx)
    }

    /// True when any of `columns` differs from its incoming value.
    #[must_use]
    pub fn any_distinct_from_excluded(columns: &[usize]) -> Self {
        Predicate::Or(
            columns
                .iter()
                .map(|&c| Predicate::distinct_from_excluded(c))
                .collect(),
        )
    }

    pub(crate) fn write_sql(&self, table: &Table, out: &mut String) -> Result<()> {
        match self {
            Predicate::DistinctFromExcluded(col_idx) => {
                let column = quote_identifier(table.checked_column(*col_idx)?);
                write!(out, "{column} IS NOT excluded.{column}").unwrap();
            }
            // An empty disjunction is false.
            Predicate::Or(terms) if terms.is_empty() => out.push('0'),
            Predicate::Or(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" OR ");
                    }
                    term.write_sql(table, out)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_disjunction() {
        let table = Table::new("t", &["k", "a", "b"], &[0]);
        let p = Predicate::any_distinct_from_excluded(&[1, 2]);
        let mut sql = String::new();
        p.write_sql(&table, &mut sql).unwrap();
        assert_eq!(sql, "\"a\" IS NOT excluded.\"a\" OR \"b\" IS NOT excluded.\"b\"");
    }

    #[test]
    fn empty_disjunction_is_false() {
        let table = Table::new("t", &["k"], &[0]);
        let mut sql = String::new();
        Predicate::any_distinct_from_excluded(&[])
            .write_sql(&table, &mut sql)
            .unwrap();
        assert_eq!(sql, "0");
    }
}
