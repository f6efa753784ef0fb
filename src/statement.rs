//! A small typed builder for the SQL statements the harness issues.
//!
//! Statements are assembled from a [`Table`] descriptor and column indices,
//! rendered with quoted identifiers and numbered placeholders, and executed
//! with their values bound as parameters.
//!
//! ```rust
//! use upsert_bench::statement::{Insert, Predicate, Table};
//!
//! let table = Table::new("kv", &["k", "v"], &[0]);
//! let insert = Insert::into_table(&table)
//!     .set(0, "a").unwrap()
//!     .set(1, 1i64).unwrap()
//!     .on_conflict(&[0])
//!     .do_update_excluded(&[1])
//!     .filter(Predicate::distinct_from_excluded(1));
//!
//! assert_eq!(
//!     insert.sql().unwrap(),
//!     "INSERT INTO \"kv\" (\"k\", \"v\") VALUES (?1, ?2) \
//!      ON CONFLICT (\"k\") DO UPDATE SET \"v\" = excluded.\"v\" \
//!      WHERE \"v\" IS NOT excluded.\"v\""
//! );
//! ```

mod insert;
mod predicate;
mod select;
mod table;
mod value;

pub use insert::Insert;
pub use predicate::Predicate;
pub use select::Select;
pub use table::Table;
pub use value::Value;

/// Quote a SQL identifier (table or column name) with double quotes.
///
/// Escapes any embedded double quotes by doubling them.
pub(crate) fn quote_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for c in name.chars() {
        if c == '"' {
            out.push_str("\"\"");
        } else {
            out.push(c);
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::quote_identifier;

    #[test]
    fn quotes_plain_identifier() {
        assert_eq!(quote_identifier("user"), "\"user\"");
    }

    #[test]
    fn doubles_embedded_quotes() {
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }
}
