//! The user record written, updated and read back by every phase.

use chrono::NaiveDateTime;

/// One synthetic user profile, keyed by its handle.
///
/// Every non-key field is nullable, and `None` is distinct from an empty
/// string or a zero year. The two timestamps are assigned by the store and
/// are only populated on records read back from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserRecord {
    /// The user handle (primary key).
    pub user: String,
    /// City name.
    pub city: Option<String>,
    /// Region or state name.
    pub region: Option<String>,
    /// ISO country code.
    pub country: Option<String>,
    /// Three digit area code, formatted as text.
    pub area_code: Option<String>,
    /// Five digit zip code, formatted as text.
    pub zip_code: Option<String>,
    /// Year of birth.
    pub year_birth: Option<i32>,
    /// Messaging handle, `"@" + user`.
    pub im: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Set by the store on first insert.
    pub created_tst: Option<NaiveDateTime>,
    /// Advanced by the store whenever a write changes a non-key column.
    pub changed_tst: Option<NaiveDateTime>,
}

impl UserRecord {
    /// Creates a record with only its key set.
    #[must_use]
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            ..Self::default()
        }
    }

    /// Returns whether the non-key columns of `self` and `other` are equal,
    /// treating two `None`s as equal.
    ///
    /// This is the negation of the predicate guarding the update branch of
    /// the upsert: when it holds, re-applying `other` over `self` writes nothing.
    #[must_use]
    pub fn same_columns(&self, other: &Self) -> bool {
        self.city == other.city
            && self.region == other.region
            && self.country == other.country
            && self.area_code == other.area_code
            && self.zip_code == other.zip_code
            && self.year_birth == other.year_birth
            && self.im == other.im
            && self.name == other.name
    }

    /// Drops the store-assigned timestamps, keeping only the written columns.
    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.created_tst = None;
        self.changed_tst = None;
        self
    }
}

/// Maps an empty string to `None`.
#[must_use]
pub fn nullable_string(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Maps a zero year to `None`.
#[must_use]
pub fn nullable_year(value: i32) -> Option<i32> {
    if value == 0 { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_columns_treats_null_as_equal_to_null() {
        let a = UserRecord::new("alice");
        let b = UserRecord::new("alice");
        assert!(a.same_columns(&b));
    }

    #[test]
    fn same_columns_distinguishes_null_from_value() {
        let a = UserRecord::new("alice");
        let mut b = UserRecord::new("alice");
        b.city = Some(String::new());
        assert!(!a.same_columns(&b));
    }

    #[test]
    fn same_columns_ignores_timestamps() {
        let a = UserRecord::new("alice");
        let mut b = UserRecord::new("alice");
        b.created_tst = NaiveDateTime::parse_from_str("2024-01-01 00:00:00", "%Y-%m-%d %H:%M:%S").ok();
        assert!(a.same_columns(&b));
    }

    #[test]
    fn nullable_helpers() {
        assert_eq!(nullable_string(String::new()), None);
        assert_eq!(nullable_string("x".into()), Some("x".into()));
        assert_eq!(nullable_year(0), None);
        assert_eq!(nullable_year(1984), Some(1984));
    }
}
