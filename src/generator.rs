//! Synthetic user records.

use fake::Fake;
use fake::faker::address::en::{CityName, StateName};
use fake::faker::internet::en::Username;
use fake::faker::name::en::Name;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::errors::{Error, Result};
use crate::record::{UserRecord, nullable_string, nullable_year};

/// Country codes a record's `country` is drawn from, uniformly.
pub const COUNTRIES: &[&str] = &[
    "US", "CA", "MX", "BR", "AR", "GB", "IE", "FR", "DE", "NL", "ES", "IT", "SE", "PL", "IN", "JP",
    "KR", "AU", "NZ", "ZA",
];

/// Inclusive range of generated area codes.
pub const AREA_CODES: core::ops::RangeInclusive<u32> = 100..=999;
/// Inclusive range of generated zip codes.
pub const ZIP_CODES: core::ops::RangeInclusive<u32> = 10000..=99999;
/// Inclusive range of generated birth years.
pub const BIRTH_YEARS: core::ops::RangeInclusive<i32> = 1920..=2006;

/// Produces independent random records; no state carries from one record to the next.
#[derive(Debug)]
pub struct RecordGenerator {
    rng: StdRng,
}

impl RecordGenerator {
    /// A generator seeded from `seed`, or from the OS when `None`.
    ///
    /// The same seed always yields the same sequence.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }

    /// Generate one record.
    ///
    /// Keys are random handles and may repeat; the store's conflict policy
    /// turns a repeated key into an update.
    ///
    /// # Errors
    ///
    /// [`Error::Generation`] if the handle comes out empty.
    pub fn record(&mut self) -> Result<UserRecord> {
        let user: String = Username().fake_with_rng(&mut self.rng);
        if user.is_empty() {
            return Err(Error::Generation("generated an empty user handle".into()));
        }
        let country = COUNTRIES
            .choose(&mut self.rng)
            .map(|c| (*c).to_owned())
            .ok_or_else(|| Error::Generation("no country codes to draw from".into()))?;

        Ok(UserRecord {
            im: Some(format!("@{user}")),
            city: nullable_string(CityName().fake_with_rng(&mut self.rng)),
            region: nullable_string(StateName().fake_with_rng(&mut self.rng)),
            country: Some(country),
            area_code: Some(self.rng.random_range(AREA_CODES).to_string()),
            zip_code: Some(self.rng.random_range(ZIP_CODES).to_string()),
            year_birth: nullable_year(self.rng.random_range(BIRTH_YEARS)),
            name: nullable_string(Name().fake_with_rng(&mut self.rng)),
            user,
            created_tst: None,
            changed_tst: None,
        })
    }

    /// Generate `count` records.
    ///
    /// # Errors
    ///
    /// The first error from [`RecordGenerator::record`].
    pub fn generate(&mut self, count: usize) -> Result<Vec<UserRecord>> {
        (0..count).map(|_| self.record()).collect()
    }
}

/// Stable sort by key, so repeated keys keep their generation order.
pub fn sort_by_user(records: &mut [UserRecord]) {
    records.sort_by(|a, b| a.user.cmp(&b.user));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_ranges_and_derivations() {
        let mut generator = RecordGenerator::new(Some(7));
        for record in generator.generate(200).unwrap() {
            assert!(!record.user.is_empty());
            assert_eq!(record.im.as_deref(), Some(format!("@{}", record.user).as_str()));
            assert!(COUNTRIES.contains(&record.country.as_deref().unwrap()));

            let area: u32 = record.area_code.as_deref().unwrap().parse().unwrap();
            assert!(AREA_CODES.contains(&area));
            let zip: u32 = record.zip_code.as_deref().unwrap().parse().unwrap();
            assert!(ZIP_CODES.contains(&zip));
            assert!(BIRTH_YEARS.contains(&record.year_birth.unwrap()));

            assert!(record.created_tst.is_none());
            assert!(record.changed_tst.is_none());
        }
    }

    #[test]
    fn same_seed_same_records() {
        let a = RecordGenerator::new(Some(42)).generate(25).unwrap();
        let b = RecordGenerator::new(Some(42)).generate(25).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(RecordGenerator::new(None).generate(0).unwrap().is_empty());
    }

    #[test]
    fn sort_is_stable_on_repeated_keys() {
        let mut first = UserRecord::new("b");
        first.year_birth = Some(1);
        let mut second = UserRecord::new("b");
        second.year_birth = Some(2);
        let mut records = vec![first, UserRecord::new("a"), second];
        sort_by_user(&mut records);
        let order: Vec<_> = records.iter().map(|r| (r.user.as_str(), r.year_birth)).collect();
        assert_eq!(order, [("a", None), ("b", Some(1)), ("b", Some(2))]);
    }
}
