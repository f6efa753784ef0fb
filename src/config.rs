//! Immutable run configuration.

use std::path::PathBuf;

use crate::backend::BackendKind;
use crate::batch::TxScope;
use crate::verify::MissingKeyPolicy;

/// Which backends a run exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BackendChoice {
    /// Hand-written SQL only.
    #[default]
    DirectSql,
    /// Statement builder only.
    Builder,
    /// Hand-written SQL, then the statement builder, wiping the store in between.
    Both,
}

impl BackendChoice {
    /// The backends to run, in order.
    #[must_use]
    pub fn kinds(self) -> &'static [BackendKind] {
        match self {
            BackendChoice::DirectSql => &[BackendKind::DirectSql],
            BackendChoice::Builder => &[BackendKind::Builder],
            BackendChoice::Both => &[BackendKind::DirectSql, BackendKind::Builder],
        }
    }
}

/// Everything a run needs, fixed before the first phase starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Records to generate.
    pub row_count: usize,
    /// Update budget; see [`crate::workload::update_span`].
    pub update_count: usize,
    /// Backends to run.
    pub backend: BackendChoice,
    /// Wrap each phase in one transaction.
    pub use_transaction: bool,
    /// Accepted for compatibility; generation ignores it.
    pub flip_year_birth: bool,
    /// Write a CPU profile of the run here.
    pub cpuprofile: Option<PathBuf>,
    /// The store file.
    pub database: PathBuf,
    /// Delete the store file before opening it.
    pub recreate: bool,
    /// Seed for reproducible generation.
    pub seed: Option<u64>,
    /// What verification does on a missing key.
    pub on_missing: MissingKeyPolicy,
}

impl Config {
    /// The transaction scope every phase uses.
    #[must_use]
    pub fn scope(&self) -> TxScope {
        TxScope::from_flag(self.use_transaction)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            row_count: 10_000,
            update_count: 1_000,
            backend: BackendChoice::default(),
            use_transaction: false,
            flip_year_birth: false,
            cpuprofile: None,
            database: PathBuf::from("./data/wl.sqlite"),
            recreate: false,
            seed: None,
            on_missing: MissingKeyPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_runs_direct_sql_first() {
        assert_eq!(
            BackendChoice::Both.kinds(),
            &[BackendKind::DirectSql, BackendKind::Builder]
        );
    }

    #[test]
    fn scope_follows_flag() {
        let config = Config {
            use_transaction: true,
            ..Config::default()
        };
        assert_eq!(config.scope(), TxScope::Batch);
        assert_eq!(Config::default().scope(), TxScope::PerRecord);
    }
}
