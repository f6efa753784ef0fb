//! Reading every key back after the write phases.

use rusqlite::Connection;
use tracing::warn;

use crate::backend::Reader;
use crate::batch::{TxScope, drive};
use crate::errors::{Error, Result};
use crate::progress::{Phase, Progress};

/// What verification does when a key is not in the store.
///
/// Either way a warning naming the key is logged first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MissingKeyPolicy {
    /// Abort the run with [`Error::MissingRecord`].
    #[default]
    Fatal,
    /// Count the key as missing and keep reading.
    Warn,
}

/// Counts from one verification batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyStats {
    /// Keys found in the store.
    pub found: usize,
    /// Keys not found, in lookup order (only populated under [`MissingKeyPolicy::Warn`]).
    pub missing: Vec<String>,
}

/// Point-read every key through `reader`, decoding each row found.
///
/// # Errors
///
/// Any read or decode error, and, under [`MissingKeyPolicy::Fatal`], the
/// first missing key.
pub fn verify_keys<R: Reader + ?Sized, K: AsRef<str>>(
    conn: &mut Connection,
    reader: &R,
    keys: &[K],
    scope: TxScope,
    policy: MissingKeyPolicy,
    progress: &mut dyn Progress,
) -> Result<VerifyStats> {
    let mut stats = VerifyStats::default();
    drive(conn, Phase::Verify, scope, keys, progress, |conn, key| {
        let key = key.as_ref();
        if reader.read(conn, key)?.is_some() {
            stats.found += 1;
            return Ok(());
        }
        warn!(user = key, "record not found");
        match policy {
            MissingKeyPolicy::Fatal => Err(Error::MissingRecord {
                key: key.to_owned(),
            }),
            MissingKeyPolicy::Warn => {
                stats.missing.push(key.to_owned());
                Ok(())
            }
        }
    })?;
    Ok(stats)
}
