//! Driving an executor or reader over a batch, optionally inside one transaction.
//!
//! A batch moves `Idle → BeginTxn | NoTxn → Applying(0..n) → Commit | Done`.
//! The first error from any step ends the batch and is returned as is; no
//! record is retried. In a transactional batch, returning early drops the
//! [`rusqlite::Transaction`], which rolls back everything the batch wrote.

use rusqlite::Connection;
use tracing::info;

use crate::backend::{Applied, UpsertExecutor};
use crate::errors::Result;
use crate::progress::{Phase, Progress};
use crate::record::UserRecord;

/// Where a batch's unit of work begins and ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TxScope {
    /// Every statement commits on its own (SQLite autocommit).
    #[default]
    PerRecord,
    /// One transaction spans the whole batch and commits after its last record.
    Batch,
}

impl TxScope {
    /// `Batch` when `use_transaction` is set.
    #[must_use]
    pub fn from_flag(use_transaction: bool) -> Self {
        if use_transaction {
            TxScope::Batch
        } else {
            TxScope::PerRecord
        }
    }
}

/// Counts from one upsert batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchStats {
    /// Records applied.
    pub processed: usize,
    /// Applications that inserted or updated a row.
    pub written: usize,
    /// Applications suppressed because the stored row was identical.
    pub unchanged: usize,
}

impl BatchStats {
    fn record(&mut self, applied: Applied) {
        self.processed += 1;
        match applied {
            Applied::Written => self.written += 1,
            Applied::Unchanged => self.unchanged += 1,
        }
    }
}

/// Run `step` on every item in order, within `scope`, ticking `progress`
/// after each item.
///
/// # Errors
///
/// The first error from beginning the transaction, from `step`, or from the
/// commit. Nothing of a transactional batch survives an error.
pub fn drive<T>(
    conn: &mut Connection,
    phase: Phase,
    scope: TxScope,
    items: &[T],
    progress: &mut dyn Progress,
    mut step: impl FnMut(&Connection, &T) -> Result<()>,
) -> Result<()> {
    progress.start(phase, items.len());
    match scope {
        TxScope::PerRecord => {
            for (i, item) in items.iter().enumerate() {
                step(conn, item)?;
                progress.advance(i + 1);
            }
        }
        TxScope::Batch => {
            let tx = conn.transaction()?;
            for (i, item) in items.iter().enumerate() {
                step(&tx, item)?;
                progress.advance(i + 1);
            }
            info!(%phase, "commit start");
            tx.commit()?;
            info!(%phase, "commit finished");
        }
    }
    progress.finish();
    Ok(())
}

/// Upsert every record through `executor`.
///
/// # Errors
///
/// See [`drive`].
pub fn upsert_all<E: UpsertExecutor + ?Sized>(
    conn: &mut Connection,
    executor: &E,
    phase: Phase,
    scope: TxScope,
    records: &[UserRecord],
    progress: &mut dyn Progress,
) -> Result<BatchStats> {
    let mut stats = BatchStats::default();
    drive(conn, phase, scope, records, progress, |conn, record| {
        stats.record(executor.upsert(conn, record)?);
        Ok(())
    })?;
    Ok(stats)
}
