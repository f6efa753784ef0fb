//! The update workload: re-apply a bounded prefix with one column changed.

use rusqlite::Connection;
use tracing::info;

use crate::backend::UpsertExecutor;
use crate::batch::{BatchStats, TxScope, upsert_all};
use crate::errors::Result;
use crate::progress::{Phase, Progress};
use crate::record::UserRecord;

/// How many records an update budget of `budget` touches.
///
/// The workload stops before consuming the `budget`-th record, so a budget of
/// `M >= 1` updates `M - 1` records; `0` disables the workload.
#[must_use]
pub fn update_span(budget: usize, available: usize) -> usize {
    budget.saturating_sub(1).min(available)
}

/// Decrement `year_birth` on the first [`update_span`] records in place, then
/// upsert them through `executor` as one batch.
///
/// A record without a `year_birth` keeps it absent, which makes its upsert a
/// no-op. A budget of zero returns immediately without touching the store.
///
/// # Errors
///
/// See [`crate::batch::drive`].
pub fn run_updates<E: UpsertExecutor + ?Sized>(
    conn: &mut Connection,
    executor: &E,
    records: &mut [UserRecord],
    budget: usize,
    scope: TxScope,
    progress: &mut dyn Progress,
) -> Result<BatchStats> {
    if budget == 0 {
        info!("update workload disabled");
        return Ok(BatchStats::default());
    }
    let span = update_span(budget, records.len());
    let selected = &mut records[..span];
    for record in selected.iter_mut() {
        record.year_birth = record.year_birth.map(|year| year.saturating_sub(1));
    }
    upsert_all(conn, executor, Phase::Update, scope, selected, progress)
}
