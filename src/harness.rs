//! Sequencing the phases of a run and timing them.

use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use crate::backend::{Backend, BackendKind};
use crate::batch::{BatchStats, upsert_all};
use crate::config::Config;
use crate::errors::Result;
use crate::generator::{RecordGenerator, sort_by_user};
use crate::profile::CpuProfile;
use crate::progress::{Phase, Progress};
use crate::record::UserRecord;
use crate::store::Store;
use crate::verify::{VerifyStats, verify_keys};
use crate::workload::run_updates;

/// Outcome and timings of the three phases for one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// The backend the phases ran through.
    pub backend: BackendKind,
    /// Insert phase counts.
    pub insert: BatchStats,
    /// Update phase counts (zero when the workload is disabled).
    pub update: BatchStats,
    /// Verification counts.
    pub verify: VerifyStats,
    /// Wall time of each phase, in execution order.
    pub timings: Vec<(Phase, Duration)>,
}

impl RunReport {
    /// Wall time spent in `phase`, if it ran.
    #[must_use]
    pub fn elapsed(&self, phase: Phase) -> Option<Duration> {
        self.timings
            .iter()
            .find_map(|(p, elapsed)| (*p == phase).then_some(*elapsed))
    }

    /// Log one summary line per phase.
    pub fn log_summary(&self) {
        for (phase, elapsed) in &self.timings {
            info!(
                backend = %self.backend,
                %phase,
                elapsed_ms = elapsed.as_millis(),
                "phase timing"
            );
        }
        info!(
            backend = %self.backend,
            inserted = self.insert.written,
            insert_unchanged = self.insert.unchanged,
            updated = self.update.written,
            update_unchanged = self.update.unchanged,
            verified = self.verify.found,
            missing = self.verify.missing.len(),
            "run summary"
        );
    }
}

/// Generate the dataset, open the store, and run every configured backend.
///
/// The store is wiped before each backend so every run starts empty. With a
/// CPU profile path configured, profiling wraps everything and the report is
/// written after the last backend completes.
///
/// # Errors
///
/// The first error from any step; later backends do not run.
pub fn run(config: &Config, progress: &mut dyn Progress) -> Result<Vec<RunReport>> {
    let profile = config
        .cpuprofile
        .as_deref()
        .map(CpuProfile::start)
        .transpose()?;

    if config.flip_year_birth {
        warn!("flip-year-birth has no effect on record generation");
    }

    let mut store = Store::open(&config.database, config.recreate)?;
    let records = generate(config)?;

    let mut reports = Vec::new();
    for kind in config.backend.kinds() {
        store.wipe()?;
        let backend = kind.backend();
        let report = run_backend(&mut store, backend.as_ref(), records.clone(), config, progress)?;
        report.log_summary();
        reports.push(report);
    }

    if let Some(profile) = profile {
        profile.finish()?;
    }
    Ok(reports)
}

/// Generate `config.row_count` records and sort them by key.
///
/// # Errors
///
/// Any generation error.
pub fn generate(config: &Config) -> Result<Vec<UserRecord>> {
    let started = Instant::now();
    let mut records = RecordGenerator::new(config.seed).generate(config.row_count)?;
    sort_by_user(&mut records);
    info!(
        rows = records.len(),
        elapsed_ms = started.elapsed().as_millis(),
        "records generated"
    );
    Ok(records)
}

/// Insert, update and verify `records` through one backend.
///
/// # Errors
///
/// The first error from any phase.
pub fn run_backend(
    store: &mut Store,
    backend: &dyn Backend,
    mut records: Vec<UserRecord>,
    config: &Config,
    progress: &mut dyn Progress,
) -> Result<RunReport> {
    let scope = config.scope();
    let kind = backend.kind();
    info!(backend = %kind, ?scope, "executing");
    let conn = store.connection_mut();
    let mut timings = Vec::with_capacity(3);

    let insert = timed(kind, Phase::Insert, &mut timings, || {
        upsert_all(conn, backend, Phase::Insert, scope, &records, progress)
    })?;

    let update = timed(kind, Phase::Update, &mut timings, || {
        run_updates(
            conn,
            backend,
            &mut records,
            config.update_count,
            scope,
            progress,
        )
    })?;

    let keys: Vec<&str> = records.iter().map(|r| r.user.as_str()).collect();
    let verify = timed(kind, Phase::Verify, &mut timings, || {
        verify_keys(conn, backend, &keys, scope, config.on_missing, progress)
    })?;

    Ok(RunReport {
        backend: kind,
        insert,
        update,
        verify,
        timings,
    })
}

/// Run one phase, recording its wall time on success and logging the phase
/// on failure.
fn timed<T>(
    backend: BackendKind,
    phase: Phase,
    timings: &mut Vec<(Phase, Duration)>,
    work: impl FnOnce() -> Result<T>,
) -> Result<T> {
    let started = Instant::now();
    let out = work().inspect_err(|e| error!(%backend, %phase, "phase failed: {e}"))?;
    timings.push((phase, started.elapsed()));
    Ok(out)
}
