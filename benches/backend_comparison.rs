//! Benchmark comparing the two upsert backends.
//!
//! Every combination of backend (`direct-sql`, `builder`) and transaction
//! scope (`per_record`, `tx`) runs two workloads over seeded records:
//! - **insert**: every record into an empty store
//! - **reapply**: the same records again, so every upsert is suppressed
//!
//! Stores live in memory, so the numbers isolate statement preparation and
//! SQLite's upsert path from disk syncs.

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use upsert_bench::batch::upsert_all;
use upsert_bench::generator::sort_by_user;
use upsert_bench::{
    Backend, BackendKind, Phase, RecordGenerator, Silent, Store, TxScope, UserRecord,
};

const SEED: u64 = 42;

fn records(count: usize) -> Vec<UserRecord> {
    let mut records = RecordGenerator::new(Some(SEED)).generate(count).unwrap();
    sort_by_user(&mut records);
    records
}

fn scope_label(scope: TxScope) -> &'static str {
    match scope {
        TxScope::PerRecord => "per_record",
        TxScope::Batch => "tx",
    }
}

fn apply(store: &mut Store, backend: &dyn Backend, scope: TxScope, records: &[UserRecord]) {
    upsert_all(
        store.connection_mut(),
        backend,
        Phase::Insert,
        scope,
        records,
        &mut Silent,
    )
    .unwrap();
}

fn populated(backend: &dyn Backend, records: &[UserRecord]) -> Store {
    let mut store = Store::open_in_memory().unwrap();
    apply(&mut store, backend, TxScope::Batch, records);
    store
}

fn bench_backends(c: &mut Criterion) {
    for count in [100usize, 1000] {
        let records = records(count);

        for workload in ["insert", "reapply"] {
            let mut group = c.benchmark_group(format!("upsert/{workload}/{count}"));

            for kind in [BackendKind::DirectSql, BackendKind::Builder] {
                let backend = kind.backend();
                for scope in [TxScope::PerRecord, TxScope::Batch] {
                    let backend = backend.as_ref();
                    let records = &records;
                    group.bench_function(format!("{kind}/{}", scope_label(scope)), |b| {
                        b.iter_batched(
                            || {
                                if workload == "insert" {
                                    Store::open_in_memory().unwrap()
                                } else {
                                    populated(backend, records)
                                }
                            },
                            |mut store| apply(&mut store, backend, scope, records),
                            BatchSize::SmallInput,
                        );
                    });
                }
            }
            group.finish();
        }
    }
}

criterion_group!(benches, bench_backends);
criterion_main!(benches);
