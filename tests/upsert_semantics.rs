//! Tests for the conflict-aware upsert: insert when absent, update only when
//! some non-key column differs (null-aware), and write nothing otherwise.
//!
//! Every test runs against both backends.

use rusqlite::Connection;
use upsert_bench::{Applied, BackendKind, Store, UserRecord};

const BACKENDS: [BackendKind; 2] = [BackendKind::DirectSql, BackendKind::Builder];

/// A fully populated record.
fn full(user: &str) -> UserRecord {
    UserRecord {
        user: user.into(),
        city: Some("Springfield".into()),
        region: Some("Oregon".into()),
        country: Some("US".into()),
        area_code: Some("541".into()),
        zip_code: Some("97477".into()),
        year_birth: Some(1980),
        im: Some(format!("@{user}")),
        name: Some("Alice Liddell".into()),
        created_tst: None,
        changed_tst: None,
    }
}

/// Push `changed_tst` into the past without going through an upsert, so a
/// later advance is visible even within the same millisecond.
fn backdate(conn: &Connection, user: &str) {
    conn.execute(
        "UPDATE user SET changed_tst = '2000-01-01 00:00:00.000' WHERE user = ?1",
        [user],
    )
    .unwrap();
}

fn column_edits() -> [(&'static str, fn(&mut UserRecord)); 10] {
    [
        ("city", |r: &mut UserRecord| r.city = Some("Shelbyville".into())),
        ("city to null", |r: &mut UserRecord| r.city = None),
        ("region", |r: &mut UserRecord| r.region = Some("Ohio".into())),
        ("country", |r: &mut UserRecord| r.country = Some("CA".into())),
        ("area_code", |r: &mut UserRecord| r.area_code = None),
        ("zip_code", |r: &mut UserRecord| r.zip_code = Some("10001".into())),
        ("year_birth", |r: &mut UserRecord| {
            r.year_birth = r.year_birth.map(|y| y - 1);
        }),
        ("year_birth to null", |r: &mut UserRecord| r.year_birth = None),
        ("im", |r: &mut UserRecord| r.im = Some("@other".into())),
        ("name to empty", |r: &mut UserRecord| r.name = Some(String::new())),
    ]
}

#[test]
fn first_application_inserts() {
    for kind in BACKENDS {
        let store = Store::open_in_memory().unwrap();
        let backend = kind.backend();
        let conn = store.connection();

        assert_eq!(backend.upsert(conn, &full("alice")).unwrap(), Applied::Written);

        let stored = backend.read(conn, "alice").unwrap().unwrap();
        assert!(stored.created_tst.is_some(), "{kind}");
        assert_eq!(stored.created_tst, stored.changed_tst, "{kind}");
        assert_eq!(stored.without_timestamps(), full("alice"), "{kind}");
    }
}

#[test]
fn identical_reapplication_writes_nothing() {
    for kind in BACKENDS {
        let store = Store::open_in_memory().unwrap();
        let backend = kind.backend();
        let conn = store.connection();

        backend.upsert(conn, &full("alice")).unwrap();
        backdate(conn, "alice");
        let before = backend.read(conn, "alice").unwrap().unwrap();

        assert_eq!(backend.upsert(conn, &full("alice")).unwrap(), Applied::Unchanged, "{kind}");
        assert_eq!(backend.read(conn, "alice").unwrap().unwrap(), before, "{kind}");
        assert_eq!(store.count().unwrap(), 1);
    }
}

#[test]
fn null_equals_null() {
    for kind in BACKENDS {
        let store = Store::open_in_memory().unwrap();
        let backend = kind.backend();
        let conn = store.connection();

        let sparse = UserRecord::new("nobody");
        assert_eq!(backend.upsert(conn, &sparse).unwrap(), Applied::Written);
        assert_eq!(backend.upsert(conn, &sparse).unwrap(), Applied::Unchanged, "{kind}");
    }
}

#[test]
fn any_changed_column_updates_and_advances_changed_tst() {
    for kind in BACKENDS {
        for (label, edit) in column_edits() {
            let store = Store::open_in_memory().unwrap();
            let backend = kind.backend();
            let conn = store.connection();

            backend.upsert(conn, &full("alice")).unwrap();
            backdate(conn, "alice");
            let before = backend.read(conn, "alice").unwrap().unwrap();

            let mut changed = full("alice");
            edit(&mut changed);
            assert_eq!(
                backend.upsert(conn, &changed).unwrap(),
                Applied::Written,
                "{kind}: {label}"
            );

            let after = backend.read(conn, "alice").unwrap().unwrap();
            assert_eq!(after.clone().without_timestamps(), changed, "{kind}: {label}");
            assert_eq!(after.created_tst, before.created_tst, "{kind}: {label}");
            assert!(after.changed_tst > before.changed_tst, "{kind}: {label}");
        }
    }
}

#[test]
fn value_to_null_and_back_are_both_changes() {
    for kind in BACKENDS {
        let store = Store::open_in_memory().unwrap();
        let backend = kind.backend();
        let conn = store.connection();

        let mut record = full("carol");
        backend.upsert(conn, &record).unwrap();
        record.zip_code = None;
        assert_eq!(backend.upsert(conn, &record).unwrap(), Applied::Written, "{kind}");
        record.zip_code = Some("97477".into());
        assert_eq!(backend.upsert(conn, &record).unwrap(), Applied::Written, "{kind}");
        assert_eq!(backend.upsert(conn, &record).unwrap(), Applied::Unchanged, "{kind}");
    }
}

#[test]
fn missing_key_reads_none() {
    for kind in BACKENDS {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(kind.backend().read(store.connection(), "ghost").unwrap(), None);
    }
}
