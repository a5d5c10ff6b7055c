mod common;

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::thread;

use common::{RowShape, TestDb, create_t};
use sql_template::params;
use sql_template::prelude::*;
use sql_template::test_utils::CountingProvider;

#[derive(Debug, Default)]
struct Missing {
    absent: i64,
}

sql_template::target_shape!(Missing { absent: i64 });

#[test]
fn every_exit_path_gives_the_connection_back() {
    let db = TestDb::new("leaks");
    let template = db.counting_template();
    create_t(&template);
    template
        .update("INSERT INTO t(id,name) VALUES(?,?)", params![1, "a"])
        .expect("insert");

    // success
    let rows: Vec<RowShape> = template.query_as("SELECT * FROM t", ()).expect("query");
    assert_eq!(rows.len(), 1);
    assert_eq!(template.provider().outstanding(), 0);

    // mapping failure inside the cursor consumer
    assert!(template.query_as::<Missing>("SELECT * FROM t", ()).is_err());
    assert_eq!(template.provider().outstanding(), 0);

    // prepare failure
    assert!(template.update("SELEC nonsense", ()).is_err());
    assert_eq!(template.provider().outstanding(), 0);

    // bind failure
    assert!(template
        .update("INSERT INTO t(id,name) VALUES(?,?)", params![1])
        .is_err());
    assert_eq!(template.provider().outstanding(), 0);

    // every call went through acquire and an explicit release
    let provider = template.provider();
    assert_eq!(provider.acquired(), 6);
    assert_eq!(provider.released(), provider.acquired());
}

#[test]
fn panicking_mapper_still_drops_the_connection() {
    let db = TestDb::new("panic");
    let template = db.counting_template();
    create_t(&template);

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = template.query_map("SELECT * FROM t", |_cursor| -> Result<(), DataAccessError> {
            panic!("mapper blew up")
        });
    }));
    assert!(result.is_err());
    assert_eq!(template.provider().outstanding(), 0);

    // the database is still usable afterwards
    assert_eq!(
        template
            .update("INSERT INTO t(id,name) VALUES(?,?)", params![2, "b"])
            .expect("insert after panic"),
        1
    );
}

#[test]
fn a_consumer_that_stops_early_releases_everything() {
    let db = TestDb::new("early");
    let template = db.counting_template();
    create_t(&template);
    template
        .update("INSERT INTO t(id,name) VALUES(1,'a'), (2,'b'), (3,'c')", ())
        .expect("insert");

    let first: Option<RowShape> = template
        .query_one_as("SELECT * FROM t ORDER BY id", ())
        .expect("query");
    assert_eq!(first.map(|r| r.id), Some(1));
    assert_eq!(template.provider().outstanding(), 0);

    // statements were finalized, so the schema can change right away
    template.update("DROP TABLE t", ()).expect("drop after partial read");
}

#[test]
fn concurrent_callers_each_get_their_own_connection() {
    let db = TestDb::new("threads");
    let template = Arc::new(db.counting_template());
    template
        .update("CREATE TABLE hits (worker INTEGER, n INTEGER)", ())
        .expect("create");

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let template = Arc::clone(&template);
            thread::spawn(move || -> Result<(), DataAccessError> {
                for n in 0..10 {
                    template.update(
                        "INSERT INTO hits (worker, n) VALUES (?, ?)",
                        params![worker, n],
                    )?;
                }
                Ok(())
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker thread").expect("inserts");
    }

    let total = template
        .query_map("SELECT COUNT(*) FROM hits", |cursor| {
            Ok(cursor.next_row()?.and_then(|row| row.get_by_index(0)?.as_int()))
        })
        .expect("count");
    assert_eq!(total, Some(40));
    assert_eq!(template.provider().outstanding(), 0);
    assert_eq!(template.provider().acquired(), 42);
}
