#![cfg(feature = "async")]

mod common;

use common::{RowShape, TestDb};
use sql_template::params;
use sql_template::prelude::*;
use sql_template::test_utils::CountingProvider;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_template_runs_on_the_blocking_pool() -> Result<(), DataAccessError> {
    let db = TestDb::new("async");
    let template = AsyncSqlTemplate::new(CountingProvider::new(db.provider()));

    template
        .update("CREATE TABLE t (id INTEGER, name TEXT)", Vec::new())
        .await?;
    let inserted = template
        .update("INSERT INTO t(id,name) VALUES(?,?), (?,?)", params![1, "a", 2, "b"])
        .await?;
    assert_eq!(inserted, 2);

    let rows: Vec<RowShape> = template
        .query_as("SELECT * FROM t ORDER BY id", Vec::new())
        .await?;
    assert_eq!(
        rows,
        vec![
            RowShape {
                id: 1,
                name: "a".into()
            },
            RowShape {
                id: 2,
                name: "b".into()
            },
        ]
    );

    let missing: Option<RowShape> = template
        .query_one_as("SELECT * FROM t WHERE id = ?", params![999])
        .await?;
    assert!(missing.is_none());

    let max_id = template
        .query_with("SELECT MAX(id) AS m FROM t", Vec::new(), |cursor| {
            Ok(cursor.next_row()?.and_then(|row| row.get("m")?.as_int()))
        })
        .await?;
    assert_eq!(max_id, Some(2));

    let raw = template.query_rows("SELECT name FROM t", Vec::new()).await?;
    assert_eq!(raw.len(), 2);

    assert_eq!(template.blocking().provider().outstanding(), 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn panics_in_the_worker_become_worker_failures() {
    let db = TestDb::new("async_panic");
    let template = AsyncSqlTemplate::new(CountingProvider::new(db.provider()));

    let err = template
        .query_with("SELECT 1", Vec::new(), |_cursor| -> Result<(), DataAccessError> {
            panic!("mapper blew up")
        })
        .await
        .expect_err("worker panicked");
    assert!(matches!(err, DataAccessError::WorkerFailure(_)));
    assert_eq!(err.kind(), FailureKind::Statement);
    assert_eq!(template.blocking().provider().outstanding(), 0);
}
