mod common;

use std::error::Error as _;

use common::{RowShape, TestDb, create_t};
use sql_template::params;
use sql_template::prelude::*;

#[derive(Debug, Default)]
struct WithEmail {
    id: i64,
    email: String,
}

sql_template::target_shape!(WithEmail { id: i64, email: String });

#[test]
fn missing_column_fails_without_partial_result() {
    let db = TestDb::new("missing");
    let template = db.template();
    create_t(&template);
    template
        .update("INSERT INTO t(id,name) VALUES(?,?), (?,?)", params![1, "a", 2, "b"])
        .expect("insert");

    let err = template
        .query_as::<WithEmail>("SELECT * FROM t", ())
        .expect_err("t has no email column");
    assert_eq!(err.kind(), FailureKind::Mapping);
    assert!(matches!(
        err,
        DataAccessError::MappingFailure(MappingError::MissingColumn { ref column }) if column == "email"
    ));
}

#[test]
fn failure_on_a_later_row_discards_earlier_rows() {
    let db = TestDb::new("later");
    let template = db.template();
    create_t(&template);
    template
        .update("INSERT INTO t(id,name) VALUES(1,'a'), (2,NULL), (3,'c')", ())
        .expect("insert");

    let result = template.query_as::<RowShape>("SELECT * FROM t ORDER BY id", ());
    match result {
        Err(DataAccessError::MappingFailure(MappingError::IncompatibleType {
            column,
            expected,
            found,
        })) => {
            assert_eq!(column, "name");
            assert_eq!(expected, "String");
            assert_eq!(found, "NULL");
        }
        other => panic!("expected a mapping failure, got {other:?}"),
    }
}

#[test]
fn too_many_parameters_is_a_statement_failure() {
    let db = TestDb::new("excess");
    let template = db.template();
    create_t(&template);

    let err = template
        .update("INSERT INTO t(id,name) VALUES(?,?)", params![1, "a", "extra"])
        .expect_err("three values for two placeholders");
    assert_eq!(err.kind(), FailureKind::Statement);
    assert!(matches!(
        err,
        DataAccessError::ParameterCount {
            expected: 2,
            given: 3
        }
    ));
}

#[test]
fn too_few_parameters_is_reported_by_the_driver() {
    let db = TestDb::new("fewer");
    let template = db.template();
    create_t(&template);

    let err = template
        .query_as::<RowShape>("SELECT * FROM t WHERE id = ? AND name = ?", params![1])
        .expect_err("one value for two placeholders");
    assert_eq!(err.kind(), FailureKind::Statement);
    assert!(matches!(
        err,
        DataAccessError::StatementFailure(rusqlite::Error::InvalidParameterCount(..))
    ));
}

#[test]
fn syntax_error_keeps_the_driver_error_as_source() {
    let db = TestDb::new("syntax");
    let template = db.template();

    let err = template
        .update("INSERT INTO nowhere VALUES (", ())
        .expect_err("bad sql");
    assert_eq!(err.kind(), FailureKind::Statement);
    assert!(err.source().is_some());
}

#[test]
fn constraint_violation_is_a_statement_failure() {
    let db = TestDb::new("constraint");
    let template = db.template();
    template
        .update("CREATE TABLE u (id INTEGER PRIMARY KEY, name TEXT NOT NULL)", ())
        .expect("create");
    template
        .update("INSERT INTO u VALUES (?, ?)", params![1, "a"])
        .expect("first insert");

    let err = template
        .update("INSERT INTO u VALUES (?, ?)", params![1, "dup"])
        .expect_err("duplicate key");
    assert_eq!(err.kind(), FailureKind::Statement);
    let source = err.source().expect("driver error preserved");
    assert!(source.to_string().contains("UNIQUE"));
}

#[test]
fn unopenable_database_is_a_connection_failure() {
    let db = TestDb::new("absent");
    let provider = SqliteProvider::builder(db.path().to_owned())
        .read_only(true)
        .build()
        .expect("valid options");
    let template = SqlTemplate::new(provider);

    let err = template
        .query_rows("SELECT 1", ())
        .expect_err("read-only open of a missing file");
    assert_eq!(err.kind(), FailureKind::Connection);
    assert!(err.source().is_some());
}

#[test]
fn errors_from_a_custom_mapper_pass_through() {
    let db = TestDb::new("mapper");
    let template = db.template();
    create_t(&template);

    let err = template
        .query_map("SELECT * FROM t", |_cursor| -> Result<(), DataAccessError> {
            Err(MappingError::MissingColumn {
                column: "custom".into(),
            }
            .into())
        })
        .expect_err("mapper failed");
    assert!(err.is_mapping());
}

#[test]
fn invalid_options_are_config_errors() {
    let err = SqliteProvider::builder("").build().expect_err("empty path");
    assert!(matches!(err, DataAccessError::ConfigError(_)));
    assert_eq!(err.kind(), FailureKind::Connection);
}

#[derive(Debug, Default)]
struct Named {
    name: String,
}

sql_template::target_shape!(Named { name: String });

#[test]
fn invalid_utf8_text_is_a_mapping_failure() {
    let db = TestDb::new("utf8");
    let template = db.template();
    template
        .update("CREATE TABLE names (name TEXT)", ())
        .expect("create");
    template
        .update("INSERT INTO names VALUES (CAST(X'FF41' AS TEXT))", ())
        .expect("insert");

    let err = template
        .query_as::<Named>("SELECT name FROM names", ())
        .expect_err("bytes are not UTF-8");
    assert_eq!(err.kind(), FailureKind::Mapping);
    assert!(matches!(
        err,
        DataAccessError::MappingFailure(MappingError::InvalidText { ref column }) if column == "name"
    ));

    let raw = template.query_rows("SELECT name FROM names", ());
    assert!(raw.is_err_and(|e| e.is_mapping()));
}
