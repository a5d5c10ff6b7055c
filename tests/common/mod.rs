#![allow(dead_code)]

use sql_template::prelude::*;
use sql_template::test_utils::CountingProvider;
use tempfile::TempDir;

/// A database file that lives as long as the value.
pub struct TestDb {
    _dir: TempDir,
    path: String,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir
            .path()
            .join(format!("{name}.db"))
            .to_string_lossy()
            .into_owned();
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn provider(&self) -> SqliteProvider {
        SqliteProvider::builder(self.path.clone())
            .build()
            .expect("valid sqlite options")
    }

    pub fn template(&self) -> SqlTemplate<SqliteProvider> {
        SqlTemplate::new(self.provider())
    }

    pub fn counting_template(&self) -> SqlTemplate<CountingProvider<SqliteProvider>> {
        SqlTemplate::new(CountingProvider::new(self.provider()))
    }
}

/// `t(id int, name varchar)`, empty.
pub fn create_t<P: ConnectionProvider>(template: &SqlTemplate<P>) {
    template
        .update("CREATE TABLE t (id INTEGER, name VARCHAR(64))", ())
        .expect("create table t");
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RowShape {
    pub id: i64,
    pub name: String,
}

sql_template::target_shape!(RowShape { id: i64, name: String });
