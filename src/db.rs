use std::sync::{Arc, Mutex};

use rusqlite::{params_from_iter, types::Value, Connection};
use thiserror::Error;

pub mod users;

/// One result row, column values in select order.
pub type Row = Vec<Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unable to open database: {0}")]
    Open(#[source] rusqlite::Error),
    #[error("Error locking db_conn")]
    Lock,
    #[error("{0}")]
    Prepare(#[source] rusqlite::Error),
    #[error("{0}")]
    Execute(#[source] rusqlite::Error),
}

/// Executes parameterized SQL. Shared by every request, so implementations
/// must be safe to call concurrently.
pub trait Store: Send + Sync {
    /// Runs a statement and returns the number of affected rows.
    fn execute(&self, sql: &str, params: &[&str]) -> Result<usize, StoreError>;

    /// Runs a query and returns every row it produced.
    fn query(&self, sql: &str, params: &[&str]) -> Result<Vec<Row>, StoreError>;
}

pub struct SqliteStore {
    db_conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(StoreError::Open)?;
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: Connection) -> Self {
        SqliteStore {
            db_conn: Arc::new(Mutex::new(conn)),
        }
    }
}

impl Store for SqliteStore {
    fn execute(&self, sql: &str, params: &[&str]) -> Result<usize, StoreError> {
        let db_conn = match self.db_conn.lock() {
            Ok(c) => c,
            Err(_) => return Err(StoreError::Lock),
        };
        let mut prepared = db_conn.prepare(sql).map_err(StoreError::Prepare)?;
        prepared
            .execute(params_from_iter(params))
            .map_err(StoreError::Execute)
    }

    fn query(&self, sql: &str, params: &[&str]) -> Result<Vec<Row>, StoreError> {
        let db_conn = match self.db_conn.lock() {
            Ok(c) => c,
            Err(_) => return Err(StoreError::Lock),
        };
        let mut prepared = db_conn.prepare(sql).map_err(StoreError::Prepare)?;
        let column_count = prepared.column_count();
        let rows = prepared
            .query_map(params_from_iter(params), |row| {
                (0..column_count)
                    .map(|i| row.get::<_, Value>(i))
                    .collect::<rusqlite::Result<Row>>()
            })
            .map_err(StoreError::Execute)?;

        // rows borrows prepared, so collect before it drops
        let result = rows
            .collect::<rusqlite::Result<Vec<Row>>>()
            .map_err(StoreError::Execute);
        result
    }
}
