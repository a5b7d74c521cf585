use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rusqlite::Connection;

use crate::error::SQLError;
use crate::traits::{Row, SQLExecutor, Value};

/// Upper bound on idle connections kept in the pool.
const MAX_IDLE_CONNS: usize = 4;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

enum Source {
    File(PathBuf),
    /// Shared-cache URI, so every pooled connection sees the same database.
    Memory(String),
}

/// SQL store backed by rusqlite (bundled SQLite) with a small internal
/// connection pool. Plain calls check a connection out per statement and run
/// in autocommit mode; [`with_transaction`] dedicates one connection to the
/// whole scope.
///
/// [`with_transaction`]: SqliteStore::with_transaction
pub struct SqliteStore {
    source: Source,
    idle: Mutex<Vec<Connection>>,
    // Keeps a shared in-memory database alive for the store's lifetime.
    anchor: Mutex<Option<Connection>>,
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path.
    pub fn open(path: &Path) -> Result<Self, SQLError> {
        let store = Self {
            source: Source::File(path.to_path_buf()),
            idle: Mutex::new(Vec::new()),
            anchor: Mutex::new(None),
        };

        // Open one connection eagerly so a bad path fails here, not on
        // first use.
        let conn = store.connect()?;
        store.recycle(conn);
        Ok(store)
    }

    /// Create an in-memory SQLite database (useful for tests).
    pub fn open_in_memory() -> Result<Self, SQLError> {
        static SEQ: AtomicU64 = AtomicU64::new(0);
        let uri = format!(
            "file:innkeep-mem-{}?mode=memory&cache=shared",
            SEQ.fetch_add(1, Ordering::Relaxed)
        );

        let store = Self {
            source: Source::Memory(uri),
            idle: Mutex::new(Vec::new()),
            anchor: Mutex::new(None),
        };

        let conn = store.connect()?;
        if let Ok(mut anchor) = store.anchor.lock() {
            *anchor = Some(conn);
        }
        Ok(store)
    }

    /// Execute a batch of statements (e.g. a multi-statement schema).
    pub fn exec_batch(&self, sql: &str) -> Result<(), SQLError> {
        let conn = self.take_conn()?;
        let result = conn
            .execute_batch(sql)
            .map_err(|e| SQLError::Execution(e.to_string()));
        self.recycle(conn);
        result
    }

    /// Run `f` inside a transaction on a dedicated connection.
    ///
    /// Commits when `f` returns Ok; rolls back when it returns Err or
    /// unwinds (the transaction guard rolls back on drop). The connection
    /// returns to the pool on all non-panic paths. Statements issued through
    /// the [`SqlSession`] join the transaction; statements issued on the
    /// store directly run on other connections, outside it. Nesting is not
    /// supported.
    pub fn with_transaction<R, E>(
        &self,
        f: impl FnOnce(&SqlSession<'_>) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<SQLError>,
    {
        let mut conn = self.take_conn().map_err(E::from)?;
        let result = run_transaction(&mut conn, f);
        self.recycle(conn);
        result
    }

    fn connect(&self) -> Result<Connection, SQLError> {
        let conn = match &self.source {
            Source::File(path) => Connection::open(path),
            Source::Memory(uri) => Connection::open(uri),
        }
        .map_err(|e| SQLError::Connection(e.to_string()))?;

        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| SQLError::Connection(e.to_string()))?;

        if let Source::File(_) = &self.source {
            // WAL keeps readers unblocked while one writer holds the lock.
            conn.execute_batch("PRAGMA journal_mode=WAL;")
                .map_err(|e| SQLError::Connection(e.to_string()))?;
        }

        Ok(conn)
    }

    fn take_conn(&self) -> Result<Connection, SQLError> {
        let reused = match self.idle.lock() {
            Ok(mut idle) => idle.pop(),
            Err(_) => None,
        };
        match reused {
            Some(conn) => Ok(conn),
            None => self.connect(),
        }
    }

    fn recycle(&self, conn: Connection) {
        if let Ok(mut idle) = self.idle.lock() {
            if idle.len() < MAX_IDLE_CONNS {
                idle.push(conn);
            }
        }
    }
}

impl SQLExecutor for SqliteStore {
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SQLError> {
        let conn = self.take_conn()?;
        let result = run_query(&conn, sql, params);
        self.recycle(conn);
        result
    }

    fn exec(&self, sql: &str, params: &[Value]) -> Result<u64, SQLError> {
        let conn = self.take_conn()?;
        let result = run_exec(&conn, sql, params);
        self.recycle(conn);
        result
    }

    fn exec_insert(&self, sql: &str, params: &[Value]) -> Result<i64, SQLError> {
        let conn = self.take_conn()?;
        let result = run_exec_insert(&conn, sql, params);
        self.recycle(conn);
        result
    }
}

/// Executor scoped to one open transaction. Handed to `with_transaction`
/// callbacks; every statement issued through it is part of the transaction.
pub struct SqlSession<'a> {
    conn: &'a Connection,
}

impl<'a> SqlSession<'a> {
    fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl SQLExecutor for SqlSession<'_> {
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SQLError> {
        run_query(self.conn, sql, params)
    }

    fn exec(&self, sql: &str, params: &[Value]) -> Result<u64, SQLError> {
        run_exec(self.conn, sql, params)
    }

    fn exec_insert(&self, sql: &str, params: &[Value]) -> Result<i64, SQLError> {
        run_exec_insert(self.conn, sql, params)
    }
}

fn run_transaction<R, E>(
    conn: &mut Connection,
    f: impl FnOnce(&SqlSession<'_>) -> Result<R, E>,
) -> Result<R, E>
where
    E: From<SQLError>,
{
    let tx = conn
        .transaction()
        .map_err(|e| SQLError::Transaction(e.to_string()))?;

    let session = SqlSession::new(&tx);
    let out = f(&session)?;

    tx.commit()
        .map_err(|e| SQLError::Transaction(e.to_string()))?;
    Ok(out)
}

/// Convert our Value enum to rusqlite's ToSql.
fn bind_params(params: &[Value]) -> Vec<Box<dyn rusqlite::types::ToSql + '_>> {
    params
        .iter()
        .map(|v| -> Box<dyn rusqlite::types::ToSql + '_> {
            match v {
                Value::Null => Box::new(rusqlite::types::Null),
                Value::Integer(i) => Box::new(*i),
                Value::Real(f) => Box::new(*f),
                Value::Text(s) => Box::new(s.as_str()),
                Value::Blob(b) => Box::new(b.as_slice()),
            }
        })
        .collect()
}

fn run_query(conn: &Connection, sql: &str, params: &[Value]) -> Result<Vec<Row>, SQLError> {
    let bound = bind_params(params);
    let param_refs: Vec<&dyn rusqlite::types::ToSql> =
        bound.iter().map(|b| b.as_ref()).collect();

    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| SQLError::Query(e.to_string()))?;

    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let rows = stmt
        .query_map(param_refs.as_slice(), |row| {
            let mut columns = Vec::new();
            for (i, name) in column_names.iter().enumerate() {
                let val = row_value_at(row, i);
                columns.push((name.clone(), val));
            }
            Ok(Row { columns })
        })
        .map_err(|e| SQLError::Query(e.to_string()))?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(|e| SQLError::Query(e.to_string()))?);
    }
    Ok(result)
}

fn run_exec(conn: &Connection, sql: &str, params: &[Value]) -> Result<u64, SQLError> {
    let bound = bind_params(params);
    let param_refs: Vec<&dyn rusqlite::types::ToSql> =
        bound.iter().map(|b| b.as_ref()).collect();

    let affected = conn
        .execute(sql, param_refs.as_slice())
        .map_err(|e| SQLError::Execution(e.to_string()))?;

    Ok(affected as u64)
}

fn run_exec_insert(conn: &Connection, sql: &str, params: &[Value]) -> Result<i64, SQLError> {
    run_exec(conn, sql, params)?;
    Ok(conn.last_insert_rowid())
}

/// Extract a Value from a rusqlite row at a given column index.
fn row_value_at(row: &rusqlite::Row, idx: usize) -> Value {
    use rusqlite::types::ValueRef;

    match row.get_ref(idx) {
        Ok(ValueRef::Null) | Err(_) => Value::Null,
        Ok(ValueRef::Integer(i)) => Value::Integer(i),
        Ok(ValueRef::Real(f)) => Value::Real(f),
        Ok(ValueRef::Text(t)) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        Ok(ValueRef::Blob(b)) => Value::Blob(b.to_vec()),
    }
}
