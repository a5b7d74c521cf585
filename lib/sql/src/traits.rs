use crate::error::SQLError;

/// A dynamically-typed SQL parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

/// A row returned from a SQL query — column name to value.
#[derive(Debug, Clone)]
pub struct Row {
    pub columns: Vec<(String, Value)>,
}

impl Row {
    /// Get a column value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Get a text column value by name.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(Value::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get an integer column value by name.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(Value::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    /// Get a real column value by name. Integer values are widened, since
    /// SQLite returns `SUM()` over an integer column as INTEGER.
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        match self.get(name) {
            Some(Value::Real(f)) => Some(*f),
            Some(Value::Integer(i)) => Some(*i as f64),
            _ => None,
        }
    }
}

/// Statement execution interface, implemented by both [`SqliteStore`] (each
/// call on a pooled connection, autocommit) and [`SqlSession`] (all calls
/// inside one transaction). Data-access code written against this trait runs
/// unchanged inside or outside a transaction scope.
///
/// [`SqliteStore`]: crate::sqlite::SqliteStore
/// [`SqlSession`]: crate::sqlite::SqlSession
pub trait SQLExecutor {
    /// Execute a query and return rows.
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SQLError>;

    /// Execute a statement (UPDATE/DELETE) and return the affected row count.
    fn exec(&self, sql: &str, params: &[Value]) -> Result<u64, SQLError>;

    /// Execute an INSERT and return the auto-assigned rowid.
    fn exec_insert(&self, sql: &str, params: &[Value]) -> Result<i64, SQLError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_getters() {
        let row = Row {
            columns: vec![
                ("id".to_string(), Value::Integer(7)),
                ("title".to_string(), Value::Text("sea view".to_string())),
                ("price".to_string(), Value::Real(99.5)),
            ],
        };
        assert_eq!(row.get_i64("id"), Some(7));
        assert_eq!(row.get_str("title"), Some("sea view"));
        assert_eq!(row.get_f64("price"), Some(99.5));
        assert_eq!(row.get_i64("missing"), None);
    }

    #[test]
    fn get_f64_widens_integers() {
        let row = Row {
            columns: vec![("sum".to_string(), Value::Integer(60000))],
        };
        assert_eq!(row.get_f64("sum"), Some(60000.0));
    }
}
