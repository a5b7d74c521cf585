use innkeep_core::StoreError;
use innkeep_sql::{Row, Value};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Soft-delete marker, stored as INTEGER `0` (live) or `1` (deleted).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DelState {
    #[default]
    NotDeleted,
    Deleted,
}

impl DelState {
    pub fn as_i64(self) -> i64 {
        match self {
            DelState::NotDeleted => 0,
            DelState::Deleted => 1,
        }
    }

    pub fn from_i64(v: i64) -> Self {
        match v {
            1 => DelState::Deleted,
            _ => DelState::NotDeleted,
        }
    }
}

/// Binding between a domain struct and its SQL table.
///
/// Every entity carries the store-managed columns `delete_time`, `del_state`
/// and `version` alongside its own fields. `columns()` lists every column
/// except `id` (which the database assigns), and `values()` must produce one
/// value per listed column, in the same order.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Table this entity maps to.
    fn table_name() -> &'static str;

    /// DDL creating the table and its indexes, `IF NOT EXISTS` throughout.
    fn schema() -> &'static str;

    /// Column names in statement order, excluding `id`.
    fn columns() -> &'static [&'static str];

    /// Bind values for `columns()`, in the same order.
    fn values(&self) -> Vec<Value>;

    /// Rebuild the entity from a row holding `id` plus `columns()`.
    fn from_row(row: &Row) -> Result<Self, StoreError>;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn version(&self) -> i64;
    fn set_version(&mut self, version: i64);
    fn del_state(&self) -> DelState;
    fn set_del_state(&mut self, state: DelState);
    fn set_delete_time(&mut self, at: String);
}

/// Read a required INTEGER column.
pub fn row_i64(row: &Row, name: &str) -> Result<i64, StoreError> {
    row.get_i64(name)
        .ok_or_else(|| StoreError::Storage(format!("missing column {name}")))
}

/// Read a required REAL (or INTEGER) column.
pub fn row_f64(row: &Row, name: &str) -> Result<f64, StoreError> {
    row.get_f64(name)
        .ok_or_else(|| StoreError::Storage(format!("missing column {name}")))
}

/// Read a required TEXT column.
pub fn row_str(row: &Row, name: &str) -> Result<String, StoreError> {
    row.get_str(name)
        .map(str::to_string)
        .ok_or_else(|| StoreError::Storage(format!("missing column {name}")))
}

/// Read a nullable TEXT column, `NULL` becoming `None`.
pub fn row_opt_str(row: &Row, name: &str) -> Option<String> {
    row.get_str(name).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn del_state_integer_mapping() {
        assert_eq!(DelState::NotDeleted.as_i64(), 0);
        assert_eq!(DelState::Deleted.as_i64(), 1);
        assert_eq!(DelState::from_i64(0), DelState::NotDeleted);
        assert_eq!(DelState::from_i64(1), DelState::Deleted);
    }

    #[test]
    fn row_readers_report_missing_columns() {
        let row = Row {
            columns: vec![("title".to_string(), Value::Text("inn".to_string()))],
        };
        assert_eq!(row_str(&row, "title").unwrap(), "inn");
        assert!(matches!(row_i64(&row, "nope"), Err(StoreError::Storage(_))));
        assert_eq!(row_opt_str(&row, "nope"), None);
    }
}
