use innkeep_sql::Value;

use crate::entity::DelState;

/// Query predicate for one table: AND-joined condition fragments with
/// positional `?` parameters. Builders compose by value, so a shared base can
/// branch into independent queries without interference.
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    table: &'static str,
    conds: Vec<(String, Vec<Value>)>,
}

impl SelectBuilder {
    /// Builder scoped to live rows, the default for list queries.
    pub fn scoped(table: &'static str) -> Self {
        Self::unscoped(table).and_where(
            "del_state = ?",
            vec![Value::Integer(DelState::NotDeleted.as_i64())],
        )
    }

    /// Builder over every row, soft-deleted ones included.
    pub fn unscoped(table: &'static str) -> Self {
        Self {
            table,
            conds: Vec::new(),
        }
    }

    /// Append a raw condition fragment, e.g. `("price >= ?", vec![...])`.
    /// The fragment's `?` placeholders must match `params` in count and order.
    pub fn and_where(mut self, fragment: impl Into<String>, params: Vec<Value>) -> Self {
        self.conds.push((fragment.into(), params));
        self
    }

    /// Append an equality condition on a single column.
    pub fn and_where_eq(self, column: &str, value: Value) -> Self {
        self.and_where(format!("{column} = ?"), vec![value])
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Render the `WHERE` clause (with a leading space) and its parameters.
    /// An unconditioned builder renders as the empty string.
    pub fn where_sql(&self) -> (String, Vec<Value>) {
        if self.conds.is_empty() {
            return (String::new(), Vec::new());
        }
        let mut fragments = Vec::with_capacity(self.conds.len());
        let mut params = Vec::new();
        for (fragment, values) in &self.conds {
            fragments.push(fragment.as_str());
            params.extend(values.iter().cloned());
        }
        (format!(" WHERE {}", fragments.join(" AND ")), params)
    }
}
