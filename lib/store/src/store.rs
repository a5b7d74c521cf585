use std::marker::PhantomData;
use std::sync::Arc;

use innkeep_core::{StoreError, now_rfc3339};
use innkeep_kv::KVStore;
use innkeep_sql::{SQLExecutor, SqlSession, SqliteStore, Value};
use tracing::warn;

use crate::builder::SelectBuilder;
use crate::entity::{DelState, Entity};

/// Generic persistence for one entity table: CRUD with optimistic locking,
/// soft delete, offset and cursor pagination, aggregates, transaction scope,
/// and an optional read-through row cache keyed by `"<table>:<id>"`.
///
/// Writes accept an optional [`SqlSession`] so several stores sharing one
/// [`SqliteStore`] can participate in the same transaction. Reads always run
/// on the shared store and do not observe uncommitted writes.
///
/// The cache is strictly an accelerator: every cache failure is logged and
/// the call falls through to SQL, so a dead cache never fails a request.
pub struct EntityStore<T: Entity> {
    sql: Arc<SqliteStore>,
    cache: Option<Arc<dyn KVStore>>,
    _phantom: PhantomData<T>,
}

impl<T: Entity> EntityStore<T> {
    pub fn new(sql: Arc<SqliteStore>, cache: Option<Arc<dyn KVStore>>) -> Self {
        Self {
            sql,
            cache,
            _phantom: PhantomData,
        }
    }

    pub fn new_uncached(sql: Arc<SqliteStore>) -> Self {
        Self::new(sql, None)
    }

    /// Create the entity's table and indexes if they do not exist yet.
    pub fn ensure_table(&self) -> Result<(), StoreError> {
        self.sql
            .exec_batch(T::schema())
            .map_err(|e| StoreError::Storage(format!("{} schema init: {e}", T::table_name())))
    }

    // ── Writes ──

    /// Insert a new row. The id is assigned by the database and written back
    /// to `data`, and the stored version is forced to 1 regardless of what
    /// `data` carried.
    pub fn insert(
        &self,
        session: Option<&SqlSession<'_>>,
        data: &mut T,
    ) -> Result<i64, StoreError> {
        data.set_version(1);
        let id = self
            .executor(session)
            .exec_insert(&insert_sql::<T>(), &data.values())
            .map_err(|e| StoreError::Storage(format!("{} insert: {e}", T::table_name())))?;
        data.set_id(id);
        Ok(id)
    }

    /// Rewrite the full row for `data.id()`, unconditionally.
    pub fn update(&self, session: Option<&SqlSession<'_>>, data: &T) -> Result<(), StoreError> {
        let cols = T::columns();
        let sets: Vec<String> = cols
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{c} = ?{}", i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            T::table_name(),
            sets.join(", "),
            cols.len() + 1
        );
        let mut params = data.values();
        params.push(Value::Integer(data.id()));

        let affected = self
            .executor(session)
            .exec(&sql, &params)
            .map_err(|e| StoreError::Storage(format!("{} update: {e}", T::table_name())))?;
        self.invalidate_cache(data.id());
        if affected == 0 {
            return Err(StoreError::NotFound(format!(
                "{} {}",
                T::table_name(),
                data.id()
            )));
        }
        Ok(())
    }

    /// Rewrite the row only if the stored version still equals
    /// `data.version()`, bumping the version by one as part of the same
    /// statement. On success `data` carries the new version; on conflict
    /// `data` is left as it was and [`StoreError::VersionConflict`] is
    /// returned, so the caller can re-read and retry.
    pub fn update_with_version(
        &self,
        session: Option<&SqlSession<'_>>,
        data: &mut T,
    ) -> Result<(), StoreError> {
        let expected = data.version();
        data.set_version(expected + 1);

        let cols = T::columns();
        let sets: Vec<String> = cols
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{c} = ?{}", i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{} AND version = ?{}",
            T::table_name(),
            sets.join(", "),
            cols.len() + 1,
            cols.len() + 2
        );
        let mut params = data.values();
        params.push(Value::Integer(data.id()));
        params.push(Value::Integer(expected));

        let affected = match self.executor(session).exec(&sql, &params) {
            Ok(n) => n,
            Err(e) => {
                data.set_version(expected);
                return Err(StoreError::Storage(format!(
                    "{} versioned update: {e}",
                    T::table_name()
                )));
            }
        };
        self.invalidate_cache(data.id());
        if affected == 0 {
            data.set_version(expected);
            return Err(StoreError::VersionConflict(format!(
                "{} {} changed since version {}",
                T::table_name(),
                data.id(),
                expected
            )));
        }
        Ok(())
    }

    /// Mark the row deleted without removing it: sets the deletion marker and
    /// timestamp on `data` and persists through [`update_with_version`], so a
    /// concurrent edit surfaces as a version conflict instead of being lost.
    pub fn delete_soft(
        &self,
        session: Option<&SqlSession<'_>>,
        data: &mut T,
    ) -> Result<(), StoreError> {
        data.set_del_state(DelState::Deleted);
        data.set_delete_time(now_rfc3339());
        self.update_with_version(session, data)
    }

    /// Remove the row permanently.
    pub fn delete(&self, session: Option<&SqlSession<'_>>, id: i64) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", T::table_name());
        let affected = self
            .executor(session)
            .exec(&sql, &[Value::Integer(id)])
            .map_err(|e| StoreError::Storage(format!("{} delete: {e}", T::table_name())))?;
        self.invalidate_cache(id);
        if affected == 0 {
            return Err(StoreError::NotFound(format!("{} {id}", T::table_name())));
        }
        Ok(())
    }

    // ── Reads ──

    /// Fetch one row by primary key, soft-deleted rows included. Served from
    /// cache when possible, populating it on a miss.
    pub fn find_one(&self, id: i64) -> Result<T, StoreError> {
        if let Some(hit) = self.cache_get(id) {
            return Ok(hit);
        }

        let sql = format!("{} WHERE id = ?1 LIMIT 1", select_sql::<T>());
        let rows = self
            .sql
            .query(&sql, &[Value::Integer(id)])
            .map_err(|e| StoreError::Storage(format!("{} find_one: {e}", T::table_name())))?;
        let row = rows
            .first()
            .ok_or_else(|| StoreError::NotFound(format!("{} {id}", T::table_name())))?;

        let entity = T::from_row(row)?;
        self.cache_set(&entity);
        Ok(entity)
    }

    /// Builder scoped to live rows.
    pub fn select_builder(&self) -> SelectBuilder {
        SelectBuilder::scoped(T::table_name())
    }

    /// Builder over every row, soft-deleted ones included.
    pub fn select_builder_with_deleted(&self) -> SelectBuilder {
        SelectBuilder::unscoped(T::table_name())
    }

    /// All rows matching the builder. An empty `order_by` means newest first
    /// (`id DESC`).
    pub fn find_all(&self, builder: SelectBuilder, order_by: &str) -> Result<Vec<T>, StoreError> {
        let (where_sql, params) = builder.where_sql();
        let sql = format!(
            "{}{}{}",
            select_sql::<T>(),
            where_sql,
            order_clause(order_by)
        );
        self.query_rows(&sql, &params, "find_all")
    }

    /// `COUNT(field)` over the matching rows.
    pub fn find_count(&self, builder: SelectBuilder, field: &str) -> Result<i64, StoreError> {
        if field.is_empty() {
            return Err(StoreError::InvalidArgument(format!(
                "{} find_count: empty field name",
                T::table_name()
            )));
        }
        let (where_sql, params) = builder.where_sql();
        let sql = format!(
            "SELECT COUNT({field}) AS count FROM {}{}",
            builder.table(),
            where_sql
        );
        let rows = self
            .sql
            .query(&sql, &params)
            .map_err(|e| StoreError::Storage(format!("{} find_count: {e}", T::table_name())))?;
        Ok(rows.first().and_then(|r| r.get_i64("count")).unwrap_or(0))
    }

    /// `SUM(field)` over the matching rows; 0 when nothing matches.
    pub fn find_sum(&self, builder: SelectBuilder, field: &str) -> Result<f64, StoreError> {
        if field.is_empty() {
            return Err(StoreError::InvalidArgument(format!(
                "{} find_sum: empty field name",
                T::table_name()
            )));
        }
        let (where_sql, params) = builder.where_sql();
        let sql = format!(
            "SELECT SUM({field}) AS sum FROM {}{}",
            builder.table(),
            where_sql
        );
        let rows = self
            .sql
            .query(&sql, &params)
            .map_err(|e| StoreError::Storage(format!("{} find_sum: {e}", T::table_name())))?;
        Ok(rows.first().and_then(|r| r.get_f64("sum")).unwrap_or(0.0))
    }

    /// Offset pagination: page numbers start at 1 and anything lower is
    /// treated as 1. An empty `order_by` means newest first.
    pub fn find_page_list_by_page(
        &self,
        builder: SelectBuilder,
        page: i64,
        page_size: i64,
        order_by: &str,
    ) -> Result<Vec<T>, StoreError> {
        let page = page.max(1);
        let (where_sql, mut params) = builder.where_sql();
        let sql = format!(
            "{}{}{} LIMIT ? OFFSET ?",
            select_sql::<T>(),
            where_sql,
            order_clause(order_by)
        );
        params.push(Value::Integer(page_size));
        params.push(Value::Integer((page - 1) * page_size));
        self.query_rows(&sql, &params, "find_page_list_by_page")
    }

    /// Offset pagination plus the total row count for the same predicate.
    /// The two statements run back to back, not atomically, so the total can
    /// drift from the page under concurrent writes.
    pub fn find_page_list_by_page_with_total(
        &self,
        builder: SelectBuilder,
        page: i64,
        page_size: i64,
        order_by: &str,
    ) -> Result<(Vec<T>, i64), StoreError> {
        let total = self.find_count(builder.clone(), "id")?;
        let items = self.find_page_list_by_page(builder, page, page_size, order_by)?;
        Ok((items, total))
    }

    /// Cursor pagination walking ids downward: rows with `id < last_id`,
    /// newest first. `last_id == 0` starts from the top. Pages stay stable
    /// while new rows are inserted, since new ids sort above the cursor.
    pub fn find_page_list_by_id_desc(
        &self,
        builder: SelectBuilder,
        last_id: i64,
        page_size: i64,
    ) -> Result<Vec<T>, StoreError> {
        let builder = if last_id > 0 {
            builder.and_where("id < ?", vec![Value::Integer(last_id)])
        } else {
            builder
        };
        let (where_sql, mut params) = builder.where_sql();
        let sql = format!(
            "{}{} ORDER BY id DESC LIMIT ?",
            select_sql::<T>(),
            where_sql
        );
        params.push(Value::Integer(page_size));
        self.query_rows(&sql, &params, "find_page_list_by_id_desc")
    }

    /// Cursor pagination walking ids upward: rows with `id > pre_max_id`,
    /// oldest first. `pre_max_id == 0` starts from the bottom.
    pub fn find_page_list_by_id_asc(
        &self,
        builder: SelectBuilder,
        pre_max_id: i64,
        page_size: i64,
    ) -> Result<Vec<T>, StoreError> {
        let builder = if pre_max_id > 0 {
            builder.and_where("id > ?", vec![Value::Integer(pre_max_id)])
        } else {
            builder
        };
        let (where_sql, mut params) = builder.where_sql();
        let sql = format!("{}{} ORDER BY id ASC LIMIT ?", select_sql::<T>(), where_sql);
        params.push(Value::Integer(page_size));
        self.query_rows(&sql, &params, "find_page_list_by_id_asc")
    }

    // ── Transactions ──

    /// Run `f` inside one transaction. Writes issued through the provided
    /// session commit together when `f` returns Ok and roll back when it
    /// returns Err. The session works across every store sharing this
    /// store's [`SqliteStore`].
    pub fn trans<R>(
        &self,
        f: impl FnOnce(&SqlSession<'_>) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        self.sql.with_transaction(f)
    }

    // ── Internal ──

    fn executor<'a>(&'a self, session: Option<&'a SqlSession<'_>>) -> &'a dyn SQLExecutor {
        match session {
            Some(session) => session,
            None => self.sql.as_ref(),
        }
    }

    fn query_rows(&self, sql: &str, params: &[Value], op: &str) -> Result<Vec<T>, StoreError> {
        let rows = self
            .sql
            .query(sql, params)
            .map_err(|e| StoreError::Storage(format!("{} {op}: {e}", T::table_name())))?;
        rows.iter().map(T::from_row).collect()
    }

    fn cache_key(&self, id: i64) -> String {
        format!("{}:{}", T::table_name(), id)
    }

    fn cache_get(&self, id: i64) -> Option<T> {
        let cache = self.cache.as_ref()?;
        let key = self.cache_key(id);
        match cache.get(&key) {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(entity) => Some(entity),
                Err(e) => {
                    warn!("cache entry {key} undecodable, falling back to storage: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("cache read {key} failed, falling back to storage: {e}");
                None
            }
        }
    }

    fn cache_set(&self, entity: &T) {
        if let Some(cache) = self.cache.as_ref() {
            let key = self.cache_key(entity.id());
            match serde_json::to_vec(entity) {
                Ok(bytes) => {
                    if let Err(e) = cache.set(&key, &bytes) {
                        warn!("cache write {key} failed: {e}");
                    }
                }
                Err(e) => warn!("cache encode {key} failed: {e}"),
            }
        }
    }

    fn invalidate_cache(&self, id: i64) {
        if let Some(cache) = self.cache.as_ref() {
            let key = self.cache_key(id);
            if let Err(e) = cache.delete(&key) {
                warn!("cache invalidate {key} failed: {e}");
            }
        }
    }
}

fn select_sql<T: Entity>() -> String {
    format!(
        "SELECT id, {} FROM {}",
        T::columns().join(", "),
        T::table_name()
    )
}

fn insert_sql<T: Entity>() -> String {
    let cols = T::columns();
    let placeholders: Vec<String> = (1..=cols.len()).map(|i| format!("?{i}")).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        T::table_name(),
        cols.join(", "),
        placeholders.join(", ")
    )
}

fn order_clause(order_by: &str) -> String {
    if order_by.is_empty() {
        " ORDER BY id DESC".to_string()
    } else {
        format!(" ORDER BY {order_by}")
    }
}
