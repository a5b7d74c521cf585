use innkeep_core::StoreError;
use innkeep_sql::{Row, Value};
use innkeep_store::{DelState, Entity, row_i64, row_opt_str, row_str};
use serde::{Deserialize, Serialize};

/// Guest comment on a listing. `star` holds comma-separated sub-scores
/// (cleanliness, location, ...), e.g. `"4.5,5.0,4.0"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomestayComment {
    pub id: i64,
    pub delete_time: Option<String>,
    pub del_state: DelState,
    pub version: i64,

    pub homestay_id: i64,
    pub user_id: i64,
    pub content: String,
    pub star: String,
}

const HOMESTAY_COMMENT_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS homestay_comment (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        delete_time TEXT,
        del_state   INTEGER NOT NULL DEFAULT 0,
        version     INTEGER NOT NULL DEFAULT 0,
        homestay_id INTEGER NOT NULL DEFAULT 0,
        user_id     INTEGER NOT NULL DEFAULT 0,
        content     TEXT NOT NULL DEFAULT '',
        star        TEXT NOT NULL DEFAULT ''
    );
    CREATE INDEX IF NOT EXISTS idx_homestay_comment_homestay ON homestay_comment(homestay_id);
";

impl Entity for HomestayComment {
    fn table_name() -> &'static str {
        "homestay_comment"
    }

    fn schema() -> &'static str {
        HOMESTAY_COMMENT_SCHEMA
    }

    fn columns() -> &'static [&'static str] {
        &[
            "delete_time",
            "del_state",
            "version",
            "homestay_id",
            "user_id",
            "content",
            "star",
        ]
    }

    fn values(&self) -> Vec<Value> {
        vec![
            match &self.delete_time {
                Some(at) => Value::Text(at.clone()),
                None => Value::Null,
            },
            Value::Integer(self.del_state.as_i64()),
            Value::Integer(self.version),
            Value::Integer(self.homestay_id),
            Value::Integer(self.user_id),
            Value::Text(self.content.clone()),
            Value::Text(self.star.clone()),
        ]
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: row_i64(row, "id")?,
            delete_time: row_opt_str(row, "delete_time"),
            del_state: DelState::from_i64(row_i64(row, "del_state")?),
            version: row_i64(row, "version")?,
            homestay_id: row_i64(row, "homestay_id")?,
            user_id: row_i64(row, "user_id")?,
            content: row_str(row, "content")?,
            star: row_str(row, "star")?,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    fn version(&self) -> i64 {
        self.version
    }
    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
    fn del_state(&self) -> DelState {
        self.del_state
    }
    fn set_del_state(&mut self, state: DelState) {
        self.del_state = state;
    }
    fn set_delete_time(&mut self, at: String) {
        self.delete_time = Some(at);
    }
}
