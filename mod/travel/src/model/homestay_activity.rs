use innkeep_core::StoreError;
use innkeep_sql::{Row, Value};
use innkeep_store::{DelState, Entity, row_i64, row_opt_str, row_str};
use serde::{Deserialize, Serialize};

/// Curated activity rows on the home page.
pub mod row_type {
    pub const PREFERRED: &str = "preferred";
    pub const GOOD_BOSS: &str = "goodBoss";
}

/// Whether an activity row is currently published.
pub mod row_status {
    pub const UP: &str = "up";
    pub const DOWN: &str = "down";
}

/// Membership of one listing (`data_id`) in one home-page activity section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomestayActivity {
    pub id: i64,
    pub delete_time: Option<String>,
    pub del_state: DelState,
    pub version: i64,

    pub row_type: String,
    /// Listing id the row points at.
    pub data_id: i64,
    pub row_status: String,
}

const HOMESTAY_ACTIVITY_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS homestay_activity (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        delete_time TEXT,
        del_state   INTEGER NOT NULL DEFAULT 0,
        version     INTEGER NOT NULL DEFAULT 0,
        row_type    TEXT NOT NULL DEFAULT '',
        data_id     INTEGER NOT NULL DEFAULT 0,
        row_status  TEXT NOT NULL DEFAULT ''
    );
    CREATE INDEX IF NOT EXISTS idx_homestay_activity_type ON homestay_activity(row_type, row_status);
";

impl Entity for HomestayActivity {
    fn table_name() -> &'static str {
        "homestay_activity"
    }

    fn schema() -> &'static str {
        HOMESTAY_ACTIVITY_SCHEMA
    }

    fn columns() -> &'static [&'static str] {
        &[
            "delete_time",
            "del_state",
            "version",
            "row_type",
            "data_id",
            "row_status",
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
            Value::Text(self.row_type.clone()),
            Value::Integer(self.data_id),
            Value::Text(self.row_status.clone()),
        ]
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: row_i64(row, "id")?,
            delete_time: row_opt_str(row, "delete_time"),
            del_state: DelState::from_i64(row_i64(row, "del_state")?),
            version: row_i64(row, "version")?,
            row_type: row_str(row, "row_type")?,
            data_id: row_i64(row, "data_id")?,
            row_status: row_str(row, "row_status")?,
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
