use innkeep_core::StoreError;
use innkeep_sql::{Row, Value};
use innkeep_store::{DelState, Entity, row_i64, row_opt_str, row_str};
use serde::{Deserialize, Serialize};

/// Auth channel markers.
pub mod auth_type {
    /// Mobile + password registration.
    pub const SYSTEM: &str = "system";
}

/// Credential binding for one account. A user holds one row per auth channel;
/// `(auth_type, auth_key)` is unique platform-wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAuth {
    pub id: i64,
    pub delete_time: Option<String>,
    pub del_state: DelState,
    pub version: i64,

    pub user_id: i64,
    pub auth_key: String,
    pub auth_type: String,
}

const USER_AUTH_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS user_auth (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        delete_time TEXT,
        del_state   INTEGER NOT NULL DEFAULT 0,
        version     INTEGER NOT NULL DEFAULT 0,
        user_id     INTEGER NOT NULL DEFAULT 0,
        auth_key    TEXT NOT NULL DEFAULT '',
        auth_type   TEXT NOT NULL DEFAULT ''
    );
    CREATE UNIQUE INDEX IF NOT EXISTS idx_user_auth_type_key ON user_auth(auth_type, auth_key);
    CREATE INDEX IF NOT EXISTS idx_user_auth_user_id ON user_auth(user_id);
";

impl Entity for UserAuth {
    fn table_name() -> &'static str {
        "user_auth"
    }

    fn schema() -> &'static str {
        USER_AUTH_SCHEMA
    }

    fn columns() -> &'static [&'static str] {
        &[
            "delete_time",
            "del_state",
            "version",
            "user_id",
            "auth_key",
            "auth_type",
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
            Value::Integer(self.user_id),
            Value::Text(self.auth_key.clone()),
            Value::Text(self.auth_type.clone()),
        ]
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: row_i64(row, "id")?,
            delete_time: row_opt_str(row, "delete_time"),
            del_state: DelState::from_i64(row_i64(row, "del_state")?),
            version: row_i64(row, "version")?,
            user_id: row_i64(row, "user_id")?,
            auth_key: row_str(row, "auth_key")?,
            auth_type: row_str(row, "auth_type")?,
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
