use innkeep_core::StoreError;
use innkeep_sql::{Row, Value};
use innkeep_store::{DelState, Entity, row_i64, row_opt_str, row_str};
use serde::{Deserialize, Serialize};

/// Platform account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub delete_time: Option<String>,
    pub del_state: DelState,
    pub version: i64,

    /// Mobile number, unique across live and soft-deleted accounts.
    pub mobile: String,
    pub password: String,
    pub nickname: String,
    pub sex: i64,
    pub avatar: String,
    pub info: String,
}

const USER_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS user (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        delete_time TEXT,
        del_state   INTEGER NOT NULL DEFAULT 0,
        version     INTEGER NOT NULL DEFAULT 0,
        mobile      TEXT NOT NULL,
        password    TEXT NOT NULL DEFAULT '',
        nickname    TEXT NOT NULL DEFAULT '',
        sex         INTEGER NOT NULL DEFAULT 0,
        avatar      TEXT NOT NULL DEFAULT '',
        info        TEXT NOT NULL DEFAULT ''
    );
    CREATE UNIQUE INDEX IF NOT EXISTS idx_user_mobile ON user(mobile);
";

impl Entity for User {
    fn table_name() -> &'static str {
        "user"
    }

    fn schema() -> &'static str {
        USER_SCHEMA
    }

    fn columns() -> &'static [&'static str] {
        &[
            "delete_time",
            "del_state",
            "version",
            "mobile",
            "password",
            "nickname",
            "sex",
            "avatar",
            "info",
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
            Value::Text(self.mobile.clone()),
            Value::Text(self.password.clone()),
            Value::Text(self.nickname.clone()),
            Value::Integer(self.sex),
            Value::Text(self.avatar.clone()),
            Value::Text(self.info.clone()),
        ]
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: row_i64(row, "id")?,
            delete_time: row_opt_str(row, "delete_time"),
            del_state: DelState::from_i64(row_i64(row, "del_state")?),
            version: row_i64(row, "version")?,
            mobile: row_str(row, "mobile")?,
            password: row_str(row, "password")?,
            nickname: row_str(row, "nickname")?,
            sex: row_i64(row, "sex")?,
            avatar: row_str(row, "avatar")?,
            info: row_str(row, "info")?,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_json_roundtrip() {
        let u = User {
            id: 7,
            delete_time: None,
            del_state: DelState::NotDeleted,
            version: 1,
            mobile: "13800000001".into(),
            password: "secret".into(),
            nickname: "walker".into(),
            sex: 1,
            avatar: "".into(),
            info: "".into(),
        };
        let json = serde_json::to_string(&u).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(u, back);
    }

    #[test]
    fn user_values_align_with_columns() {
        let u = User {
            id: 0,
            delete_time: None,
            del_state: DelState::NotDeleted,
            version: 0,
            mobile: "13800000001".into(),
            password: "".into(),
            nickname: "".into(),
            sex: 0,
            avatar: "".into(),
            info: "".into(),
        };
        assert_eq!(User::columns().len(), u.values().len());
    }
}
